use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::engine::Engine;
use crate::input::InputRouter;
use crate::time::{FrameClock, FrameTime};

/// Host frame-scheduling primitive.
pub trait FrameScheduler {
    /// Asks the host to invoke the frame callback once, at the next display
    /// refresh.
    fn request_frame(&mut self);
}

/// Frame loop configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    /// Consecutive failing frames tolerated before the loop halts.
    /// `0` never halts.
    pub max_consecutive_failures: u32,

    /// Upper clamp for the delta handed to `update`, in milliseconds.
    pub max_delta_ms: Option<u64>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_consecutive_failures: 120,
            max_delta_ms: None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Not started yet.
    Idle,
    /// A frame is scheduled.
    Running,
    /// Stopped after exhausting the failure budget. Terminal.
    Halted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("frame loop is not running ({0:?})")]
    NotRunning(LoopState),

    #[error("frame loop halted after {failures} consecutive failed frame(s); last: {last}")]
    Halted { failures: u32, last: String },
}

/// Drives the per-frame engine cycle.
///
/// Each frame runs input drain, then `update`, then `render`, then requests
/// the next frame. A failing `update` skips that frame's `render`. Failures
/// are logged and the next frame is still requested, so the loop keeps
/// itself alive; only a run of `max_consecutive_failures` failing frames
/// halts it.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    clock: FrameClock,
    max_consecutive_failures: u32,
    consecutive_failures: u32,
}

impl FrameLoop {
    pub fn new(config: &FrameConfig) -> Self {
        let clock = match config.max_delta_ms {
            Some(ms) => FrameClock::with_max_delta(Duration::from_millis(ms)),
            None => FrameClock::new(),
        };

        Self {
            state: LoopState::Idle,
            clock,
            max_consecutive_failures: config.max_consecutive_failures,
            consecutive_failures: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Idle -> Running. Seeds the clock at `now` and requests the first frame.
    ///
    /// Ignored outside `Idle`.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, now: Instant, scheduler: &mut S) {
        if self.state != LoopState::Idle {
            log::warn!("frame: start ignored in state {:?}", self.state);
            return;
        }

        self.clock.start(now);
        self.state = LoopState::Running;
        log::info!("frame: loop started");

        scheduler.request_frame();
    }

    /// Runs one scheduled frame at `now`.
    pub fn run_frame<E, S>(
        &mut self,
        now: Instant,
        engine: &mut E,
        router: &InputRouter,
        scheduler: &mut S,
    ) -> Result<FrameTime, FrameError>
    where
        E: Engine + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.state != LoopState::Running {
            return Err(FrameError::NotRunning(self.state));
        }

        router.drain_into(engine);

        let ft = self.clock.tick_at(now);
        log::trace!("frame {}: delta {:.3}ms", ft.frame_index, ft.delta_ms());

        let outcome = engine
            .update(ft.delta_ms())
            .and_then(|()| engine.render());

        match outcome {
            Ok(()) => self.consecutive_failures = 0,
            Err(e) => {
                self.consecutive_failures += 1;
                log::warn!(
                    "frame {}: engine failure ({} in a row): {e:#}",
                    ft.frame_index,
                    self.consecutive_failures
                );

                if self.max_consecutive_failures > 0
                    && self.consecutive_failures >= self.max_consecutive_failures
                {
                    self.state = LoopState::Halted;
                    log::error!("frame: loop halted after {} failed frame(s)", self.consecutive_failures);
                    return Err(FrameError::Halted {
                        failures: self.consecutive_failures,
                        last: format!("{e:#}"),
                    });
                }
            }
        }

        scheduler.request_frame();
        Ok(ft)
    }
}
