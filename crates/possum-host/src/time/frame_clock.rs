use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame (or since loop start for the first frame).
    pub delta: Duration,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

impl FrameTime {
    /// Elapsed time in milliseconds, the unit the engine's `update` expects.
    pub fn delta_ms(&self) -> f32 {
        (self.delta.as_nanos() as f64 / 1_000_000.0) as f32
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The clock holds the timestamp of the previous frame. It must be seeded with
/// [`FrameClock::start`] when the loop starts, so the first delta covers the
/// real time between loop start and the first scheduled callback.
///
/// An optional upper clamp keeps the delta bounded after long stalls
/// (debugger pauses, hidden tabs, minimized windows).
#[derive(Debug, Clone)]
pub struct FrameClock {
    previous: Option<Instant>,
    frame_index: u64,
    max_delta: Option<Duration>,
}

impl FrameClock {
    /// Creates an unseeded clock without clamping.
    pub fn new() -> Self {
        Self {
            previous: None,
            frame_index: 0,
            max_delta: None,
        }
    }

    /// Creates an unseeded clock that clamps deltas to `max_delta`.
    pub fn with_max_delta(max_delta: Duration) -> Self {
        Self {
            previous: None,
            frame_index: 0,
            max_delta: Some(max_delta),
        }
    }

    /// Seeds the clock baseline.
    pub fn start(&mut self, now: Instant) {
        self.previous = Some(now);
        self.frame_index = 0;
    }

    /// Returns `true` once the clock has been seeded.
    pub fn is_seeded(&self) -> bool {
        self.previous.is_some()
    }

    /// Advances the clock to `now` and returns a new `FrameTime`.
    ///
    /// An unseeded clock seeds itself at `now` and reports a zero delta; the
    /// frame loop always seeds at start, so this path only covers misuse.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let previous = self.previous.unwrap_or(now);
        let mut delta = now.saturating_duration_since(previous);

        if let Some(max) = self.max_delta {
            delta = delta.min(max);
        }

        self.previous = Some(now);

        let ft = FrameTime {
            delta,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
