use serde::Deserialize;

use crate::engine::Engine;

use super::queue::PendingEventQueue;
use super::types::InputEvent;

/// How host input reaches the engine.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Forward each event synchronously as it arrives.
    Immediate,
    /// Queue events and hand them over once per frame.
    #[default]
    Batched,
}

/// Transport between host input callbacks and the engine.
///
/// No interpretation happens here: no repeat suppression, no coalescing.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    mode: DeliveryMode,
    queue: PendingEventQueue,
}

impl InputRouter {
    pub fn new(mode: DeliveryMode) -> Self {
        Self {
            mode,
            queue: PendingEventQueue::new(),
        }
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Producer handle onto the pending queue.
    ///
    /// `None` in immediate mode, where nothing ever drains the queue. Hosts
    /// that deliver input off the frame thread push through a clone of this.
    pub fn queue(&self) -> Option<&PendingEventQueue> {
        match self.mode {
            DeliveryMode::Immediate => None,
            DeliveryMode::Batched => Some(&self.queue),
        }
    }

    /// Throws away whatever is pending without delivering it.
    ///
    /// Returns the number of discarded events.
    pub fn discard_pending(&self) -> usize {
        self.queue.drain().len()
    }

    /// Accepts one host event.
    pub fn route<E: Engine + ?Sized>(&self, engine: &mut E, event: InputEvent) {
        match self.mode {
            DeliveryMode::Immediate => {
                log::trace!("input: {event}");
                engine.process_event(&event);
            }
            DeliveryMode::Batched => self.queue.push(event),
        }
    }

    /// Hands the frame's pending events to the engine.
    ///
    /// In batched mode the engine receives exactly one (possibly empty)
    /// sequence per call. Immediate mode has nothing pending.
    pub fn drain_into<E: Engine + ?Sized>(&self, engine: &mut E) {
        if self.mode == DeliveryMode::Batched {
            let events = self.queue.drain();
            if !events.is_empty() {
                log::trace!("input: delivering {} batched event(s)", events.len());
            }
            engine.process_events(&events);
        }
    }
}
