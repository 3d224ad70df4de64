use std::sync::{Arc, Mutex, MutexGuard};

use super::types::InputEvent;

/// Events accumulated between two frames.
///
/// Cloning yields another producer handle onto the same queue, so host
/// callbacks can push from wherever they run. The frame loop is the only
/// consumer; [`drain`](Self::drain) swaps the buffer out under the lock, which
/// keeps an event from being lost or delivered twice when a producer races the
/// drain.
#[derive(Debug, Clone, Default)]
pub struct PendingEventQueue {
    inner: Arc<Mutex<Vec<InputEvent>>>,
}

impl PendingEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event in arrival order.
    pub fn push(&self, event: InputEvent) {
        self.lock().push(event);
    }

    /// Takes every pending event, leaving the queue empty.
    pub fn drain(&self) -> Vec<InputEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A producer that panicked mid-push cannot leave a Vec half-written, so a
    // poisoned lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Vec<InputEvent>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
