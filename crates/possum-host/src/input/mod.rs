//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Platform adapters translate host events into `InputEvent`s and hand them
//! to the `InputRouter`, which forwards them immediately or per frame.

pub mod platform;

mod queue;
mod router;
mod types;

pub use queue::PendingEventQueue;
pub use router::{DeliveryMode, InputRouter};
pub use types::{ButtonState, InputEvent, KeyEvent, PointerEvent, PointerMoveEvent};
