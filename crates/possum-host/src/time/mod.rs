//! Time subsystem.
//!
//! Provides testable frame timing without coupling to the runtime:
//! - one `FrameClock` per frame loop, seeded when the loop starts
//! - `tick_at(now)` once per frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
