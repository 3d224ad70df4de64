//! Frame loop driver.
//!
//! Two-state machine (`Idle` -> `Running`) around the host's frame scheduler,
//! plus a terminal `Halted` state reached only when the engine keeps failing.

mod driver;

pub use driver::{FrameConfig, FrameError, FrameLoop, FrameScheduler, LoopState};
