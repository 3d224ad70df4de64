//! Desktop host runtime.
//!
//! Owns the `winit` event loop and window and maps their callbacks onto the
//! host callbacks: resize, input, and redraw-driven frames.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, WindowSurface};
