//! possum host crate.
//!
//! Host-side orchestration for an external simulation/rendering engine:
//! asset loading, input routing, surface sizing and the frame loop, plus a
//! winit desktop runtime that wires them to a window.

pub mod assets;
pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod frame;
pub mod input;
pub mod logging;
pub mod surface;
pub mod time;
pub mod window;

#[cfg(test)]
mod testing;
