//! Host platform adapters.

pub mod winit;
