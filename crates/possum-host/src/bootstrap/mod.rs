//! Startup sequencing and host callbacks.
//!
//! Ties the asset loader, surface sizer, input router and frame loop to one
//! engine instance and enforces the startup order between them.

mod host;

pub use host::{Host, StartupError};
