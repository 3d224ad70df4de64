//! Engine-facing contract.
//!
//! The simulation/rendering engine is an external collaborator. The host only
//! ever talks to it through [`Engine`]; construction goes through an explicit
//! result so a failed engine never reaches the rest of startup.

mod contract;
mod error;

pub use contract::{Engine, EngineFactory};
pub use error::EngineInitError;
