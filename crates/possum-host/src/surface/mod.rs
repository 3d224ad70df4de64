//! Surface sizing.
//!
//! Derives the drawable surface size from the container viewport under a
//! closed set of rounding policies, then pushes it to the host surface and
//! the engine. Computing is pure; applying is the only side effect.

mod policy;
mod sizer;

pub use policy::{SizingError, SizingPolicy, SurfaceDimensions};
pub use sizer::{SurfaceHost, SurfaceSizer};
