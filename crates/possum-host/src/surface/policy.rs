use std::num::NonZeroU32;

use serde::Deserialize;

/// Surface size in host pixels. Both axes are strictly positive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SurfaceDimensions {
    width: u32,
    height: u32,
}

impl SurfaceDimensions {
    /// Returns `None` if either axis is zero.
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.height
    }
}

/// The container cannot be sized under the active policy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SizingError {
    #[error("container reports non-positive size {width}x{height}")]
    NonPositive { width: i64, height: i64 },

    #[error("container size {width}x{height} exceeds the surface range")]
    TooLarge { width: i64, height: i64 },
}

/// Rounding rule that maps container size to surface size.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingPolicy {
    /// Surface equals the container.
    #[default]
    Exact,
    /// Each axis rounds down to a power of two.
    PowerOfTwo,
    /// Each axis rounds down to a multiple of the tile, plus one tile.
    ///
    /// The result always exceeds the container, so the viewport is never
    /// under-filled.
    PaddedMultiple(NonZeroU32),
}

impl SizingPolicy {
    /// Computes surface dimensions for a container. Pure.
    pub fn compute_dimensions(
        self,
        container_width: i64,
        container_height: i64,
    ) -> Result<SurfaceDimensions, SizingError> {
        let too_large = SizingError::TooLarge {
            width: container_width,
            height: container_height,
        };

        if container_width <= 0 || container_height <= 0 {
            return Err(SizingError::NonPositive {
                width: container_width,
                height: container_height,
            });
        }

        let (Ok(w), Ok(h)) = (u32::try_from(container_width), u32::try_from(container_height)) else {
            return Err(too_large);
        };

        let (w, h) = match self {
            SizingPolicy::Exact => (w, h),
            SizingPolicy::PowerOfTwo => (floor_pow2(w), floor_pow2(h)),
            SizingPolicy::PaddedMultiple(tile) => {
                let (Some(w), Some(h)) = (padded(w, tile), padded(h, tile)) else {
                    return Err(too_large);
                };
                (w, h)
            }
        };

        SurfaceDimensions::new(w, h).ok_or(too_large)
    }
}

#[inline]
fn floor_pow2(v: u32) -> u32 {
    1 << v.ilog2()
}

#[inline]
fn padded(v: u32, tile: NonZeroU32) -> Option<u32> {
    let tile = tile.get();
    (v / tile).checked_mul(tile)?.checked_add(tile)
}
