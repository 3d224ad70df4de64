use crate::engine::Engine;

use super::policy::{SizingError, SizingPolicy, SurfaceDimensions};

/// Host side of the drawable surface.
pub trait SurfaceHost {
    /// Client size of the container (viewport) in host pixels.
    ///
    /// May report zero or negative values while the container is hidden or
    /// not laid out yet.
    fn container_size(&self) -> (i64, i64);

    /// Resizes the drawable surface.
    fn set_surface_size(&mut self, dims: SurfaceDimensions);
}

/// Applies a [`SizingPolicy`] to the host surface and the engine.
#[derive(Debug, Clone)]
pub struct SurfaceSizer {
    policy: SizingPolicy,
    current: Option<SurfaceDimensions>,
    deferred: bool,
}

impl SurfaceSizer {
    pub fn new(policy: SizingPolicy) -> Self {
        Self {
            policy,
            current: None,
            deferred: false,
        }
    }

    pub fn policy(&self) -> SizingPolicy {
        self.policy
    }

    /// Last dimensions pushed to the host and engine.
    pub fn current(&self) -> Option<SurfaceDimensions> {
        self.current
    }

    /// `true` after a refresh failed and before the next one succeeds.
    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    pub fn compute_dimensions(
        &self,
        container_width: i64,
        container_height: i64,
    ) -> Result<SurfaceDimensions, SizingError> {
        self.policy.compute_dimensions(container_width, container_height)
    }

    /// Writes `dims` onto the host surface and informs the engine.
    pub fn apply<S, E>(&mut self, dims: SurfaceDimensions, surface: &mut S, engine: &mut E)
    where
        S: SurfaceHost + ?Sized,
        E: Engine + ?Sized,
    {
        log::debug!("surface: applying {}x{}", dims.width(), dims.height());

        surface.set_surface_size(dims);
        engine.set_canvas_dimensions(dims.width(), dims.height());

        self.current = Some(dims);
        self.deferred = false;
    }

    /// Recomputes from the container and applies end to end.
    ///
    /// On `SizingError` nothing is applied and the sizer stays deferred until a
    /// later refresh succeeds.
    pub fn refresh<S, E>(&mut self, surface: &mut S, engine: &mut E) -> Result<SurfaceDimensions, SizingError>
    where
        S: SurfaceHost + ?Sized,
        E: Engine + ?Sized,
    {
        let (w, h) = surface.container_size();
        match self.compute_dimensions(w, h) {
            Ok(dims) => {
                self.apply(dims, surface, engine);
                Ok(dims)
            }
            Err(e) => {
                log::warn!("surface: sizing deferred: {e}");
                self.deferred = true;
                Err(e)
            }
        }
    }
}
