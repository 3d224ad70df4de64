//! Asset loading pipeline.
//!
//! Fetches images and text resources concurrently through a host-provided
//! [`Fetch`] implementation and aggregates them into one [`ResourceBundle`].
//! A bundle exists only when every request succeeded.

mod error;
mod fetch;
mod loader;
mod manifest;
mod request;

pub use error::{FailedRequest, FetchError, LoadError, LoadFailure};
pub use fetch::{Fetch, FsFetcher};
pub use loader::AssetLoader;
pub use manifest::{AssetManifest, LoadedAssets, ShaderSources};
pub use request::{Drawable, Resource, ResourceBundle, ResourceKind, ResourceRequest};
