use serde::Deserialize;

use super::error::{FailedRequest, LoadError, LoadFailure};
use super::fetch::Fetch;
use super::loader::AssetLoader;
use super::request::{Drawable, Resource, ResourceBundle, ResourceKind, ResourceRequest};

/// Startup resources: one shader program plus textures in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetManifest {
    pub vertex_shader: String,
    pub fragment_shader: String,
    #[serde(default)]
    pub textures: Vec<String>,
}

impl AssetManifest {
    /// Request list `[vertex, fragment, textures...]`.
    pub fn requests(&self) -> Vec<ResourceRequest> {
        let mut requests = Vec::with_capacity(2 + self.textures.len());
        requests.push(ResourceRequest::text(&self.vertex_shader));
        requests.push(ResourceRequest::text(&self.fragment_shader));
        requests.extend(self.textures.iter().map(ResourceRequest::image));
        requests
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

/// A manifest's bundle split back into shaders and textures.
///
/// `textures[i]` goes into texture slot `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedAssets {
    pub shaders: ShaderSources,
    pub textures: Vec<Drawable>,
}

impl LoadedAssets {
    /// Splits a bundle produced from `manifest.requests()`.
    pub fn from_bundle(manifest: &AssetManifest, bundle: ResourceBundle) -> Result<Self, LoadError> {
        let requests = manifest.requests();
        let mut failed = Vec::new();
        let mut texts = Vec::with_capacity(2);
        let mut textures = Vec::with_capacity(manifest.textures.len());

        for (index, (request, payload)) in requests.iter().zip(bundle).enumerate() {
            let found = payload.kind();
            let expected = request.kind();
            match (expected, payload) {
                (ResourceKind::Text, Resource::Text(t)) => texts.push(t),
                (ResourceKind::Image, Resource::Image(d)) => textures.push(d),
                _ => failed.push(FailedRequest {
                    index,
                    request: request.clone(),
                    reason: LoadFailure::UnexpectedKind { expected, found },
                }),
            }
        }

        if !failed.is_empty() || texts.len() != 2 || textures.len() != manifest.textures.len() {
            return Err(LoadError { failed });
        }

        let fragment = texts.pop().unwrap_or_default();
        let vertex = texts.pop().unwrap_or_default();

        Ok(Self {
            shaders: ShaderSources { vertex, fragment },
            textures,
        })
    }
}

impl<F: Fetch> AssetLoader<F> {
    /// Loads every resource a manifest names, all or nothing.
    pub async fn load_manifest(&self, manifest: &AssetManifest) -> Result<LoadedAssets, LoadError> {
        let bundle = self.load_all(&manifest.requests()).await?;
        LoadedAssets::from_bundle(manifest, bundle)
    }
}
