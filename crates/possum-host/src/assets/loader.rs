use futures::future::join_all;

use super::error::{FailedRequest, LoadError, LoadFailure};
use super::fetch::Fetch;
use super::request::{Drawable, Resource, ResourceBundle, ResourceKind, ResourceRequest};

/// Fetches and decodes resources, all or nothing.
#[derive(Debug, Clone)]
pub struct AssetLoader<F> {
    fetcher: F,
}

impl<F: Fetch> AssetLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolves every request concurrently.
    ///
    /// Completes once all requests have settled. On success `bundle[i]`
    /// belongs to `requests[i]` whatever order the fetches finished in. If any
    /// request fails, every failure is reported and the successful payloads are
    /// dropped.
    pub async fn load_all(&self, requests: &[ResourceRequest]) -> Result<ResourceBundle, LoadError> {
        let settled = join_all(requests.iter().map(|req| self.load_one(req))).await;

        let mut payloads = Vec::with_capacity(requests.len());
        let mut failed = Vec::new();

        for (index, (request, result)) in requests.iter().zip(settled).enumerate() {
            match result {
                Ok(payload) => payloads.push(payload),
                Err(reason) => failed.push(FailedRequest {
                    index,
                    request: request.clone(),
                    reason,
                }),
            }
        }

        if !failed.is_empty() {
            return Err(LoadError { failed });
        }

        log::debug!("assets: {} resource(s) ready", payloads.len());
        Ok(ResourceBundle::new(payloads))
    }

    async fn load_one(&self, request: &ResourceRequest) -> Result<Resource, LoadFailure> {
        let bytes = self.fetcher.fetch(request.url()).await?;
        decode(request.kind(), bytes)
    }
}

fn decode(kind: ResourceKind, bytes: Vec<u8>) -> Result<Resource, LoadFailure> {
    match kind {
        ResourceKind::Image => {
            let image = image::load_from_memory(&bytes)?.to_rgba8();
            Ok(Resource::Image(Drawable::new(image)))
        }
        ResourceKind::Text => Ok(Resource::Text(String::from_utf8(bytes)?)),
    }
}
