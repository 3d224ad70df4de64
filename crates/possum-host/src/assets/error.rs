use std::fmt;

use super::request::{ResourceKind, ResourceRequest};

/// A single fetch failed at the transport level.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("not found")]
    NotFound,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Why one request did not produce a payload.
#[derive(Debug, thiserror::Error)]
pub enum LoadFailure {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("text is not valid UTF-8: {0}")]
    Text(#[from] std::string::FromUtf8Error),

    #[error("expected {expected} payload, got {found}")]
    UnexpectedKind {
        expected: ResourceKind,
        found: ResourceKind,
    },
}

/// A request that failed, with its position in the request list.
#[derive(Debug)]
pub struct FailedRequest {
    pub index: usize,
    pub request: ResourceRequest,
    pub reason: LoadFailure,
}

impl fmt::Display for FailedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}: {}", self.index, self.request, self.reason)
    }
}

/// One or more requests of a `load_all` failed; nothing was delivered.
#[derive(Debug)]
pub struct LoadError {
    pub failed: Vec<FailedRequest>,
}

impl LoadError {
    /// Returns `true` if the request for `url` is among the failures.
    pub fn contains_url(&self, url: &str) -> bool {
        self.failed.iter().any(|f| f.request.url() == url)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load {} resource(s)", self.failed.len())?;
        for (i, failure) in self.failed.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}
