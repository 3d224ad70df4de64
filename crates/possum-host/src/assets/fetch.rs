use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;

use futures::channel::oneshot;

use super::error::FetchError;

/// Host-provided fetch mechanism.
///
/// Resolves a URL or path into raw bytes. Implementations perform no retries;
/// that policy belongs to the caller.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> {
        (**self).fetch(url)
    }
}

/// Fetches from the local filesystem.
///
/// Relative paths resolve against `root`; absolute paths are used as given.
/// Each read runs on its own worker thread, so concurrent fetches overlap
/// instead of blocking the polling thread one after another.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let url = url.strip_prefix("file://").unwrap_or(url);
        let path = Path::new(url);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for FsFetcher {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Fetch for FsFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.resolve(url);
        log::debug!("fetch: reading {}", path.display());

        let (tx, rx) = oneshot::channel();
        thread::Builder::new()
            .name("possum-fetch".to_string())
            .spawn(move || {
                // The receiver is gone only if the load was abandoned.
                let _ = tx.send(read_file(&path));
            })?;

        rx.await
            .map_err(|_| FetchError::Other("fetch worker exited without a result".to_string()))?
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, FetchError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FetchError::NotFound,
        _ => FetchError::Io(e),
    })
}
