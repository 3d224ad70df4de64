/// Engine construction returned an error value instead of a handle.
///
/// Fatal to startup: no data is uploaded and no frame loop is started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("engine construction failed: {message}")]
pub struct EngineInitError {
    pub message: String,
}

impl EngineInitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
