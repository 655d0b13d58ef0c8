use thiserror::Error;

/// Transport-level failure of a single backend call. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("invalid backend url '{url}': {message}")]
    InvalidUrl { url: String, message: String },
    #[error("{endpoint} request failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },
    #[error("{endpoint} request returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("{endpoint} request body could not be encoded: {message}")]
    Encode {
        endpoint: &'static str,
        message: String,
    },
    #[error("{endpoint} response was not valid JSON: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

impl NetworkError {
    /// True when the request never got an HTTP answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::InvalidUrl { .. })
    }
}

/// Failure to produce a displayable asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("no image data found in response for '{name}'")]
    MissingImageData { name: String },
    #[error("no log text found in response for '{name}'")]
    MissingLogText { name: String },
    #[error("image data for '{name}' could not be decoded: {message}")]
    InvalidImageData { name: String, message: String },
    #[error(transparent)]
    Network(#[from] NetworkError),
}
