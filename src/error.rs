//! Error handling for the camera console

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required UI region missing at session setup (fatal)
    #[error("Setup error: {0}")]
    Setup(String),

    /// Camera reported unsuccess or returned a malformed envelope
    #[error("Camera error: {0}")]
    Camera(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image payload decode error
    #[error("Decode error: {0}")]
    Decode(String),
}
