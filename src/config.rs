//! Console configuration
//!
//! Env-overridable defaults for the live session.

use std::time::Duration;

/// Console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Camera server base URL (scheme + host + port)
    pub camera_url: String,
    /// Preview refresh cadence, measured from completion of the previous render
    pub preview_interval: Duration,
    /// Lower exposure display bound in ms (exclusive)
    pub exposure_min_ms: i64,
    /// Upper exposure display bound in ms (exclusive)
    pub exposure_max_ms: i64,
    /// Extension appended to capture downloads (never shown in the filename box)
    pub capture_extension: String,
    /// Timeout for camera API requests
    pub request_timeout: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            camera_url: std::env::var("CAMERA_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            preview_interval: Duration::from_millis(
                std::env::var("PREVIEW_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(500),
            ),
            exposure_min_ms: std::env::var("EXPOSURE_MIN_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            exposure_max_ms: std::env::var("EXPOSURE_MAX_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            capture_extension: std::env::var("CAPTURE_EXTENSION")
                .unwrap_or_else(|_| ".jpg".to_string()),
            request_timeout: Duration::from_secs(
                std::env::var("CAMERA_TIMEOUT_SEC")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}
