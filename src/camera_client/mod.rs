//! CameraClient - Remote Camera REST Adapter
//!
//! ## Responsibilities
//!
//! - Typed boundary for the camera server (`CameraService`)
//! - HTTP implementation against the `/api/v1.0/` surface
//! - Envelope parsing and failure normalization

use crate::config::ConsoleConfig;
use crate::error::{Error, Result};
use crate::surface::CanvasSize;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// API route prefix on the camera server
const API_PREFIX: &str = "/api/v1.0";

/// Camera operations consumed by the session core.
///
/// Transport and semantic failures both surface as `Err`; callers decide
/// whether to swallow them (the preview loop does) or report them.
#[async_trait]
pub trait CameraService: Send + Sync {
    /// Current exposure in ms
    async fn exposure(&self) -> Result<i64>;

    /// Set the exposure in ms; returns the value confirmed by the camera
    async fn set_exposure(&self, exposure_ms: i64) -> Result<i64>;

    /// Fetch an image payload, scaled to `size` when given, full resolution
    /// otherwise
    async fn image(&self, size: Option<CanvasSize>) -> Result<String>;

    /// Start continuous capture on the camera (side effect only)
    async fn start_capture(&self) -> Result<()>;

    /// Stop continuous capture on the camera (side effect only)
    async fn stop_capture(&self) -> Result<()>;
}

/// JSON envelope returned by every camera endpoint
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    exposure: Option<i64>,
    #[serde(default)]
    image: Option<String>,
}

impl ApiEnvelope {
    /// Reject unsuccessful envelopes, carrying the server-side message
    fn ok(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::Camera(
                self.message
                    .unwrap_or_else(|| "camera reported failure".to_string()),
            ))
        }
    }
}

/// HTTP adapter for the remote camera server
pub struct HttpCameraService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCameraService {
    /// Create a new adapter against `base_url` (scheme + host + port)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Create an adapter from the console configuration
    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        Self::new(config.camera_url.clone(), config.request_timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn fetch_envelope(&self, path: &str) -> Result<ApiEnvelope> {
        let resp = self.client.get(self.url(path)).send().await?;

        if !resp.status().is_success() {
            return Err(Error::Camera(format!(
                "camera API returned {}",
                resp.status()
            )));
        }

        let envelope: ApiEnvelope = resp.json().await?;
        envelope.ok()
    }
}

#[async_trait]
impl CameraService for HttpCameraService {
    async fn exposure(&self) -> Result<i64> {
        let envelope = self.fetch_envelope("/exposure").await?;
        envelope
            .exposure
            .ok_or_else(|| Error::Camera("exposure missing from response".to_string()))
    }

    async fn set_exposure(&self, exposure_ms: i64) -> Result<i64> {
        let envelope = self
            .fetch_envelope(&format!("/exposure/{}", exposure_ms))
            .await?;
        envelope
            .exposure
            .ok_or_else(|| Error::Camera("exposure missing from response".to_string()))
    }

    async fn image(&self, size: Option<CanvasSize>) -> Result<String> {
        let path = match size {
            Some(size) => format!("/get_image/{},{}", size.width, size.height),
            None => "/get_image".to_string(),
        };
        let envelope = self.fetch_envelope(&path).await?;
        envelope
            .image
            .ok_or_else(|| Error::Camera("image missing from response".to_string()))
    }

    async fn start_capture(&self) -> Result<()> {
        self.fetch_envelope("/start_capture").await.map(|_| ())
    }

    async fn stop_capture(&self) -> Result<()> {
        self.fetch_envelope("/stop_capture").await.map(|_| ())
    }
}
