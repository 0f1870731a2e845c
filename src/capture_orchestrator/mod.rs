//! CaptureOrchestrator - Still Capture and Download Delivery
//!
//! ## Responsibilities
//!
//! - Bracket the capture with preview pause/resume
//! - Full-resolution fetch and download delivery
//! - Filename sequencing on successful delivery
//!
//! The preview always resumes, whatever happens in between.

use crate::camera_client::CameraService;
use crate::error::{Error, Result};
use crate::filename_sequencer::next_capture_name;
use crate::preview_loop::{PreviewFrame, PreviewLoop};
use crate::surface::TextInput;
use async_trait::async_trait;
use base64::Engine as _;
use std::path::PathBuf;
use std::sync::Arc;

/// Delivery target for captured stills (the browser-download analog)
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Deliver a captured frame under `filename`
    async fn deliver(&self, filename: &str, frame: &PreviewFrame) -> Result<()>;
}

/// Writes captured stills into a local directory, decoding the camera's
/// base64 payload (with or without a data-URI prefix) into raw image bytes.
pub struct DirectoryDownloadSink {
    dir: PathBuf,
}

impl DirectoryDownloadSink {
    /// Deliver into `dir`, created on first use
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn decode_payload(payload: &str) -> Result<Vec<u8>> {
        let encoded = match payload.split_once("base64,") {
            Some((_, rest)) => rest,
            None => payload,
        };
        base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::Decode(format!("invalid image payload: {}", e)))
    }
}

#[async_trait]
impl DownloadSink for DirectoryDownloadSink {
    async fn deliver(&self, filename: &str, frame: &PreviewFrame) -> Result<()> {
        let bytes = Self::decode_payload(&frame.payload)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(filename);
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!(
            path = %path.display(),
            size = bytes.len(),
            "Saved capture"
        );

        Ok(())
    }
}

/// CaptureOrchestrator instance
pub struct CaptureOrchestrator {
    camera: Arc<dyn CameraService>,
    preview: Arc<PreviewLoop>,
    filename_box: Arc<dyn TextInput>,
    sink: Arc<dyn DownloadSink>,
    extension: String,
}

impl CaptureOrchestrator {
    /// Create a new orchestrator over an already-attached filename box
    pub fn new(
        camera: Arc<dyn CameraService>,
        preview: Arc<PreviewLoop>,
        filename_box: Arc<dyn TextInput>,
        sink: Arc<dyn DownloadSink>,
        extension: String,
    ) -> Self {
        Self {
            camera,
            preview,
            filename_box,
            sink,
            extension,
        }
    }

    /// Run one capture: pause the preview, fetch at full resolution,
    /// deliver, advance the filename box, resume.
    ///
    /// A failed fetch skips delivery and the advance; a failed delivery
    /// leaves the filename box unchanged. The sequence number is consumed
    /// only by a delivered file.
    pub async fn capture(&self) {
        self.preview.stop().await;

        match self.camera.image(None).await {
            Ok(payload) => {
                let frame = PreviewFrame::new(payload);
                let name = next_capture_name(&self.filename_box.text());
                let filename = format!("{}{}", name, self.extension);

                match self.sink.deliver(&filename, &frame).await {
                    Ok(()) => {
                        self.filename_box.set_text(&name);
                        tracing::info!(
                            filename = %filename,
                            size = frame.size_bytes(),
                            "Capture delivered"
                        );
                    }
                    Err(e) => {
                        tracing::error!(filename = %filename, error = %e, "Capture delivery failed");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Full-resolution fetch failed, skipping download");
            }
        }

        self.preview.start().await;
    }
}
