//! Session - Live Session Wiring and Lifecycle
//!
//! ## Responsibilities
//!
//! - Validate the required UI regions before touching anything
//! - Wire canvas, preview loop, and control groups in order
//! - Expose the entry points the frontend routes control events to
//!
//! The preview must be live before the control groups are built, so every
//! control attaches against a rendering canvas.

use crate::camera_client::CameraService;
use crate::capture_orchestrator::{CaptureOrchestrator, DownloadSink};
use crate::config::ConsoleConfig;
use crate::error::{Error, Result};
use crate::exposure_binder::{ExposureBinder, ExposureBounds};
use crate::preview_loop::PreviewLoop;
use crate::surface::{PreviewCanvas, RangeSpec, WidgetFactory};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Region holding the exposure controls
pub const IMAGE_CONTROL_REGION: &str = "image_control_div";
/// Region holding the preview canvas
pub const PREVIEW_REGION: &str = "preview_div";
/// Region holding the filename box and capture trigger
pub const CAPTURE_CONTROL_REGION: &str = "capture_control_div";

/// Regions that must all be present in the region map
pub const REQUIRED_REGIONS: [&str; 3] = [
    IMAGE_CONTROL_REGION,
    PREVIEW_REGION,
    CAPTURE_CONTROL_REGION,
];

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Wiring in progress
    Initializing,
    /// Preview refresh active
    Live,
    /// Preview paused while a capture runs
    PausedForCapture,
    /// A required region was missing; nothing was wired
    FailedSetup,
}

/// A wired live session
pub struct LiveSession {
    state: RwLock<SessionState>,
    camera: Arc<dyn CameraService>,
    canvas: Arc<dyn PreviewCanvas>,
    preview: Arc<PreviewLoop>,
    binder: ExposureBinder,
    orchestrator: CaptureOrchestrator,
}

impl std::fmt::Debug for LiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveSession").finish_non_exhaustive()
    }
}

impl LiveSession {
    /// Validate the region map and wire the full session.
    ///
    /// Any missing required region fails the whole setup: the missing keys
    /// are logged, a setup error is returned, and nothing is created. On
    /// success the camera-side capture is started (failure logged,
    /// non-fatal), the canvas is created and sized, the preview loop goes
    /// live, and only then are the exposure and capture control groups
    /// built.
    pub async fn start(
        config: &ConsoleConfig,
        camera: Arc<dyn CameraService>,
        factory: Arc<dyn WidgetFactory>,
        sink: Arc<dyn DownloadSink>,
        regions: &HashMap<String, String>,
    ) -> Result<Self> {
        let missing: Vec<&str> = REQUIRED_REGIONS
            .iter()
            .copied()
            .filter(|key| !regions.contains_key(*key))
            .collect();

        if !missing.is_empty() {
            tracing::error!(
                state = ?SessionState::FailedSetup,
                missing = ?missing,
                "Missing control regions, aborting session setup"
            );
            return Err(Error::Setup(format!(
                "missing control regions: {}",
                missing.join(", ")
            )));
        }

        let state = RwLock::new(SessionState::Initializing);

        // The camera may already be streaming; a failure here is logged and
        // the session continues on whatever the camera still serves.
        if let Err(e) = camera.start_capture().await {
            tracing::warn!(error = %e, "Failed to start camera capture");
        }

        let canvas = factory.preview_canvas(&regions[PREVIEW_REGION]);
        canvas.resize();

        let preview = Arc::new(PreviewLoop::new(
            camera.clone(),
            canvas.clone(),
            config.preview_interval,
        ));
        preview.start().await;

        // Exposure group
        let range = RangeSpec {
            min: config.exposure_min_ms,
            max: config.exposure_max_ms,
            step: 1,
        };
        let slider = factory.range_control(&regions[IMAGE_CONTROL_REGION], range);
        let number = factory.number_control(&regions[IMAGE_CONTROL_REGION], range);
        let bounds = ExposureBounds {
            min_ms: config.exposure_min_ms,
            max_ms: config.exposure_max_ms,
        };
        let binder = ExposureBinder::new(camera.clone(), slider, number, bounds);
        binder.sync_from_camera().await;

        // Capture group
        let filename_box = factory.text_control(&regions[CAPTURE_CONTROL_REGION]);
        factory.trigger_control(&regions[CAPTURE_CONTROL_REGION], "Capture");
        let orchestrator = CaptureOrchestrator::new(
            camera.clone(),
            preview.clone(),
            filename_box,
            sink,
            config.capture_extension.clone(),
        );

        *state.write().await = SessionState::Live;
        tracing::info!("Live session started");

        Ok(Self {
            state,
            camera,
            canvas,
            preview,
            binder,
            orchestrator,
        })
    }

    /// Current lifecycle state
    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    /// Route a slider change event into the exposure binder
    pub async fn exposure_slider_changed(&self, exposure_ms: i64) {
        self.binder.slider_changed(exposure_ms).await;
    }

    /// Route a number box change event into the exposure binder
    pub async fn exposure_input_changed(&self, exposure_ms: i64) {
        self.binder.input_changed(exposure_ms).await;
    }

    /// Run one capture sequence.
    ///
    /// Ignored unless the session is live; a trigger activation during a
    /// running capture is a no-op.
    pub async fn capture(&self) {
        {
            let mut state = self.state.write().await;
            if *state != SessionState::Live {
                tracing::warn!(state = ?*state, "Capture ignored outside live state");
                return;
            }
            *state = SessionState::PausedForCapture;
        }

        self.orchestrator.capture().await;

        *self.state.write().await = SessionState::Live;
    }

    /// Refit the canvas to its container and redraw the last frame
    pub async fn redraw(&self) {
        self.canvas.resize();
        if let Some(frame) = self.preview.latest_frame().await {
            self.canvas.draw_frame(&frame);
        }
    }

    /// Stop the preview, clear the canvas, and release the camera
    pub async fn shutdown(self) {
        self.preview.stop().await;
        self.canvas.clear();

        if let Err(e) = self.camera.stop_capture().await {
            tracing::warn!(error = %e, "Failed to stop camera capture");
        }

        tracing::info!("Live session shut down");
    }
}
