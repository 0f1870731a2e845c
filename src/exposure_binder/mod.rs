//! ExposureBinder - Exposure Control Consistency
//!
//! ## Responsibilities
//!
//! - Reflect server-confirmed exposure into both controls
//! - Mirror optimistic edits between the slider and the number box
//! - Push edits to the camera; the camera stays the authority

use crate::camera_client::CameraService;
use crate::surface::ValueInput;
use std::sync::Arc;

/// Display bounds for the exposure controls, exclusive at both edges.
///
/// A confirmed value at or outside the bounds is treated as unset and never
/// written into the controls.
#[derive(Debug, Clone, Copy)]
pub struct ExposureBounds {
    pub min_ms: i64,
    pub max_ms: i64,
}

impl ExposureBounds {
    /// Whether `exposure_ms` lies strictly inside the bounds
    pub fn admits(&self, exposure_ms: i64) -> bool {
        exposure_ms > self.min_ms && exposure_ms < self.max_ms
    }
}

/// ExposureBinder instance
pub struct ExposureBinder {
    camera: Arc<dyn CameraService>,
    slider: Arc<dyn ValueInput>,
    number: Arc<dyn ValueInput>,
    bounds: ExposureBounds,
}

impl ExposureBinder {
    /// Create a binder over an already-attached control pair
    pub fn new(
        camera: Arc<dyn CameraService>,
        slider: Arc<dyn ValueInput>,
        number: Arc<dyn ValueInput>,
        bounds: ExposureBounds,
    ) -> Self {
        Self {
            camera,
            slider,
            number,
            bounds,
        }
    }

    /// Read the camera's current exposure and reflect it into both controls.
    ///
    /// A read failure leaves the controls untouched; the session stays
    /// usable.
    pub async fn sync_from_camera(&self) {
        match self.camera.exposure().await {
            Ok(exposure_ms) => self.reflect(exposure_ms),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read exposure from camera");
            }
        }
    }

    /// Slider edit: mirror into the number box, then confirm with the camera
    pub async fn slider_changed(&self, exposure_ms: i64) {
        self.number.set_value(exposure_ms);
        self.push(exposure_ms).await;
    }

    /// Number box edit: mirror into the slider, then confirm with the camera
    pub async fn input_changed(&self, exposure_ms: i64) {
        self.slider.set_value(exposure_ms);
        self.push(exposure_ms).await;
    }

    /// Send the edited value and re-apply the bounds check on what the
    /// camera confirms.
    ///
    /// On failure the controls keep the mirrored, unconfirmed value; there
    /// is no rollback to the previous confirmed state. Concurrent edits are
    /// not sequenced; the last confirmation to settle wins.
    async fn push(&self, exposure_ms: i64) {
        match self.camera.set_exposure(exposure_ms).await {
            Ok(confirmed) => {
                if confirmed != exposure_ms {
                    tracing::info!(
                        requested = exposure_ms,
                        confirmed,
                        "Camera adjusted the requested exposure"
                    );
                }
                self.reflect(confirmed);
            }
            Err(e) => {
                tracing::warn!(exposure_ms, error = %e, "Failed to set exposure");
            }
        }
    }

    /// Write a confirmed value into both controls if strictly inside bounds
    fn reflect(&self, exposure_ms: i64) {
        if self.bounds.admits(exposure_ms) {
            self.slider.set_value(exposure_ms);
            self.number.set_value(exposure_ms);
        }
    }
}
