//! PreviewLoop - Self-Throttled Preview Refresh
//!
//! ## Responsibilities
//!
//! - Repeating fetch/render of the scaled preview image
//! - Ownership of the current-frame slot
//! - Pause/resume around capture without request pile-up
//!
//! The next refresh is scheduled only after the previous fetch settles, so a
//! slow camera stretches the cadence instead of stacking requests.

use crate::camera_client::CameraService;
use crate::surface::PreviewCanvas;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// A fully loaded preview frame with capture metadata
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    /// String-encoded image payload (base64 JPEG or data URI)
    pub payload: String,
    /// When the frame finished loading
    pub captured_at: DateTime<Utc>,
}

impl PreviewFrame {
    /// Wrap a camera payload once it has fully arrived
    pub fn new(payload: String) -> Self {
        Self {
            payload,
            captured_at: Utc::now(),
        }
    }

    /// Payload size in bytes
    pub fn size_bytes(&self) -> usize {
        self.payload.len()
    }
}

/// Scheduling state behind the loop's lock
#[derive(Debug, Default)]
struct LoopState {
    running: bool,
    /// Bumped on every start; a task holding a stale generation must not
    /// fetch or render again
    generation: u64,
}

/// PreviewLoop instance
pub struct PreviewLoop {
    camera: Arc<dyn CameraService>,
    canvas: Arc<dyn PreviewCanvas>,
    interval: Duration,
    state: Arc<RwLock<LoopState>>,
    frame_slot: Arc<RwLock<Option<PreviewFrame>>>,
}

impl PreviewLoop {
    /// Create a new loop; nothing is scheduled until [`start`](Self::start)
    pub fn new(
        camera: Arc<dyn CameraService>,
        canvas: Arc<dyn PreviewCanvas>,
        interval: Duration,
    ) -> Self {
        Self {
            camera,
            canvas,
            interval,
            state: Arc::new(RwLock::new(LoopState::default())),
            frame_slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Begin the refresh cycle
    ///
    /// No-op if already running.
    pub async fn start(&self) {
        let generation = {
            let mut state = self.state.write().await;
            if state.running {
                tracing::warn!("Preview refresh already running");
                return;
            }
            state.running = true;
            state.generation += 1;
            state.generation
        };

        tracing::debug!(
            generation,
            interval_ms = self.interval.as_millis() as u64,
            "Starting preview refresh"
        );

        let camera = self.camera.clone();
        let canvas = self.canvas.clone();
        let state = self.state.clone();
        let frame_slot = self.frame_slot.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            loop {
                if !Self::is_current(&state, generation).await {
                    break;
                }

                let size = canvas.size();
                match camera.image(Some(size)).await {
                    Ok(payload) => {
                        // A response that settles after stop() is dropped,
                        // never rendered
                        if !Self::is_current(&state, generation).await {
                            tracing::debug!(
                                generation,
                                "Dropping preview frame fetched before stop"
                            );
                            break;
                        }

                        let frame = PreviewFrame::new(payload);
                        {
                            let mut slot = frame_slot.write().await;
                            *slot = Some(frame.clone());
                        }
                        canvas.draw_frame(&frame);
                    }
                    Err(e) => {
                        // Transient failures must not kill the cycle; the
                        // cadence itself is the retry mechanism
                        tracing::warn!(error = %e, "Preview fetch failed, skipping render");
                    }
                }

                tokio::time::sleep(interval).await;
            }

            tracing::debug!(generation, "Preview refresh stopped");
        });
    }

    /// Halt scheduling
    ///
    /// Idempotent; safe to call when no refresh is pending. An in-flight
    /// fetch is not interrupted, but its response will be dropped.
    pub async fn stop(&self) {
        let mut state = self.state.write().await;
        if state.running {
            state.running = false;
            tracing::debug!(generation = state.generation, "Stopping preview refresh");
        }
    }

    /// Whether the refresh cycle is active
    pub async fn is_running(&self) -> bool {
        self.state.read().await.running
    }

    /// Last successfully loaded frame, for redraw after a container resize
    pub async fn latest_frame(&self) -> Option<PreviewFrame> {
        self.frame_slot.read().await.clone()
    }

    async fn is_current(state: &RwLock<LoopState>, generation: u64) -> bool {
        let state = state.read().await;
        state.running && state.generation == generation
    }
}
