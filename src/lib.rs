//! Remote Camera Console Library
//!
//! Live-session control core for a networked remote camera. The crate owns
//! the timing of the preview refresh, the consistency of the exposure
//! controls with server state, and the capture/download sequence; the
//! widget surface and the camera transport are trait boundaries.
//!
//! ## Architecture (7 Components)
//!
//! 1. CameraClient - Typed camera boundary + HTTP adapter
//! 2. Surface - Widget/canvas boundary implemented by the frontend
//! 3. PreviewLoop - Self-throttled preview refresh and frame slot
//! 4. ExposureBinder - Slider/number/server exposure consistency
//! 5. CaptureOrchestrator - Still capture and download delivery
//! 6. FilenameSequencer - Sequence suffix advancement
//! 7. Session - Region validation and component wiring
//!
//! ## Design Principles
//!
//! - The camera is the authority for exposure; widgets only mirror it
//! - The preview cadence is measured from completion, never wall clock
//! - Setup failure is the only fatal condition

pub mod camera_client;
pub mod capture_orchestrator;
pub mod config;
pub mod error;
pub mod exposure_binder;
pub mod filename_sequencer;
pub mod preview_loop;
pub mod session;
pub mod surface;

#[cfg(test)]
pub(crate) mod testkit;

pub use config::ConsoleConfig;
pub use error::{Error, Result};
pub use session::{LiveSession, SessionState};
