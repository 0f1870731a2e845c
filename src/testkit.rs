//! Shared test doubles for the session components
//!
//! Hand-rolled mocks behind the camera, surface, and download boundaries.
//! Only compiled for tests.

use crate::camera_client::CameraService;
use crate::capture_orchestrator::DownloadSink;
use crate::error::{Error, Result};
use crate::preview_loop::PreviewFrame;
use crate::surface::{
    CanvasSize, PreviewCanvas, RangeSpec, TextInput, ValueInput, WidgetFactory,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted camera double
pub struct MockCamera {
    exposure: AtomicI64,
    confirmed: Mutex<Option<i64>>,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_image: AtomicBool,
    image_delay: Mutex<Duration>,
    full_image_delay: Mutex<Duration>,
    payload: Mutex<String>,
    image_calls: Mutex<Vec<Option<CanvasSize>>>,
    set_calls: Mutex<Vec<i64>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    start_capture_calls: AtomicUsize,
    stop_capture_calls: AtomicUsize,
}

impl MockCamera {
    pub fn new() -> Self {
        Self {
            exposure: AtomicI64::new(0),
            confirmed: Mutex::new(None),
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
            fail_image: AtomicBool::new(false),
            image_delay: Mutex::new(Duration::ZERO),
            full_image_delay: Mutex::new(Duration::ZERO),
            payload: Mutex::new("data:image/jpeg;base64,ZnJhbWU=".to_string()),
            image_calls: Mutex::new(Vec::new()),
            set_calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            start_capture_calls: AtomicUsize::new(0),
            stop_capture_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_exposure_value(&self, exposure_ms: i64) {
        self.exposure.store(exposure_ms, Ordering::SeqCst);
    }

    /// Script the value the camera confirms for any set request
    pub fn confirm_with(&self, exposure_ms: i64) {
        *self.confirmed.lock().unwrap() = Some(exposure_ms);
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    pub fn fail_image(&self, fail: bool) {
        self.fail_image.store(fail, Ordering::SeqCst);
    }

    /// Delay applied to scaled (preview) fetches
    pub fn set_image_delay(&self, delay: Duration) {
        *self.image_delay.lock().unwrap() = delay;
    }

    /// Delay applied to full-resolution fetches
    pub fn set_full_image_delay(&self, delay: Duration) {
        *self.full_image_delay.lock().unwrap() = delay;
    }

    pub fn image_calls(&self) -> Vec<Option<CanvasSize>> {
        self.image_calls.lock().unwrap().clone()
    }

    pub fn scaled_image_calls(&self) -> usize {
        self.image_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|size| size.is_some())
            .count()
    }

    pub fn set_calls(&self) -> Vec<i64> {
        self.set_calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn start_capture_calls(&self) -> usize {
        self.start_capture_calls.load(Ordering::SeqCst)
    }

    pub fn stop_capture_calls(&self) -> usize {
        self.stop_capture_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraService for MockCamera {
    async fn exposure(&self) -> Result<i64> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Error::Camera("scripted exposure read failure".to_string()));
        }
        Ok(self.exposure.load(Ordering::SeqCst))
    }

    async fn set_exposure(&self, exposure_ms: i64) -> Result<i64> {
        self.set_calls.lock().unwrap().push(exposure_ms);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(Error::Camera("scripted exposure write failure".to_string()));
        }
        let confirmed = self.confirmed.lock().unwrap().unwrap_or(exposure_ms);
        self.exposure.store(confirmed, Ordering::SeqCst);
        Ok(confirmed)
    }

    async fn image(&self, size: Option<CanvasSize>) -> Result<String> {
        self.image_calls.lock().unwrap().push(size);

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = if size.is_some() {
            *self.image_delay.lock().unwrap()
        } else {
            *self.full_image_delay.lock().unwrap()
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_image.load(Ordering::SeqCst) {
            return Err(Error::Camera("scripted image failure".to_string()));
        }
        Ok(self.payload.lock().unwrap().clone())
    }

    async fn start_capture(&self) -> Result<()> {
        self.start_capture_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop_capture(&self) -> Result<()> {
        self.stop_capture_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Canvas double recording every draw
pub struct RecordingCanvas {
    size: Mutex<CanvasSize>,
    draws: Mutex<Vec<PreviewFrame>>,
    resizes: AtomicUsize,
    clears: AtomicUsize,
}

impl RecordingCanvas {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size: Mutex::new(size),
            draws: Mutex::new(Vec::new()),
            resizes: AtomicUsize::new(0),
            clears: AtomicUsize::new(0),
        }
    }

    pub fn draw_count(&self) -> usize {
        self.draws.lock().unwrap().len()
    }

    pub fn resize_count(&self) -> usize {
        self.resizes.load(Ordering::SeqCst)
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl PreviewCanvas for RecordingCanvas {
    fn resize(&self) {
        self.resizes.fetch_add(1, Ordering::SeqCst);
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }

    fn draw_frame(&self, frame: &PreviewFrame) {
        self.draws.lock().unwrap().push(frame.clone());
    }

    fn size(&self) -> CanvasSize {
        *self.size.lock().unwrap()
    }
}

/// Numeric control double
pub struct FakeValueInput {
    value: Mutex<Option<i64>>,
}

impl FakeValueInput {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    pub fn value(&self) -> Option<i64> {
        *self.value.lock().unwrap()
    }
}

impl ValueInput for FakeValueInput {
    fn set_value(&self, value: i64) {
        *self.value.lock().unwrap() = Some(value);
    }
}

/// Text control double
pub struct FakeTextInput {
    value: Mutex<String>,
}

impl FakeTextInput {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(String::new()),
        }
    }

    pub fn text(&self) -> String {
        self.value.lock().unwrap().clone()
    }

    pub fn set_text(&self, text: &str) {
        *self.value.lock().unwrap() = text.to_string();
    }
}

impl TextInput for FakeTextInput {
    fn text(&self) -> String {
        FakeTextInput::text(self)
    }

    fn set_text(&self, text: &str) {
        FakeTextInput::set_text(self, text);
    }
}

/// Download sink double
pub struct RecordingSink {
    delivered: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn filenames(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl DownloadSink for RecordingSink {
    async fn deliver(&self, filename: &str, _frame: &PreviewFrame) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Decode("scripted delivery failure".to_string()));
        }
        self.delivered.lock().unwrap().push(filename.to_string());
        Ok(())
    }
}

/// Widget factory double handing out pre-built controls and recording the
/// creation order
pub struct MockFactory {
    pub canvas: Arc<RecordingCanvas>,
    pub slider: Arc<FakeValueInput>,
    pub number: Arc<FakeValueInput>,
    pub filename: Arc<FakeTextInput>,
    created: Mutex<Vec<String>>,
}

impl MockFactory {
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            canvas: Arc::new(RecordingCanvas::new(canvas_size)),
            slider: Arc::new(FakeValueInput::new()),
            number: Arc::new(FakeValueInput::new()),
            filename: Arc::new(FakeTextInput::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, kind: &str, container: &str) {
        self.created
            .lock()
            .unwrap()
            .push(format!("{}@{}", kind, container));
    }
}

impl WidgetFactory for MockFactory {
    fn preview_canvas(&self, container: &str) -> Arc<dyn PreviewCanvas> {
        self.record("canvas", container);
        self.canvas.clone()
    }

    fn range_control(&self, container: &str, _range: RangeSpec) -> Arc<dyn ValueInput> {
        self.record("range", container);
        self.slider.clone()
    }

    fn number_control(&self, container: &str, _range: RangeSpec) -> Arc<dyn ValueInput> {
        self.record("number", container);
        self.number.clone()
    }

    fn text_control(&self, container: &str) -> Arc<dyn TextInput> {
        self.record("text", container);
        self.filename.clone()
    }

    fn trigger_control(&self, container: &str, _label: &str) {
        self.record("trigger", container);
    }
}
