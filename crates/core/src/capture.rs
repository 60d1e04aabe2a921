//! Screen capture functionality.
//!
//! This module enumerates capturable screens and grabs a single cropped
//! frame from one of them, producing an encoded PNG payload for the
//! persistence stage.
//!
//! # Example
//!
//! ```ignore
//! use snappress_core::capture::{CaptureSourceProvider, FrameGrabber};
//!
//! let sources = CaptureSourceProvider::enumerate()?;
//! let grabber = FrameGrabber::new();
//! let payload = grabber.grab(sources[0].id, bounds).await?;
//! ```

use std::io::Cursor;
use std::time::Duration;

use image::{DynamicImage, ImageFormat};
use screenshots::Screen;

use crate::bounds::Bounds;
use crate::error::{AppError, Result};

/// Default bound on how long a single frame grab may take.
const DEFAULT_GRAB_TIMEOUT: Duration = Duration::from_secs(5);

/// One capturable screen, as reported by a single enumeration.
///
/// The `id` is only guaranteed to resolve for the lifetime of the
/// enumeration that produced it; callers must re-enumerate per capture
/// rather than cache sources across workflow invocations.
#[derive(Debug, Clone)]
pub struct CaptureSource {
    pub id: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub is_primary: bool,
}

impl std::fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}x{}{}",
            self.name,
            self.width,
            self.height,
            if self.is_primary { " (primary)" } else { "" }
        )
    }
}

/// Enumerates the screens available for capture.
pub struct CaptureSourceProvider;

impl CaptureSourceProvider {
    /// Returns a fresh list of capturable screens.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ScreenCapture`] if screen enumeration fails
    /// (e.g. no display server available) or no screens are detected.
    pub fn enumerate() -> Result<Vec<CaptureSource>> {
        let screens = Screen::all()
            .map_err(|e| AppError::capture(format!("Failed to enumerate screens: {}", e)))?;

        if screens.is_empty() {
            return Err(AppError::capture("No screens detected"));
        }

        Ok(screens
            .iter()
            .enumerate()
            .map(|(i, s)| CaptureSource {
                id: s.display_info.id,
                name: format!("Screen {}", i),
                width: s.display_info.width,
                height: s.display_info.height,
                is_primary: s.display_info.is_primary,
            })
            .collect())
    }
}

/// An encoded PNG screenshot, created once per capture and consumed
/// exactly once by the persistence stage.
#[derive(Debug)]
pub struct ScreenshotPayload {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl ScreenshotPayload {
    /// Encodes a raster image as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Image`] if PNG encoding fails.
    pub fn encode(image: &DynamicImage) -> Result<Self> {
        let mut bytes: Vec<u8> = Vec::new();
        let mut cursor = Cursor::new(&mut bytes);

        image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| AppError::image(format!("Failed to encode image: {}", e)))?;

        Ok(Self {
            bytes,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Consumes the payload, yielding the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the encoded payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the encoded payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Grabs a single frame from a capture source and crops it to a selection.
///
/// The grab runs on a blocking task with a bounded wait; the captured
/// frame buffer is dropped on every exit path, so no capture resources
/// outlive a call to [`FrameGrabber::grab`].
pub struct FrameGrabber {
    timeout: Duration,
}

impl FrameGrabber {
    /// Creates a grabber with the default frame timeout.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_GRAB_TIMEOUT,
        }
    }

    /// Creates a grabber with a custom frame timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Captures one frame from the given source and crops it to `bounds`.
    ///
    /// The source is re-resolved against a fresh enumeration, the whole
    /// screen is captured at native resolution, and the sub-rectangle at
    /// `bounds` is cropped out and encoded as PNG. Bounds use naive pixel
    /// mapping with no DPI scaling.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`AppError::EmptySelection`] if `bounds` has zero area (before
    ///   or after clamping to the frame)
    /// - [`AppError::SourceNotFound`] if `source_id` no longer resolves
    /// - [`AppError::Timeout`] if the frame does not arrive in time
    /// - [`AppError::ScreenCapture`] if the capture itself fails
    pub async fn grab(&self, source_id: u32, bounds: Bounds) -> Result<ScreenshotPayload> {
        if bounds.is_empty() {
            return Err(AppError::EmptySelection);
        }

        let grab_task = tokio::task::spawn_blocking(move || capture_full_frame(source_id));

        let frame = tokio::time::timeout(self.timeout, grab_task)
            .await
            .map_err(|_| AppError::Timeout("first captured frame"))?
            .map_err(|e| AppError::capture(format!("Capture task failed: {}", e)))??;

        let clamped = bounds.clamp_to(frame.width(), frame.height());
        if clamped.is_empty() {
            return Err(AppError::EmptySelection);
        }

        log::debug!(
            "Cropping {}x{} frame to {:?}",
            frame.width(),
            frame.height(),
            clamped
        );

        let cropped = frame.crop_imm(clamped.x, clamped.y, clamped.width, clamped.height);
        ScreenshotPayload::encode(&cropped)
    }
}

impl Default for FrameGrabber {
    fn default() -> Self {
        Self::new()
    }
}

/// Captures a whole-screen frame from the source with the given id.
fn capture_full_frame(source_id: u32) -> Result<DynamicImage> {
    let screens = Screen::all()
        .map_err(|e| AppError::capture(format!("Failed to enumerate screens: {}", e)))?;

    let screen = screens
        .into_iter()
        .find(|s| s.display_info.id == source_id)
        .ok_or_else(|| AppError::SourceNotFound(source_id.to_string()))?;

    let captured = screen
        .capture()
        .map_err(|e| AppError::capture(format!("Failed to capture screen: {}", e)))?;

    let width = captured.width();
    let height = captured.height();
    let rgba_data = captured.into_raw();

    let img_buffer = image::ImageBuffer::from_raw(width, height, rgba_data)
        .ok_or_else(|| AppError::capture("Failed to create image buffer"))?;

    Ok(DynamicImage::ImageRgba8(img_buffer))
}
