//! SnapPress Core Library
//!
//! This library provides the core functionality for the SnapPress
//! screenshot tool: interactive region selection, single-frame screen
//! capture, local persistence, and publishing to a WordPress media
//! library.
//!
//! # Overview
//!
//! One capture workflow is a strict chain: the user drags out a region
//! on a fullscreen overlay, a single frame of the chosen screen is
//! grabbed and cropped to that region, the PNG is written to disk under
//! a timestamped name, and the file is uploaded to WordPress; the
//! resulting public URL goes to the caller (typically the clipboard).
//!
//! - **Region selection**: transparent overlay via the [`ui`] module
//! - **Screen capture**: source enumeration and frame grabbing via [`capture`]
//! - **Persistence**: atomic timestamped writes via [`persist`]
//! - **Publishing**: the three-step WordPress sequence via [`publisher`]
//! - **Settings**: the persisted endpoint/credential record via [`settings`]
//!
//! # Quick Start
//!
//! The simplest way to use the library is through the [`SnapPress`] facade:
//!
//! ```ignore
//! use snappress_core::SnapPress;
//!
//! let app = SnapPress::new();
//!
//! match app.capture_and_publish().await? {
//!     Some(report) => println!("{}", report.media_url),
//!     None => println!("cancelled"),
//! }
//! ```

pub mod bounds;
pub mod capture;
pub mod error;
pub mod persist;
pub mod publisher;
pub mod settings;
pub mod ui;

// Re-export primary types for convenience
pub use bounds::Bounds;
pub use capture::{CaptureSource, CaptureSourceProvider, FrameGrabber, ScreenshotPayload};
pub use error::{AppError, Result};
pub use persist::{PersistedScreenshot, ScreenshotPersister};
pub use publisher::{UploadOutcome, WordPressClient};
pub use settings::Settings;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

/// The result of one completed capture workflow.
#[derive(Debug, Clone)]
pub struct CaptureReport {
    /// The screenshot as written to disk.
    pub screenshot: PersistedScreenshot,
    /// Public URL of the uploaded media.
    pub media_url: String,
    /// Soft-degrade note from the publish step, if any.
    pub warning: Option<String>,
}

/// Main entry point for the SnapPress application.
///
/// The facade owns the settings record and the single-flight capture
/// guard, and orchestrates the workflow end to end. Settings are read
/// once at the start of each workflow and never mutated mid-flight.
pub struct SnapPress {
    settings: Settings,
    capture_in_flight: AtomicBool,
    on_saved: Option<Sender<PathBuf>>,
}

impl SnapPress {
    /// Creates an instance with settings loaded from disk.
    pub fn new() -> Self {
        Self::with_settings(Settings::load())
    }

    /// Creates an instance with explicit settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            capture_in_flight: AtomicBool::new(false),
            on_saved: None,
        }
    }

    /// Attaches a channel notified with each newly saved screenshot path
    /// (e.g. for a capture-history display). Fire-and-forget; a dropped
    /// receiver never stalls the workflow.
    pub fn with_save_notifier(mut self, on_saved: Sender<PathBuf>) -> Self {
        self.on_saved = Some(on_saved);
        self
    }

    /// Returns a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Lists the capturable screens.
    ///
    /// The returned source ids are only valid until the next capture;
    /// sources are re-enumerated per workflow rather than cached.
    pub fn list_sources(&self) -> Result<Vec<CaptureSource>> {
        CaptureSourceProvider::enumerate()
    }

    /// Runs one complete capture workflow: select, grab, persist,
    /// publish.
    ///
    /// Returns `Ok(None)` when the user cancels the selection (Escape or
    /// a zero-area drag). Only the selection stage is cancellable; from
    /// the frame grab onward the workflow runs to completion or failure.
    ///
    /// # Errors
    ///
    /// - [`AppError::CaptureInProgress`] if another workflow is running
    /// - [`AppError::ScreenCapture`] / [`AppError::Timeout`] from the grab
    /// - [`AppError::Persistence`] if the local write fails (the upload
    ///   is then never attempted)
    /// - [`AppError::Config`] / [`AppError::Transport`] /
    ///   [`AppError::Api`] from the publish step; the screenshot stays
    ///   on disk in that case
    pub async fn capture_and_publish(&self) -> Result<Option<CaptureReport>> {
        let _guard = self.begin_workflow()?;
        let settings = self.settings.clone();

        let Some(bounds) = ui::run_region_selector()? else {
            log::info!("Selection cancelled");
            return Ok(None);
        };

        let sources = CaptureSourceProvider::enumerate()?;
        let source = sources
            .iter()
            .find(|s| s.is_primary)
            .or_else(|| sources.first())
            .ok_or_else(|| AppError::capture("No screens detected"))?;

        let payload = FrameGrabber::new().grab(source.id, bounds).await?;

        let mut persister = ScreenshotPersister::new(settings.resolved_save_directory());
        if let Some(tx) = &self.on_saved {
            persister = persister.with_notifier(tx.clone());
        }
        let screenshot = persister.persist(payload).await?;

        let outcome = self.publish_file(&screenshot.path).await?;

        Ok(Some(CaptureReport {
            screenshot,
            media_url: outcome.media_url,
            warning: outcome.warning,
        }))
    }

    /// Uploads an already-persisted file to WordPress.
    pub async fn publish_file(&self, path: &Path) -> Result<UploadOutcome> {
        let client = WordPressClient::from_settings(&self.settings)?;
        client.publish(path).await
    }

    /// Marks a workflow as in flight, rejecting concurrent starts.
    fn begin_workflow(&self) -> Result<WorkflowGuard<'_>> {
        if self
            .capture_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::CaptureInProgress);
        }
        Ok(WorkflowGuard {
            flag: &self.capture_in_flight,
        })
    }
}

impl Default for SnapPress {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the in-flight flag on every workflow exit path.
struct WorkflowGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for WorkflowGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
