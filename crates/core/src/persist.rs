//! Local screenshot persistence.
//!
//! Writes encoded payloads to disk under a timestamped name. The write is
//! atomic from a reader's point of view: bytes go to a temporary sibling
//! file which is then renamed into place, so no reader ever observes a
//! partial screenshot.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::capture::ScreenshotPayload;
use crate::error::{AppError, Result};

/// A screenshot that has been written to disk.
///
/// The file's lifecycle ends only on explicit external deletion; this
/// system never removes persisted screenshots.
#[derive(Debug, Clone)]
pub struct PersistedScreenshot {
    pub path: PathBuf,
    pub captured_at_millis: u64,
}

/// Writes screenshot payloads to a configured directory.
pub struct ScreenshotPersister {
    directory: PathBuf,
    on_saved: Option<Sender<PathBuf>>,
}

impl ScreenshotPersister {
    /// Creates a persister targeting the given directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            on_saved: None,
        }
    }

    /// Attaches a channel notified with each newly saved path.
    ///
    /// The notification is fire-and-forget: a dropped or busy receiver
    /// never blocks or fails the persistence step.
    pub fn with_notifier(mut self, on_saved: Sender<PathBuf>) -> Self {
        self.on_saved = Some(on_saved);
        self
    }

    /// Writes the payload as `screenshot-<unix-millis>.png`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] with the destination path and the
    /// underlying I/O reason (permissions, disk full, missing directory).
    pub async fn persist(&self, payload: ScreenshotPayload) -> Result<PersistedScreenshot> {
        let captured_at_millis = unix_millis();
        let file_name = format!("screenshot-{}.png", captured_at_millis);
        let path = self.directory.join(&file_name);
        let tmp_path = self.directory.join(format!("{}.tmp", file_name));

        let bytes = payload.into_bytes();

        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|source| AppError::Persistence {
                path: path.clone(),
                source,
            })?;

        if let Err(source) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(AppError::Persistence { path, source });
        }

        log::info!("Saved screenshot to {}", path.display());
        self.notify_saved(&path);

        Ok(PersistedScreenshot {
            path,
            captured_at_millis,
        })
    }

    fn notify_saved(&self, path: &Path) {
        if let Some(tx) = &self.on_saved {
            let _ = tx.send(path.to_path_buf());
        }
    }
}

/// Milliseconds since the Unix epoch.
fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
