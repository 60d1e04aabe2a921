//! Persisted application settings.
//!
//! Settings are one flat record holding the WordPress endpoint, its
//! credentials, and the local save directory. The record is stored as
//! JSON in the user's config directory (e.g.
//! `~/.config/snappress/settings.json` on Linux) and rewritten wholesale
//! on every save.

use std::fs;
use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The persisted settings record.
///
/// A workflow reads the record once at its start and never mutates it
/// mid-flight; edits go through load-modify-save.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the WordPress site (e.g. `https://blog.example.com`).
    #[serde(default)]
    pub wordpress_url: String,
    /// WordPress user name for Basic authentication.
    #[serde(default)]
    pub wordpress_username: String,
    /// WordPress application password for Basic authentication.
    #[serde(default)]
    pub wordpress_password: String,
    /// Directory screenshots are saved to. Defaults to the platform's
    /// pictures directory when unset.
    #[serde(default)]
    pub save_directory: Option<PathBuf>,
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Creates the config directory if it doesn't exist.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "snappress", "snappress").map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("settings.json")
        })
    }

    /// Loads settings from disk, falling back to defaults if not found
    /// or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Loads settings from an explicit path, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Persists the whole record to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Persists the whole record to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// The directory screenshots are written to.
    ///
    /// Falls back to the platform pictures directory, then to the
    /// current directory if the platform reports none.
    pub fn resolved_save_directory(&self) -> PathBuf {
        self.save_directory.clone().unwrap_or_else(|| {
            UserDirs::new()
                .and_then(|dirs| dirs.picture_dir().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    /// Whether the remote endpoint and both credentials are configured.
    pub fn has_remote_configuration(&self) -> bool {
        !self.wordpress_url.is_empty()
            && !self.wordpress_username.is_empty()
            && !self.wordpress_password.is_empty()
    }

    /// The WordPress media-library URL for the configured site, if any.
    pub fn media_library_url(&self) -> Option<String> {
        if self.wordpress_url.is_empty() {
            None
        } else {
            Some(format!(
                "{}/wp-admin/upload.php?mode=grid",
                self.wordpress_url.trim_end_matches('/')
            ))
        }
    }
}
