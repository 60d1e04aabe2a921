//! WordPress media publishing.
//!
//! Uploads a persisted screenshot to the WordPress REST API in three
//! sequential steps: create the media item, look up the well-known
//! category, and tag the media with it. The upload itself is the
//! correctness requirement; categorization is best-effort, so once the
//! first step has succeeded the overall outcome is success even when
//! the category is missing or the tagging call fails (the warning field
//! records what was skipped).

use std::path::Path;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::settings::Settings;

/// The category slug screenshots are filed under.
pub const CATEGORY_SLUG: &str = "snappress";

/// Default timeout for HTTP requests (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response from media creation.
#[derive(Debug, Deserialize)]
struct MediaResponse {
    /// The numeric id of the created media item.
    id: u64,
    /// Public URL of the uploaded file.
    source_url: String,
}

/// One entry of the category lookup response.
#[derive(Debug, Deserialize)]
struct Category {
    id: u64,
}

/// Request body for tagging a media item.
#[derive(Debug, Serialize)]
struct CategorizeRequest {
    categories: Vec<u64>,
}

/// Outcome of a successful publish.
///
/// `warning` is set when the upload succeeded but categorization was
/// skipped or failed; it is never set alongside an error.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// Public URL of the uploaded media.
    pub media_url: String,
    /// Soft-degrade note, if categorization did not complete.
    pub warning: Option<String>,
}

/// Client for the WordPress REST API media endpoints.
pub struct WordPressClient {
    base_url: String,
    username: String,
    password: String,
    http_client: reqwest::Client,
}

impl WordPressClient {
    /// Creates a client from the persisted settings.
    ///
    /// # Errors
    ///
    /// Fails fast with [`AppError::Config`], before any network call, if
    /// the endpoint URL, user name, or password is missing.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_base_url(
            settings.wordpress_url.clone(),
            settings.wordpress_username.clone(),
            settings.wordpress_password.clone(),
        )
    }

    /// Creates a client against an explicit base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(base_url: String, username: String, password: String) -> Result<Self> {
        if base_url.is_empty() || username.is_empty() || password.is_empty() {
            return Err(AppError::config("WordPress settings are not configured"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
            http_client,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Uploads the file at `path` and files it under the snappress
    /// category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`] or [`AppError::Api`] if the media
    /// creation itself fails; category lookup and tagging failures
    /// degrade to a warning on the returned outcome instead.
    pub async fn publish(&self, path: &Path) -> Result<UploadOutcome> {
        let media = self.upload_media(path).await?;
        log::info!("Uploaded {} as media {}", path.display(), media.id);

        match self.categorize(media.id).await {
            Ok(true) => Ok(UploadOutcome {
                media_url: media.source_url,
                warning: None,
            }),
            Ok(false) => {
                log::warn!("{} category not found", CATEGORY_SLUG);
                Ok(UploadOutcome {
                    media_url: media.source_url,
                    warning: Some(format!("{} category not found", CATEGORY_SLUG)),
                })
            }
            Err(e) => {
                log::warn!("Upload succeeded but categorization failed: {}", e);
                Ok(UploadOutcome {
                    media_url: media.source_url,
                    warning: Some(format!("categorization failed: {}", e)),
                })
            }
        }
    }

    /// Step 1: multipart upload of the screenshot file.
    async fn upload_media(&self, path: &Path) -> Result<MediaResponse> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "screenshot.png".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/png")
            .map_err(|e| AppError::image(format!("Invalid media type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/wp-json/wp/v2/media", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.auth_header())
            .multipart(form)
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// Steps 2 and 3: resolve the category and tag the media with it.
    ///
    /// Returns `Ok(false)` when the category does not exist on the site.
    async fn categorize(&self, media_id: u64) -> Result<bool> {
        let Some(category_id) = self.find_category().await? else {
            return Ok(false);
        };
        self.assign_category(media_id, category_id).await?;
        log::info!("Filed media {} under category {}", media_id, category_id);
        Ok(true)
    }

    /// Step 2: look up the well-known category by slug.
    async fn find_category(&self) -> Result<Option<u64>> {
        let url = format!(
            "{}/wp-json/wp/v2/categories?slug={}",
            self.base_url, CATEGORY_SLUG
        );
        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let categories: Vec<Category> = Self::parse_json(response).await?;
        Ok(categories.first().map(|c| c.id))
    }

    /// Step 3: associate the media item with the category.
    async fn assign_category(&self, media_id: u64, category_id: u64) -> Result<()> {
        let url = format!("{}/wp-json/wp/v2/media/{}", self.base_url, media_id);
        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&CategorizeRequest {
                categories: vec![category_id],
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api { status, body });
        }
        Ok(())
    }

    /// Basic auth header value, encoded fresh per call.
    fn auth_header(&self) -> String {
        format!(
            "Basic {}",
            BASE64.encode(format!("{}:{}", self.username, self.password))
        )
    }

    /// Maps a non-success response to [`AppError::Api`], otherwise
    /// deserializes the body.
    async fn parse_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api { status, body });
        }
        Ok(response.json::<T>().await?)
    }
}
