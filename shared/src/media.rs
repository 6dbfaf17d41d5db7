use std::env;

use log::{error, info};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_FOLDER: &str = "pinkcart";

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("image host is not configured: {0}")]
    Config(String),

    #[error("failed to reach image host: {0}")]
    Request(String),

    #[error("image host error: {status} - {body}")]
    Host { status: u16, body: String },

    #[error("failed to parse image host response: {0}")]
    Parse(String),
}

/// Stable URL plus the opaque identifier needed to delete the image later.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredImage {
    pub url: String,
    #[serde(rename = "publicId")]
    pub image_id: String,
}

/// Client for the external image host. Credentials come from the environment
/// (`IMAGE_HOST_URL`, `IMAGE_HOST_KEY`).
pub struct ImageHost {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ImageHost {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_env() -> Result<Self, MediaError> {
        let base_url = env::var("IMAGE_HOST_URL")
            .map_err(|_| MediaError::Config("IMAGE_HOST_URL environment variable not set".into()))?;
        let api_key = env::var("IMAGE_HOST_KEY")
            .map_err(|_| MediaError::Config("IMAGE_HOST_KEY environment variable not set".into()))?;
        Ok(Self::new(base_url, api_key))
    }

    /// Uploads an image and returns its public URL and storage identifier.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: &str,
    ) -> Result<StoredImage, MediaError> {
        info!(
            "Uploading {} bytes to image host folder '{}'",
            bytes.len(),
            folder
        );

        let part = Part::bytes(bytes)
            .file_name("upload")
            .mime_str(content_type)
            .map_err(|e| MediaError::Request(format!("invalid content type: {}", e)))?;
        let form = Form::new().part("image", part).text("folder", folder.to_string());

        let response = self
            .client
            .post(format!("{}/images", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Image upload request failed: {}", e);
                MediaError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Image host returned error status {}: {}", status, body);
            return Err(MediaError::Host {
                status: status.as_u16(),
                body,
            });
        }

        let stored: StoredImage = response.json().await.map_err(|e| {
            error!("Failed to parse image host response: {}", e);
            MediaError::Parse(e.to_string())
        })?;

        info!("Upload successful: {}", stored.url);
        Ok(stored)
    }

    /// Deletes a previously uploaded image by its storage identifier.
    pub async fn delete(&self, image_id: &str) -> Result<(), MediaError> {
        let response = self
            .client
            .delete(format!("{}/images/{}", self.base_url, image_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                error!("Image delete request failed: {}", e);
                MediaError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Image host returned error status {}: {}", status, body);
            return Err(MediaError::Host {
                status: status.as_u16(),
                body,
            });
        }

        info!("Deleted image {}", image_id);
        Ok(())
    }
}
