//! Image host client.
//!
//! Uploads processed images to the external host and deletes them again
//! when their owning document goes away. The host is optional at deploy
//! time; upload endpoints fail when it is not configured.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::common::{AppError, AppResult};
use crate::core::config::ImageHostConfig;

/// An image stored at the host.
#[derive(Debug, Clone, Deserialize)]
pub struct HostedImage {
    #[serde(alias = "secure_url")]
    pub url: String,
    pub public_id: String,
}

pub struct ImageHost {
    config: ImageHostConfig,
    client: Client,
}

impl ImageHost {
    pub fn new(config: ImageHostConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Upload one JPEG image, returning its hosted URL and public id.
    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> AppResult<HostedImage> {
        debug!("Uploading {} ({} bytes) to image host", filename, data.len());

        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str("image/jpeg")
            .map_err(|e| AppError::internal(format!("Invalid upload part: {}", e)))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.config.url))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Image host unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Image host returned {}",
                response.status()
            )));
        }

        response
            .json::<HostedImage>()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid image host response: {}", e)))
    }

    /// Delete a previously uploaded image. Best effort at call sites.
    pub async fn delete(&self, public_id: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(format!("{}/images/{}", self.config.url, public_id))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Image host unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Image host returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
