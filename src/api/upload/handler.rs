//! Image Upload Handler
//!
//! Validates incoming images (PNG, JPEG, WebP), recompresses them to JPEG
//! and forwards them to the external image host.

use std::io::Cursor;

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::common::{AppError, AppResult};
use crate::core::ServerState;
use crate::services::HostedImage;

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Maximum images per request
const MAX_FILES: usize = 5;

/// Request body budget: a full batch of maximum-size images plus
/// multipart framing. The framework enforces this; per-file limits
/// below produce the JSON error shape.
pub(super) const MAX_BODY_SIZE: usize = MAX_FILES * MAX_FILE_SIZE + 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for hosted images
const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
    pub original_name: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub images: Vec<UploadedImage>,
}

fn extension_of(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    if !SUPPORTED_FORMATS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    // Verify it's actually an image by trying to load it
    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({}): {}",
            ext, e
        )));
    }

    Ok(())
}

/// Recompress to JPEG
fn compress_image(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }

    Ok(buffer)
}

/// POST /api/upload/restaurant-images - multipart upload, up to 5 images
pub async fn restaurant_images(
    State(state): State<ServerState>,
    _user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let host = state
        .images
        .clone()
        .ok_or_else(|| AppError::internal("Image hosting is not configured"))?;

    let mut uploaded = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let original_name = field.file_name().unwrap_or("image").to_string();
        let ext = extension_of(&original_name);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
            .to_vec();

        if data.is_empty() {
            continue;
        }
        if uploaded.len() >= MAX_FILES {
            return Err(AppError::validation(format!(
                "Too many files. Maximum is {} per request",
                MAX_FILES
            )));
        }

        validate_image(&data, &ext)?;
        let jpeg = compress_image(&data)?;

        let filename = format!("{}.jpg", Uuid::new_v4().simple());
        let HostedImage { url, public_id } = host.upload(&filename, jpeg).await?;

        uploaded.push(UploadedImage {
            url,
            public_id,
            original_name,
        });
    }

    if uploaded.is_empty() {
        return Err(AppError::validation("No image files in request"));
    }

    Ok(Json(UploadResponse { images: uploaded }))
}
