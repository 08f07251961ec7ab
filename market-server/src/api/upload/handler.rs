//! Image Upload Handler
//!
//! Handles image uploads from authenticated users.
//! Supports multiple image formats (PNG, JPEG, WebP) and converts to JPG.
//! The public URL is generated once here and stored on the media row; read
//! paths never reconstruct it.

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::PathBuf;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::media;
use crate::utils::{AppError, ErrorCode};
use shared::models::{Media, MediaCreate};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored images (85% keeps gallery photos presentable
/// while controlling file size)
const JPEG_QUALITY: u8 = 85;

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Re-encode as JPEG with the standard quality setting
fn compress_image(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img.write_with_encoder(encoder).map_err(|e| {
            AppError::with_message(
                ErrorCode::ImageProcessingFailed,
                format!("Failed to compress image: {e}"),
            )
        })?;
    }

    Ok(buffer)
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            ),
        ));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext_lower,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    // Verify it's actually an image by trying to load it
    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::with_message(
            ErrorCode::InvalidImageFile,
            format!("Invalid image file ({}): {}", ext_lower, e),
        ));
    }

    Ok(())
}

/// POST /api/upload - 上传图片
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<Json<Media>, AppError> {
    let images_dir = state.config.images_dir();
    tokio::fs::create_dir_all(&images_dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create images directory: {e}")))?;

    // Find the file field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        let name = f.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(
                f.bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    let filename = original_filename.ok_or_else(|| AppError::new(ErrorCode::NoFilename))?;

    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidFileExtension,
                format!("Invalid file extension for: {filename}"),
            )
        })?;

    validate_image(&data, &ext)?;

    let compressed_data = compress_image(&data)?;
    let file_hash = calculate_hash(&compressed_data);

    // Duplicate content: return the existing media row, no second file
    if let Some(existing) = media::find_by_hash(&state.pool, &file_hash).await? {
        tracing::info!(
            original_name = %filename,
            existing_file = %existing.file_name,
            "Duplicate image detected, returning existing media"
        );
        return Ok(Json(existing));
    }

    let file_id = Uuid::new_v4().to_string();
    let new_filename = format!("{file_id}.jpg");
    let file_path = images_dir.join(&new_filename);

    tokio::fs::write(&file_path, &compressed_data)
        .await
        .map_err(|e| {
            AppError::with_message(ErrorCode::FileStorageFailed, format!("Failed to save file: {e}"))
        })?;

    // Canonical URL, stored once at upload time
    let url = format!("/api/image/{new_filename}");
    let created = media::create(
        &state.pool,
        MediaCreate {
            file_name: new_filename.clone(),
            hash: file_hash.clone(),
            size: compressed_data.len() as i64,
            format: "jpg".to_string(),
            url,
        },
    )
    .await?;

    tracing::info!(
        original_name = %filename,
        file_name = %new_filename,
        size = compressed_data.len(),
        hash = %file_hash,
        "Image uploaded successfully"
    );

    Ok(Json(created))
}

/// GET /api/image/:file_name - 读取已存储的图片
///
/// Only file names that exist in the media table are served, so the path
/// segment can never escape the images directory.
pub async fn serve_image(
    State(state): State<ServerState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = media::find_by_file_name(&state.pool, &file_name)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MediaNotFound))?;

    let file_path = state.config.images_dir().join(&record.file_name);
    let bytes = tokio::fs::read(&file_path).await.map_err(|e| {
        tracing::error!(file_name = %record.file_name, error = %e, "Stored image missing on disk");
        AppError::new(ErrorCode::MediaNotFound)
    })?;

    let content_type = mime_guess::from_path(&record.file_name)
        .first_or_octet_stream()
        .to_string();

    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}
