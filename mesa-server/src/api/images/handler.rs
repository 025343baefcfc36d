//! Image Handlers
//!
//! Serves blobs through short-lived signed URLs and hosts the shared
//! multipart/validation helpers used by the product and category
//! image-attach routes.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum image size (2MB)
pub(crate) const MAX_IMAGE_SIZE: usize = 2 * 1024 * 1024;

/// Supported image formats
pub(crate) const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// One uploaded image: original filename plus raw bytes
pub(crate) struct UploadedImage {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Pull the `file` field out of a multipart request
pub(crate) async fn read_image_field(mut multipart: Multipart) -> AppResult<UploadedImage> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .ok_or_else(|| AppError::Validation("No filename provided in file field".into()))?;
            let data = field.bytes().await?.to_vec();
            return Ok(UploadedImage { filename, data });
        }
    }
    Err(AppError::Validation(
        "No 'file' field found. Field name must be 'file'".into(),
    ))
}

/// Validate size, extension, and that the bytes decode as an image
pub(crate) fn validate_image(upload: &UploadedImage) -> AppResult<()> {
    if upload.data.is_empty() {
        return Err(AppError::Validation("Empty file provided".into()));
    }
    if upload.data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::Validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }

    let ext = std::path::Path::new(&upload.filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            AppError::Validation(format!("Invalid file extension for: {}", upload.filename))
        })?;
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    if let Err(e) = image::load_from_memory(&upload.data) {
        return Err(AppError::Validation(format!("Invalid image file ({ext}): {e}")));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct SignedQuery {
    pub expires: i64,
    pub sig: String,
}

/// GET /api/images/*key?expires=&sig= - 读取签名图片
pub async fn serve(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Query(query): Query<SignedQuery>,
) -> AppResult<impl IntoResponse> {
    if !state.blobs.verify(&key, query.expires, &query.sig) {
        return Err(AppError::Validation("Signature invalid or expired".into()));
    }
    let bytes = state.blobs.get(&key)?;

    let mime = mime_guess::from_path(&key).first_or_octet_stream();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime.as_ref())
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    Ok((StatusCode::OK, headers, bytes))
}
