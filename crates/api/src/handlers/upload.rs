//! Handler for image uploads.
//!
//! Checks run in a fixed order and each failure is a 400 before anything
//! touches the filesystem: field presence, declared MIME type, size, then
//! the file's magic bytes.

use std::io::ErrorKind;
use std::path::Path;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use jambakan_core::error::CoreError;
use jambakan_core::upload::{
    public_url, stored_file_name, validate_declared, verify_content, ImageKind, MSG_NO_FILE,
    MSG_TOO_LARGE,
};
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Attempts at finding a free file name before giving up.
const MAX_NAME_ATTEMPTS: i64 = 16;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    /// Relative URL the stored file is served from.
    pub image_url: String,
    pub file_name: String,
}

struct UploadedFile {
    original_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::Validation(MSG_TOO_LARGE.into()))
    } else {
        AppError::BadRequest(e.body_text())
    }
}

/// POST /api/v1/upload
///
/// Accepts a multipart form with a `file` field holding a JPEG, PNG, GIF or
/// WebP image of at most 2 MiB.
pub async fn upload_image(
    admin: AuthAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) || file.is_some() {
            continue;
        }
        let original_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        file = Some(UploadedFile {
            original_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let file = file.ok_or_else(|| AppError::Core(CoreError::Validation(MSG_NO_FILE.into())))?;

    let declared = validate_declared(file.content_type.as_deref(), file.bytes.len())?;
    let kind = verify_content(declared, &file.bytes)?;

    let file_name = write_unique(
        &state.config.upload.dir,
        &state.config.upload.prefix,
        file.original_name.as_deref(),
        kind,
        &file.bytes,
    )
    .await?;

    tracing::info!(
        file_name = %file_name,
        size = file.bytes.len(),
        user_id = admin.user_id,
        "Image uploaded",
    );

    Ok(Json(UploadResponse {
        success: true,
        image_url: public_url(&file_name),
        file_name,
    }))
}

/// Write `bytes` under a fresh `{prefix}_{millis}.{ext}` name in `dir`.
///
/// The destination is created with `create_new`, so two uploads landing on
/// the same millisecond get consecutive timestamps instead of overwriting.
async fn write_unique(
    dir: &Path,
    prefix: &str,
    original_name: Option<&str>,
    kind: ImageKind,
    bytes: &[u8],
) -> AppResult<String> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let base_millis = Utc::now().timestamp_millis();
    for offset in 0..MAX_NAME_ATTEMPTS {
        let file_name = stored_file_name(prefix, original_name, base_millis + offset, kind);
        let path = dir.join(&file_name);
        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;

        let out = match opened {
            Ok(out) => out,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(AppError::InternalError(format!(
                    "Failed to create {file_name}: {e}"
                )))
            }
        };

        write_or_discard(out, &path, bytes).await?;
        return Ok(file_name);
    }

    Err(AppError::InternalError(
        "No free upload file name available".into(),
    ))
}

/// Write and flush `bytes` to the freshly created `path`. On failure the
/// partial file is removed so it is never served.
async fn write_or_discard<W>(mut out: W, path: &Path, bytes: &[u8]) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match out.write_all(bytes).await {
        Ok(()) => out.flush().await,
        Err(e) => Err(e),
    };
    drop(out);

    if let Err(e) = written {
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %remove_err,
                "Failed to remove partial upload",
            );
        }
        return Err(AppError::InternalError(format!(
            "Failed to write {}: {e}",
            path.display()
        )));
    }
    Ok(())
}
