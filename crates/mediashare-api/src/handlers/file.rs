//! Upload, download and delete handlers.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::info;

use mediashare_core::error::AppError;
use mediashare_storage::StoreOutcome;

use crate::error::ApiError;
use crate::extractors::{AdminUser, AuthUser};
use crate::handlers::redirect_to_referrer;
use crate::state::AppState;

/// POST /upload: multipart field `file`, administrator only
pub async fn upload_file(
    State(state): State<AppState>,
    admin: AdminUser,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
        upload = Some((file_name, data));
        break;
    }

    let Some((file_name, data)) = upload else {
        return Ok((StatusCode::OK, "No file selected").into_response());
    };

    if !file_name.is_empty() {
        if let StoreOutcome::Stored(name) = state.files.store(&file_name, data).await? {
            info!(user = %admin.username, name = %name, "Upload accepted");
        }
    }

    Ok(redirect_to_referrer(&headers).into_response())
}

/// GET /uploads/{filename}
pub async fn download_file(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let file = state.files.retrieve(&filename).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_LENGTH, file.size_bytes)
        .body(Body::from_stream(file.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// POST /delete/{filename}: administrator only
pub async fn delete_file(
    State(state): State<AppState>,
    admin: AdminUser,
    headers: HeaderMap,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    state.files.delete(&filename).await?;
    info!(user = %admin.username, filename = %filename, "Delete requested");
    Ok(redirect_to_referrer(&headers).into_response())
}
