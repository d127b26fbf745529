//! Handlers for screens: upload-and-analyze, listing, detail and export.

use std::path::Path as FsPath;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use designsight_core::error::CoreError;
use designsight_core::types::DbId;
use designsight_core::upload::{image_url, stored_filename, validate_upload_size};
use designsight_db::models::screen::CreateScreen;
use designsight_db::repositories::{ProjectRepo, ScreenRepo};

use crate::error::{AppError, AppResult};
use crate::query::RoleParams;
use crate::response::{ScreenExport, ScreenListResponse, ScreenResponse, UploadResponse};
use crate::state::AppState;

/// Multipart field carrying the screenshot.
const IMAGE_FIELD: &str = "image";

const UPLOAD_SUCCESS_MESSAGE: &str = "Image uploaded & analyzed successfully!";

/// An uploaded file read fully into memory.
struct UploadedImage {
    file_name: String,
    bytes: Vec<u8>,
}

/// Read the `image` field from a multipart body. Other fields are skipped.
async fn read_image_field(multipart: &mut Multipart) -> AppResult<Option<UploadedImage>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read uploaded file: {e}")))?;
        return Ok(Some(UploadedImage {
            file_name,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

/// Write `bytes` to `dir/file_name`, creating `dir` if needed.
async fn store_file(dir: &FsPath, file_name: &str, bytes: &[u8]) -> AppResult<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(dir.join(file_name), bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))
}

/// POST /api/projects/{project_id}/screens
///
/// Stores the file, runs vision normalization and then suggestion synthesis,
/// and persists the screen with both arrays. AI failures degrade to fallback
/// feedback; only storage failures surface as errors. A file written before
/// a later failure is left in place.
pub async fn upload(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let upload = read_image_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file uploaded.".into()))?;
    validate_upload_size(upload.bytes.len(), state.config.max_upload_bytes)?;

    if !ProjectRepo::exists(&state.pool, project_id).await? {
        return Err(CoreError::not_found("Project", project_id).into());
    }

    let file_name = stored_filename(Utc::now().timestamp_millis(), &upload.file_name);
    store_file(&state.config.upload_dir, &file_name, &upload.bytes).await?;
    tracing::info!(project_id, file = %file_name, size = upload.bytes.len(), "Screenshot stored");

    let analysis = state.analyzer.analyze(&upload.bytes).await;

    let screen = ScreenRepo::create(
        &state.pool,
        &CreateScreen {
            project_id,
            image_url: image_url(&file_name),
            feedback_items: analysis.feedback,
            gemini_suggestions: analysis.suggestions,
        },
    )
    .await?;
    tracing::info!(project_id, screen_id = screen.id, "Screen created");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: UPLOAD_SUCCESS_MESSAGE,
            feedback: screen.feedback_items.0.clone(),
            gemini_suggestions: screen.gemini_suggestions.0.clone(),
            screen,
        }),
    ))
}

/// GET /api/projects/{project_id}/screens
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ScreenListResponse>> {
    let screens = ScreenRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(ScreenListResponse { screens }))
}

/// GET /api/projects/{project_id}/screens/{screen_id}?role=
pub async fn get_for_project(
    State(state): State<AppState>,
    Path((project_id, screen_id)): Path<(DbId, DbId)>,
    Query(params): Query<RoleParams>,
) -> AppResult<Json<ScreenResponse>> {
    let role = params.parse()?;
    let screen = ScreenRepo::find_for_project(&state.pool, project_id, screen_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Screen", screen_id))?;

    let screen = match role {
        Some(role) => screen.for_role(role),
        None => screen,
    };
    Ok(Json(ScreenResponse { screen }))
}

/// GET /api/screens/{screen_id}/export?role=
pub async fn export(
    State(state): State<AppState>,
    Path(screen_id): Path<DbId>,
    Query(params): Query<RoleParams>,
) -> AppResult<Json<ScreenExport>> {
    let role = params.parse()?;
    let screen = ScreenRepo::find_by_id(&state.pool, screen_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Screen", screen_id))?;

    let screen = match role {
        Some(role) => screen.for_role(role),
        None => screen,
    };
    tracing::debug!(screen_id, role = ?role, "Screen exported");
    Ok(Json(ScreenExport::new(screen, role, Utc::now())))
}
