//! Handlers for the `/projects` resource.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use designsight_core::error::CoreError;
use designsight_core::types::DbId;
use designsight_db::models::project::{CreateProject, Project};
use designsight_db::repositories::project_repo::UNIQUE_NAME_CONSTRAINT;
use designsight_db::repositories::ProjectRepo;
use serde::Deserialize;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::state::AppState;

const NAME_REQUIRED: &str = "Name is required";
const NAME_EXISTS: &str = "Project name exists";

#[derive(Debug, Default, Deserialize)]
struct ProjectNameBody {
    #[serde(default)]
    name: Option<String>,
}

/// Extract the project name from a JSON `{ "name": ... }` body or a `text/*`
/// body holding the bare name. Any other content type carries no name. The
/// result is trimmed and non-empty.
fn project_name(headers: &HeaderMap, body: &[u8]) -> Result<String, CoreError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let raw = if content_type.starts_with("application/json") {
        serde_json::from_slice::<ProjectNameBody>(body)
            .ok()
            .and_then(|b| b.name)
    } else if content_type.starts_with("text/") {
        std::str::from_utf8(body).ok().map(str::to_string)
    } else {
        None
    };

    raw.map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CoreError::Validation(NAME_REQUIRED.into()))
}

/// POST /api/projects
///
/// Accepts `application/json` `{ "name": ... }` or a `text/*` body holding
/// the name.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Project>)> {
    let name = project_name(&headers, &body)?;

    if ProjectRepo::find_by_name(&state.pool, &name).await?.is_some() {
        return Err(AppError::BadRequest(NAME_EXISTS.into()));
    }

    let project = ProjectRepo::create(&state.pool, &CreateProject { name })
        .await
        .map_err(|e| {
            if is_unique_violation(&e, UNIQUE_NAME_CONSTRAINT) {
                AppError::BadRequest(NAME_EXISTS.into())
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(project_id = project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{project_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id))?;
    Ok(Json(project))
}
