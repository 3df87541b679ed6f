//! AJAX endpoints used by the admin pages.
//!
//! Callers who are not project administrators get 404, so the endpoints do
//! not reveal which projects exist. Request bodies are only looked at once
//! the caller is authorized.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use webresources_core::access::{Operation, Surface};
use webresources_core::data_format::DataFormat;
use webresources_core::error::CoreError;
use webresources_core::status::WebResourceStatus;
use webresources_core::types::DbId;
use webresources_core::webresource::validate_url;
use webresources_db::repositories::WebResourceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::{webresource_not_found, ProjectAccess};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::url_check::check_url;
use crate::views::AdminWebResource;

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    /// Web resource ids in their new display order.
    pub order: Vec<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckUrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CheckUrlResponse {
    pub data_format: DataFormat,
}

/// POST /ajax/projects/{project_id}/webresources/reorder/
pub async fn reorder(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    AppPath(project_id): AppPath<DbId>,
    body: Result<AppJson<ReorderRequest>, AppError>,
) -> AppResult<Json<DataResponse<Vec<AdminWebResource>>>> {
    ProjectAccess::load(&state.pool, user.user_id(), project_id)
        .await?
        .authorize(Surface::Ajax, Operation::Write)?;
    let AppJson(input) = body?;

    let resources = WebResourceRepo::reorder(&state.pool, project_id, &input.order).await?;
    tracing::info!(
        project_id,
        user_id = user.user_id(),
        count = input.order.len(),
        "Web resources reordered",
    );

    Ok(Json(DataResponse {
        data: AdminWebResource::list(&resources, &state.config.media_url),
    }))
}

/// PUT /ajax/projects/{project_id}/webresources/{webresource_id}/
///
/// Switches a web resource between `active` and `inactive`.
pub async fn update_status(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    AppPath((project_id, webresource_id)): AppPath<(DbId, DbId)>,
    body: Result<AppJson<StatusRequest>, AppError>,
) -> AppResult<Json<DataResponse<AdminWebResource>>> {
    ProjectAccess::load(&state.pool, user.user_id(), project_id)
        .await?
        .authorize(Surface::Ajax, Operation::Write)?;
    let AppJson(input) = body?;

    let status = WebResourceStatus::parse_toggle(&input.status)?;
    let resource = WebResourceRepo::set_status(&state.pool, project_id, webresource_id, status)
        .await?
        .ok_or_else(|| webresource_not_found(webresource_id))?;

    tracing::info!(
        project_id,
        webresource_id,
        user_id = user.user_id(),
        status = %status,
        "Web resource status changed",
    );

    Ok(Json(DataResponse {
        data: AdminWebResource::new(&resource, &state.config.media_url),
    }))
}

/// POST /ajax/webresources/check-url/
///
/// Probes the URL and reports the data format it serves.
pub async fn check_url_format(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CheckUrlRequest>,
) -> AppResult<Json<DataResponse<CheckUrlResponse>>> {
    let url = validate_url(&input.url).map_err(|msg| CoreError::field("url", msg))?;

    let data_format = check_url(&state.http, &url)
        .await
        .map_err(CoreError::RemoteFetch)?;
    tracing::debug!(user_id = user.user_id, url = %url, %data_format, "URL checked");

    Ok(Json(DataResponse {
        data: CheckUrlResponse { data_format },
    }))
}
