//! Read-only public API for web resources.
//!
//! Only active web resources are served, and only to project members.

use axum::extract::State;
use axum::Json;
use webresources_core::access::{Operation, Surface};
use webresources_core::types::DbId;
use webresources_db::repositories::WebResourceRepo;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::handlers::{webresource_not_found, ProjectAccess};
use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;
use crate::views::PublicWebResource;

/// GET /api/projects/{project_id}/webresources/
pub async fn list(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<Vec<PublicWebResource>>> {
    ProjectAccess::load(&state.pool, user.user_id(), project_id)
        .await?
        .authorize(Surface::Api, Operation::Read)?;

    let resources = WebResourceRepo::list_active_by_project(&state.pool, project_id).await?;
    Ok(Json(
        resources
            .iter()
            .map(|r| PublicWebResource::new(r, &state.config.media_url))
            .collect(),
    ))
}

/// GET /api/projects/{project_id}/webresources/{webresource_id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    AppPath((project_id, webresource_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<PublicWebResource>> {
    ProjectAccess::load(&state.pool, user.user_id(), project_id)
        .await?
        .authorize(Surface::Api, Operation::Read)?;

    let resource = WebResourceRepo::find_active(&state.pool, project_id, webresource_id)
        .await?
        .ok_or_else(|| webresource_not_found(webresource_id))?;
    Ok(Json(PublicWebResource::new(&resource, &state.config.media_url)))
}
