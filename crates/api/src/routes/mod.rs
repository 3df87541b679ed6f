pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, ajax, public};
use crate::state::AppState;

/// Administrator pages.
///
/// ```text
/// GET        /admin/webresources/                                      -> index
/// GET        /admin/projects/{project_id}/webresources/                -> all_webresources
/// GET, POST  /admin/projects/{project_id}/webresources/add/            -> add_form, create
/// GET, POST  /admin/projects/{project_id}/webresources/{id}/           -> single_webresource, update
/// GET        /admin/projects/{project_id}/webresources/{id}/remove/    -> remove
/// ```
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/webresources/", get(admin::index))
        .route(
            "/admin/projects/{project_id}/webresources/",
            get(admin::all_webresources),
        )
        .route(
            "/admin/projects/{project_id}/webresources/add/",
            get(admin::add_form).post(admin::create),
        )
        .route(
            "/admin/projects/{project_id}/webresources/{webresource_id}/",
            get(admin::single_webresource).post(admin::update),
        )
        .route(
            "/admin/projects/{project_id}/webresources/{webresource_id}/remove/",
            get(admin::remove),
        )
}

/// AJAX endpoints backing the admin pages.
///
/// ```text
/// POST  /ajax/projects/{project_id}/webresources/reorder/   -> reorder
/// PUT   /ajax/projects/{project_id}/webresources/{id}/      -> update_status
/// POST  /ajax/webresources/check-url/                       -> check_url_format
/// ```
pub fn ajax_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ajax/projects/{project_id}/webresources/reorder/",
            post(ajax::reorder),
        )
        .route(
            "/ajax/projects/{project_id}/webresources/{webresource_id}/",
            put(ajax::update_status),
        )
        .route("/ajax/webresources/check-url/", post(ajax::check_url_format))
}

/// Public read API.
///
/// ```text
/// GET  /api/projects/{project_id}/webresources/        -> list
/// GET  /api/projects/{project_id}/webresources/{id}/   -> get_by_id
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects/{project_id}/webresources/", get(public::list))
        .route(
            "/api/projects/{project_id}/webresources/{webresource_id}/",
            get(public::get_by_id),
        )
}
