//! Admin page responses.
//!
//! Admin pages are rendered by the host's templating layer; this service
//! answers with the page context as JSON. Problems a page is expected to
//! show (unknown project, missing rights, a locked project, form errors)
//! are part of the context and still answer 200. Anonymous visitors are
//! redirected to the login page.

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use webresources_core::access::{does_not_exist_msg, NO_RIGHTS_TO_ACCESS};
use webresources_core::data_format::DataFormat;
use webresources_core::error::{CoreError, FieldErrors};
use webresources_db::error::RepoError;

use crate::error::AppError;
use crate::views::{AdminWebResource, ProjectSummary};

pub const MSG_ADDED: &str = "The web resource has been added.";
pub const MSG_UPDATED: &str = "The web resource has been updated.";
pub const MSG_REMOVED: &str = "The web resource has been removed.";
pub const MSG_LOCKED_ADD: &str = "The project is locked. New web resources cannot be added.";
pub const MSG_LOCKED_UPDATE: &str = "The project is locked. Web resource cannot be updated.";
pub const MSG_LOCKED_REMOVE: &str = "The project is locked. Web resource cannot be removed.";
pub const MSG_FORM_ERROR: &str = "An error occurred.";

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Error,
}

/// One-off notice shown at the top of the next rendered page.
#[derive(Debug, Serialize)]
pub struct PageMessage {
    pub level: MessageLevel,
    pub text: String,
}

/// Everything an admin template needs. Absent keys are omitted.
#[derive(Debug, Default, Serialize)]
pub struct PageContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webresource: Option<AdminWebResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webresources: Option<Vec<AdminWebResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_formats: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<PageMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_errors: Option<FieldErrors>,
    /// Page the template should navigate to next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl PageContext {
    pub fn with_data_formats(mut self) -> Self {
        self.data_formats = Some(DataFormat::ALL.iter().map(|f| f.as_str()).collect());
        self
    }

    pub fn success(mut self, text: &str) -> Self {
        self.messages.push(PageMessage {
            level: MessageLevel::Success,
            text: text.to_string(),
        });
        self
    }

    pub fn failure(mut self, text: &str) -> Self {
        self.messages.push(PageMessage {
            level: MessageLevel::Error,
            text: text.to_string(),
        });
        self
    }

    pub fn redirect_to(mut self, path: String) -> Self {
        self.redirect = Some(path);
        self
    }

    fn problem(error: &'static str, description: String) -> Self {
        Self {
            error: Some(error),
            error_description: Some(description),
            ..Self::default()
        }
    }
}

/// Response of an admin page handler.
#[derive(Debug)]
pub enum PageResponse {
    Render(StatusCode, PageContext),
    Redirect(String),
}

impl PageResponse {
    pub fn ok(context: PageContext) -> Self {
        PageResponse::Render(StatusCode::OK, context)
    }

    pub fn created(context: PageContext) -> Self {
        PageResponse::Render(StatusCode::CREATED, context)
    }

    /// Send an anonymous visitor to `login_url`, returning to `path` afterwards.
    pub fn login(login_url: &str, path: &str) -> Self {
        let next: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
        let separator = if login_url.contains('?') { '&' } else { '?' };
        PageResponse::Redirect(format!("{login_url}{separator}next={next}"))
    }

    pub fn not_found(entity: &str) -> Self {
        Self::ok(PageContext::problem("Not found.", does_not_exist_msg(entity)))
    }

    pub fn permission_denied() -> Self {
        Self::ok(PageContext::problem(
            "Permission denied.",
            NO_RIGHTS_TO_ACCESS.to_string(),
        ))
    }
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        match self {
            PageResponse::Render(status, context) => (status, Json(context)).into_response(),
            PageResponse::Redirect(location) => {
                (StatusCode::FOUND, [(LOCATION, location)]).into_response()
            }
        }
    }
}

/// Early exit from an admin page handler.
///
/// Expected problems become a rendered page; anything else is an
/// [`AppError`] and answers like every other endpoint.
#[derive(Debug)]
pub enum PageError {
    Page(PageResponse),
    App(AppError),
}

pub type PageResult = Result<PageResponse, PageError>;

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::Page(page) => page.into_response(),
            PageError::App(err) => err.into_response(),
        }
    }
}

impl From<PageResponse> for PageError {
    fn from(page: PageResponse) -> Self {
        PageError::Page(page)
    }
}

impl From<CoreError> for PageError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, .. } => PageError::Page(PageResponse::not_found(entity)),
            CoreError::Forbidden(_) => PageError::Page(PageResponse::permission_denied()),
            other => PageError::App(AppError::Core(other)),
        }
    }
}

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Core(core) => core.into(),
            other => PageError::App(other),
        }
    }
}

impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        PageError::App(AppError::Database(err))
    }
}

impl From<RepoError> for PageError {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

/// Admin page paths, kept in one place so redirects stay in sync with routes.
pub mod paths {
    use webresources_core::types::DbId;

    pub fn all_webresources(project_id: DbId) -> String {
        format!("/admin/projects/{project_id}/webresources/")
    }

    pub fn single_webresource(project_id: DbId, webresource_id: DbId) -> String {
        format!("/admin/projects/{project_id}/webresources/{webresource_id}/")
    }
}
