//! Handlers for the administrator pages under `/admin`.
//!
//! Each handler answers with a [`PageResponse`]. Only project administrators
//! get past [`ProjectAccess::authorize`]; writes to a locked project render
//! the page again with a message instead of changing anything.

use axum::extract::State;
use axum::http::Uri;
use webresources_core::access::{Decision, Operation, Surface};
use webresources_core::error::{CoreError, FieldErrors};
use webresources_core::types::DbId;
use webresources_core::url_check::URL_CHECK_HEADLINE;
use webresources_core::webresource::{clean_form, CleanedForm, FormMode, WebResourceForm};
use webresources_db::models::project::Project;
use webresources_db::models::webresource::{CreateWebResource, UpdateWebResource, WebResource};
use webresources_db::repositories::{ProjectRepo, WebResourceRepo};

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::handlers::{ProjectAccess, WEBRESOURCE};
use crate::middleware::auth::MaybeAuthUser;
use crate::pages::{
    paths, PageContext, PageError, PageResponse, PageResult, MSG_ADDED, MSG_FORM_ERROR,
    MSG_LOCKED_ADD, MSG_LOCKED_REMOVE, MSG_LOCKED_UPDATE, MSG_REMOVED, MSG_UPDATED,
};
use crate::state::AppState;
use crate::url_check::check_url;
use crate::views::{AdminWebResource, ProjectSummary};

// ---------------------------------------------------------------------------
// Shared steps
// ---------------------------------------------------------------------------

fn require_login(state: &AppState, user: &MaybeAuthUser, uri: &Uri) -> Result<DbId, PageError> {
    user.user_id()
        .ok_or_else(|| PageResponse::login(&state.config.login_url, uri.path()).into())
}

/// Resolve the project for an admin page. Also reports whether a write
/// would hit the project lock.
async fn admin_project(
    state: &AppState,
    user_id: DbId,
    project_id: DbId,
) -> Result<(Project, bool), PageError> {
    let access = ProjectAccess::load(&state.pool, Some(user_id), project_id).await?;
    let locked = access.decide(Surface::Page, Operation::Write) == Decision::Locked;
    let project = access.authorize(Surface::Page, Operation::Read)?;
    Ok((project, locked))
}

async fn admin_webresource(
    state: &AppState,
    project_id: DbId,
    id: DbId,
) -> Result<WebResource, PageError> {
    WebResourceRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or_else(|| PageResponse::not_found(WEBRESOURCE).into())
}

fn project_context(project: &Project) -> PageContext {
    PageContext {
        project: Some(project.into()),
        ..PageContext::default()
    }
}

fn resource_context(state: &AppState, project: &Project, resource: &WebResource) -> PageContext {
    PageContext {
        webresource: Some(AdminWebResource::new(resource, &state.config.media_url)),
        ..project_context(project)
    }
    .with_data_formats()
}

fn form_error_page(context: PageContext, errors: FieldErrors) -> PageResponse {
    PageResponse::ok(
        PageContext {
            form_errors: Some(errors),
            ..context
        }
        .failure(MSG_FORM_ERROR),
    )
}

/// Key for errors that belong to the whole form rather than one field.
const NON_FIELD_ERRORS: &str = "__all__";

/// The submitted body could not be read as a form at all.
fn unreadable_form(err: AppError) -> FieldErrors {
    let message = match err {
        AppError::Core(CoreError::Validation(msg)) => msg,
        other => other.to_string(),
    };
    FieldErrors::from([(NON_FIELD_ERRORS.to_string(), vec![message])])
}

/// Clean a submitted form. A missing data format is detected by probing
/// the URL; probe failures are reported against the `url` field.
async fn clean_and_detect(
    state: &AppState,
    form: &WebResourceForm,
    mode: FormMode,
) -> Result<CleanedForm, FieldErrors> {
    let mut cleaned = clean_form(form, mode)?;

    if cleaned.data_format.is_none() {
        if let Some(url) = cleaned.url.as_deref() {
            match check_url(&state.http, url).await {
                Ok(format) => cleaned.data_format = Some(format),
                Err(err) => {
                    let messages = std::iter::once(URL_CHECK_HEADLINE.to_string())
                        .chain(err.messages)
                        .collect();
                    let mut errors = FieldErrors::new();
                    errors.insert("url".to_string(), messages);
                    return Err(errors);
                }
            }
        }
    }
    Ok(cleaned)
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /admin/webresources/
///
/// Projects the caller administers.
pub async fn index(State(state): State<AppState>, user: MaybeAuthUser, uri: Uri) -> PageResult {
    let user_id = require_login(&state, &user, &uri)?;

    let projects = ProjectRepo::list_administered_by(&state.pool, user_id).await?;
    Ok(PageResponse::ok(PageContext {
        projects: Some(projects.iter().map(ProjectSummary::from).collect()),
        ..PageContext::default()
    }))
}

/// GET /admin/projects/{project_id}/webresources/
pub async fn all_webresources(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    uri: Uri,
    AppPath(project_id): AppPath<DbId>,
) -> PageResult {
    let user_id = require_login(&state, &user, &uri)?;
    let (project, _) = admin_project(&state, user_id, project_id).await?;

    let resources = WebResourceRepo::list_by_project(&state.pool, project_id).await?;
    Ok(PageResponse::ok(PageContext {
        webresources: Some(AdminWebResource::list(&resources, &state.config.media_url)),
        ..project_context(&project)
    }))
}

/// GET /admin/projects/{project_id}/webresources/add/
pub async fn add_form(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    uri: Uri,
    AppPath(project_id): AppPath<DbId>,
) -> PageResult {
    let user_id = require_login(&state, &user, &uri)?;
    let (project, _) = admin_project(&state, user_id, project_id).await?;

    Ok(PageResponse::ok(project_context(&project).with_data_formats()))
}

/// POST /admin/projects/{project_id}/webresources/add/
pub async fn create(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    uri: Uri,
    AppPath(project_id): AppPath<DbId>,
    body: Result<AppJson<WebResourceForm>, AppError>,
) -> PageResult {
    let user_id = require_login(&state, &user, &uri)?;
    let (project, locked) = admin_project(&state, user_id, project_id).await?;
    let context = project_context(&project).with_data_formats();

    if locked {
        tracing::warn!(project_id, user_id, "Rejected web resource creation on locked project");
        return Ok(PageResponse::ok(context.failure(MSG_LOCKED_ADD)));
    }

    let form = match body {
        Ok(AppJson(form)) => form,
        Err(err) => return Ok(form_error_page(context, unreadable_form(err))),
    };
    let cleaned = match clean_and_detect(&state, &form, FormMode::Create).await {
        Ok(cleaned) => cleaned,
        Err(errors) => return Ok(form_error_page(context, errors)),
    };
    let input = CreateWebResource::try_from(cleaned)?;
    let resource = WebResourceRepo::create(&state.pool, project_id, user_id, &input).await?;

    tracing::info!(
        project_id,
        webresource_id = resource.id,
        user_id,
        data_format = %resource.data_format,
        "Web resource created",
    );

    Ok(PageResponse::created(
        resource_context(&state, &project, &resource)
            .success(MSG_ADDED)
            .redirect_to(paths::single_webresource(project_id, resource.id)),
    ))
}

/// GET /admin/projects/{project_id}/webresources/{webresource_id}/
pub async fn single_webresource(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    uri: Uri,
    AppPath((project_id, webresource_id)): AppPath<(DbId, DbId)>,
) -> PageResult {
    let user_id = require_login(&state, &user, &uri)?;
    let (project, _) = admin_project(&state, user_id, project_id).await?;
    let resource = admin_webresource(&state, project_id, webresource_id).await?;

    Ok(PageResponse::ok(resource_context(&state, &project, &resource)))
}

/// POST /admin/projects/{project_id}/webresources/{webresource_id}/
///
/// Only the submitted fields change.
pub async fn update(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    uri: Uri,
    AppPath((project_id, webresource_id)): AppPath<(DbId, DbId)>,
    body: Result<AppJson<WebResourceForm>, AppError>,
) -> PageResult {
    let user_id = require_login(&state, &user, &uri)?;
    let (project, locked) = admin_project(&state, user_id, project_id).await?;
    let resource = admin_webresource(&state, project_id, webresource_id).await?;
    let context = resource_context(&state, &project, &resource);

    if locked {
        tracing::warn!(project_id, webresource_id, user_id, "Rejected update on locked project");
        return Ok(PageResponse::ok(
            context
                .failure(MSG_LOCKED_UPDATE)
                .redirect_to(paths::single_webresource(project_id, webresource_id)),
        ));
    }

    let form = match body {
        Ok(AppJson(form)) => form,
        Err(err) => return Ok(form_error_page(context, unreadable_form(err))),
    };
    let cleaned = match clean_and_detect(&state, &form, FormMode::Update).await {
        Ok(cleaned) => cleaned,
        Err(errors) => return Ok(form_error_page(context, errors)),
    };
    let input = UpdateWebResource::from(cleaned);
    let updated = WebResourceRepo::update(&state.pool, project_id, webresource_id, &input)
        .await?
        .ok_or_else(|| PageError::from(PageResponse::not_found(WEBRESOURCE)))?;

    tracing::info!(project_id, webresource_id, user_id, "Web resource updated");

    Ok(PageResponse::ok(
        resource_context(&state, &project, &updated)
            .success(MSG_UPDATED)
            .redirect_to(paths::single_webresource(project_id, webresource_id)),
    ))
}

/// GET /admin/projects/{project_id}/webresources/{webresource_id}/remove/
pub async fn remove(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    uri: Uri,
    AppPath((project_id, webresource_id)): AppPath<(DbId, DbId)>,
) -> PageResult {
    let user_id = require_login(&state, &user, &uri)?;
    let (project, locked) = admin_project(&state, user_id, project_id).await?;
    let resource = admin_webresource(&state, project_id, webresource_id).await?;

    if locked {
        tracing::warn!(project_id, webresource_id, user_id, "Rejected removal on locked project");
        return Ok(PageResponse::ok(
            resource_context(&state, &project, &resource)
                .failure(MSG_LOCKED_REMOVE)
                .redirect_to(paths::single_webresource(project_id, webresource_id)),
        ));
    }

    WebResourceRepo::soft_delete(&state.pool, project_id, webresource_id).await?;
    tracing::info!(project_id, webresource_id, user_id, "Web resource removed");

    Ok(PageResponse::ok(
        project_context(&project)
            .success(MSG_REMOVED)
            .redirect_to(paths::all_webresources(project_id)),
    ))
}
