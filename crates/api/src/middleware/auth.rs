//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use webresources_core::error::CoreError;
use webresources_core::types::DbId;
use webresources_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token's subject must be an active user.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

/// Optional caller identity.
///
/// `None` when no `Authorization` header is sent. A header that is present
/// but invalid is still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<DbId> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        authenticate(auth_header, state).await
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get("authorization") else {
            return Ok(MaybeAuthUser(None));
        };
        let header = header
            .to_str()
            .map_err(|_| unauthorized("Invalid Authorization header"))?;

        Ok(MaybeAuthUser(Some(authenticate(header, state).await?)))
    }
}

async fn authenticate(header: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization format. Expected: Bearer <token>")
    })?;

    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    UserRepo::find_active_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| unauthorized("User account not found or inactive"))?;

    Ok(AuthUser {
        user_id: claims.sub,
    })
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
