//! Request extractors whose rejections answer like every other error.
//!
//! Axum's stock `Json` and `Path` reject with plain-text bodies. These
//! wrappers route the rejection through [`AppError`] so clients always get
//! the `{"error", "code"}` shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body. A malformed body is a `400 VALIDATION_ERROR`.
///
/// Handlers that must check access before looking at the body take
/// `Result<AppJson<T>, AppError>` and apply `?` after authorizing.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters. An id that does not parse is a `404 NOT_FOUND`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
