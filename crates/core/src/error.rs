use std::collections::BTreeMap;

use crate::types::DbId;
use crate::url_check::UrlCheckError;

/// Per-field validation messages keyed by form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    FieldValidation(FieldErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The owning project is locked; no write may proceed.
    #[error("Locked: {0}")]
    Locked(String),

    #[error(transparent)]
    RemoteFetch(#[from] UrlCheckError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a single-field validation error.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        CoreError::FieldValidation(errors)
    }
}
