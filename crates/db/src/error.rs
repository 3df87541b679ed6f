use webresources_core::error::CoreError;

/// Error returned by repository operations that validate input inside a
/// transaction before writing.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The input was rejected; nothing was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
