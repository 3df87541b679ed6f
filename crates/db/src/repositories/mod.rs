//! Repository layer: zero-sized structs with async CRUD methods.
//!
//! Each repository takes a `&PgPool` and returns `Result<T, sqlx::Error>`,
//! or [`crate::error::RepoError`] where a domain rule can reject the call.

pub mod project_repo;
pub mod user_repo;
pub mod webresource_repo;

pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
pub use webresource_repo::WebResourceRepo;
