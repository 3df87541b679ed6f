//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use webresources_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub display_name: String,
}
