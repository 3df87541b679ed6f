//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use webresources_core::access::ProjectRole;
use webresources_core::status::{ProjectStatus, StatusId};
use webresources_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub status_id: StatusId,
    pub islocked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    pub fn status(&self) -> Option<ProjectStatus> {
        ProjectStatus::from_id(self.status_id)
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    /// Defaults to 1 (active) if omitted.
    pub status_id: Option<StatusId>,
    pub islocked: Option<bool>,
}

/// A row from the `project_members` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectMember {
    pub fn project_role(&self) -> Option<ProjectRole> {
        ProjectRole::from_name(&self.role)
    }
}
