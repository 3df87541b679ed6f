//! Request handlers, one module per surface.
//!
//! Every handler resolves the caller's role on the project first (see
//! [`ProjectAccess`]) and only then touches web resources.

pub mod admin;
pub mod ajax;
pub mod public;

use sqlx::PgPool;
use webresources_core::access::{decide, resolve_role, Decision, Operation, Role, Surface};
use webresources_core::error::CoreError;
use webresources_core::types::DbId;
use webresources_db::models::project::Project;
use webresources_db::repositories::ProjectRepo;

/// Entity name used in "not found" errors for web resources.
pub const WEBRESOURCE: &str = "Web resource";

/// A project as seen by one caller.
#[derive(Debug)]
pub struct ProjectAccess {
    pub project_id: DbId,
    /// `None` if the project does not exist or is deleted.
    pub project: Option<Project>,
    pub role: Role,
}

impl ProjectAccess {
    pub async fn load(
        pool: &PgPool,
        caller: Option<DbId>,
        project_id: DbId,
    ) -> Result<Self, sqlx::Error> {
        let project = ProjectRepo::find_by_id(pool, project_id).await?;
        let membership = match (caller, &project) {
            (Some(user_id), Some(_)) => ProjectRepo::find_role(pool, project_id, user_id).await?,
            _ => None,
        };
        Ok(Self {
            project_id,
            project,
            role: resolve_role(caller, membership),
        })
    }

    pub fn decide(&self, surface: Surface, operation: Operation) -> Decision {
        let locked = self.project.as_ref().is_some_and(|p| p.islocked);
        decide(self.role, surface, operation, locked)
    }

    /// The project, if `operation` through `surface` is allowed.
    pub fn authorize(self, surface: Surface, operation: Operation) -> Result<Project, CoreError> {
        self.decide(surface, operation).into_result(self.project_id)?;
        self.project.ok_or(CoreError::NotFound {
            entity: "Project",
            id: self.project_id,
        })
    }
}

pub fn webresource_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: WEBRESOURCE,
        id,
    }
}
