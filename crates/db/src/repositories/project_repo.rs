//! Repository for the `projects` and `project_members` tables.

use sqlx::PgPool;
use webresources_core::access::ProjectRole;
use webresources_core::status::ProjectStatus;
use webresources_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectMember};
use crate::repositories::WebResourceRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, status_id, islocked, created_at, updated_at";

const MEMBER_COLUMNS: &str = "id, project_id, user_id, role, created_at, updated_at";

/// Provides project lookups, membership and lifecycle changes.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// If `status_id` is `None` in the input, defaults to 1 (active).
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, status_id, islocked)
             VALUES ($1, COALESCE($2, 1), COALESCE($3, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(input.status_id)
            .bind(input.islocked)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID. Excludes deleted projects.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND status_id <> $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(ProjectStatus::Deleted.id())
            .fetch_optional(pool)
            .await
    }

    /// List non-deleted projects the user administers, by name.
    pub async fn list_administered_by(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM projects p
             JOIN project_members m ON m.project_id = p.id
             WHERE m.user_id = $1 AND m.role = $2 AND p.status_id <> $3
             ORDER BY p.name, p.id",
            prefixed_columns("p")
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(ProjectRole::Admin.as_str())
            .bind(ProjectStatus::Deleted.id())
            .fetch_all(pool)
            .await
    }

    /// Add a user to a project, or change their role if already a member.
    pub async fn add_member(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        role: ProjectRole,
    ) -> Result<ProjectMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_members (project_id, user_id, role)
             VALUES ($1, $2, $3)
             ON CONFLICT (project_id, user_id) DO UPDATE SET role = EXCLUDED.role
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_one(pool)
            .await
    }

    /// The user's role on a non-deleted project, if any.
    pub async fn find_role(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<ProjectRole>, sqlx::Error> {
        let role = sqlx::query_scalar::<_, String>(
            "SELECT m.role FROM project_members m
             JOIN projects p ON p.id = m.project_id
             WHERE m.project_id = $1 AND m.user_id = $2 AND p.status_id <> $3",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(ProjectStatus::Deleted.id())
        .fetch_optional(pool)
        .await?;
        Ok(role.as_deref().and_then(ProjectRole::from_name))
    }

    /// Lock or unlock a project. Returns `true` if a row was updated.
    pub async fn set_locked(pool: &PgPool, id: DbId, locked: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET islocked = $2 WHERE id = $1")
            .bind(id)
            .bind(locked)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Change a project's status and cascade it to the project's web resources.
    ///
    /// The project update and the cascade commit together: if the cascade
    /// fails, the project keeps its previous status. Deleted projects cannot
    /// change status; `None` is returned for them and for unknown ids.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET status_id = $2
             WHERE id = $1 AND status_id <> $3
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status.id())
            .bind(ProjectStatus::Deleted.id())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            return Ok(None);
        };

        let affected = WebResourceRepo::cascade_project_status(&mut tx, id, status).await?;
        tx.commit().await?;

        tracing::info!(
            project_id = id,
            status = %status,
            webresources_affected = affected,
            "Project status changed",
        );
        Ok(Some(project))
    }
}

fn prefixed_columns(alias: &str) -> String {
    COLUMNS
        .split(", ")
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}
