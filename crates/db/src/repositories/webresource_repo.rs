//! Repository for the `webresources` table.
//!
//! Every lookup is scoped to a project. Deleted rows are only visible
//! through [`WebResourceRepo::find_by_id_include_deleted`].

use std::collections::HashSet;

use sqlx::PgPool;
use webresources_core::lifecycle::cascade_for;
use webresources_core::ordering::plan_reorder;
use webresources_core::error::CoreError;
use webresources_core::status::{ProjectStatus, WebResourceStatus};
use webresources_core::types::DbId;
use webresources_core::webresource::DEFAULT_COLOUR;

use crate::error::RepoError;
use crate::models::webresource::{CreateWebResource, UpdateWebResource, WebResource};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, creator_id, name, description, data_format, url, \
                       colour, symbol, sort_order, status_id, created_at, updated_at";

/// Display order used by every list query.
const ORDER_BY: &str = "ORDER BY sort_order ASC, id ASC";

/// Provides CRUD, ordering and lifecycle operations for web resources.
pub struct WebResourceRepo;

impl WebResourceRepo {
    /// Insert a new active web resource at order 0, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        creator_id: DbId,
        input: &CreateWebResource,
    ) -> Result<WebResource, sqlx::Error> {
        let query = format!(
            "INSERT INTO webresources
                (project_id, creator_id, name, description, data_format, url, colour, symbol)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, $8), $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WebResource>(&query)
            .bind(project_id)
            .bind(creator_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.data_format.as_str())
            .bind(&input.url)
            .bind(&input.colour)
            .bind(DEFAULT_COLOUR)
            .bind(&input.symbol)
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted web resource within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<WebResource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webresources
             WHERE id = $1 AND project_id = $2 AND status_id <> $3"
        );
        sqlx::query_as::<_, WebResource>(&query)
            .bind(id)
            .bind(project_id)
            .bind(WebResourceStatus::Deleted.id())
            .fetch_optional(pool)
            .await
    }

    /// Find a web resource within a project regardless of status.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<WebResource>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM webresources WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, WebResource>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active web resource within a project.
    pub async fn find_active(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<WebResource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webresources
             WHERE id = $1 AND project_id = $2 AND status_id = $3"
        );
        sqlx::query_as::<_, WebResource>(&query)
            .bind(id)
            .bind(project_id)
            .bind(WebResourceStatus::Active.id())
            .fetch_optional(pool)
            .await
    }

    /// List a project's non-deleted web resources in display order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<WebResource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webresources
             WHERE project_id = $1 AND status_id <> $2
             {ORDER_BY}"
        );
        sqlx::query_as::<_, WebResource>(&query)
            .bind(project_id)
            .bind(WebResourceStatus::Deleted.id())
            .fetch_all(pool)
            .await
    }

    /// List a project's active web resources in display order.
    pub async fn list_active_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<WebResource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webresources
             WHERE project_id = $1 AND status_id = $2
             {ORDER_BY}"
        );
        sqlx::query_as::<_, WebResource>(&query)
            .bind(project_id)
            .bind(WebResourceStatus::Active.id())
            .fetch_all(pool)
            .await
    }

    /// Update a non-deleted web resource. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no such row exists in the project.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateWebResource,
    ) -> Result<Option<WebResource>, sqlx::Error> {
        let query = format!(
            "UPDATE webresources SET
                name = COALESCE($3, name),
                description = CASE WHEN $4::TEXT IS NULL THEN description ELSE NULLIF($4, '') END,
                data_format = COALESCE($5, data_format),
                url = COALESCE($6, url),
                colour = COALESCE($7, colour),
                symbol = CASE
                    WHEN $8::TEXT IS NOT NULL THEN $8
                    WHEN $9 THEN NULL
                    ELSE symbol
                END
             WHERE id = $1 AND project_id = $2 AND status_id <> $10
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WebResource>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.data_format.map(|f| f.as_str()))
            .bind(&input.url)
            .bind(&input.colour)
            .bind(&input.symbol)
            .bind(input.clear_symbol)
            .bind(WebResourceStatus::Deleted.id())
            .fetch_optional(pool)
            .await
    }

    /// Switch a non-deleted web resource between `active` and `inactive`.
    ///
    /// Returns `None` if no such row exists in the project. `Deleted` is not a
    /// valid target here; use [`WebResourceRepo::soft_delete`].
    pub async fn set_status(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        status: WebResourceStatus,
    ) -> Result<Option<WebResource>, RepoError> {
        if !WebResourceStatus::TOGGLE_TARGETS.contains(&status) {
            return Err(CoreError::Validation(format!(
                "Invalid status '{status}'. Must be one of: active, inactive"
            ))
            .into());
        }

        let query = format!(
            "UPDATE webresources SET status_id = $3
             WHERE id = $1 AND project_id = $2 AND status_id <> $4
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, WebResource>(&query)
            .bind(id)
            .bind(project_id)
            .bind(status.id())
            .bind(WebResourceStatus::Deleted.id())
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Soft-delete a web resource. Returns `true` if a row was marked deleted.
    ///
    /// Deleting an already deleted row changes nothing and returns `false`.
    pub async fn soft_delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE webresources SET status_id = $3
             WHERE id = $1 AND project_id = $2 AND status_id <> $3",
        )
        .bind(id)
        .bind(project_id)
        .bind(WebResourceStatus::Deleted.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Give each listed web resource its position in `ids` as its order.
    ///
    /// All ids must be non-deleted web resources of the project, each listed
    /// once; otherwise nothing is written and a validation error is returned.
    /// Unlisted resources keep their order. Returns the project's non-deleted
    /// web resources in their new display order.
    pub async fn reorder(
        pool: &PgPool,
        project_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<WebResource>, RepoError> {
        let mut tx = pool.begin().await?;

        let eligible: HashSet<DbId> = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM webresources
             WHERE project_id = $1 AND status_id <> $2
             FOR UPDATE",
        )
        .bind(project_id)
        .bind(WebResourceStatus::Deleted.id())
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

        let plan = plan_reorder(ids, &eligible)?;

        if !plan.is_empty() {
            let plan_ids: Vec<DbId> = plan.iter().map(|a| a.id).collect();
            let plan_orders: Vec<i32> = plan.iter().map(|a| a.order).collect();
            sqlx::query(
                "UPDATE webresources w SET sort_order = v.sort_order
                 FROM UNNEST($2::BIGINT[], $3::INTEGER[]) AS v(id, sort_order)
                 WHERE w.id = v.id AND w.project_id = $1",
            )
            .bind(project_id)
            .bind(&plan_ids)
            .bind(&plan_orders)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "SELECT {COLUMNS} FROM webresources
             WHERE project_id = $1 AND status_id <> $2
             {ORDER_BY}"
        );
        let rows = sqlx::query_as::<_, WebResource>(&query)
            .bind(project_id)
            .bind(WebResourceStatus::Deleted.id())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rows)
    }

    /// Apply the status cascade for a project that moved into `status`.
    ///
    /// Runs inside the caller's transaction so the project update and the
    /// cascade become visible together. Returns the number of rows changed.
    pub async fn cascade_project_status(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        project_id: DbId,
        status: ProjectStatus,
    ) -> Result<u64, sqlx::Error> {
        let Some(action) = cascade_for(status) else {
            return Ok(0);
        };

        let result = sqlx::query(
            "UPDATE webresources SET status_id = $2
             WHERE project_id = $1 AND status_id = ANY($3) AND status_id <> $2",
        )
        .bind(project_id)
        .bind(action.target.id())
        .bind(action.affected_ids())
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }
}
