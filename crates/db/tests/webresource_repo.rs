//! Integration tests for the web resource repository.
//!
//! Covers creation defaults, project scoping, partial updates, status
//! toggling, soft delete and reordering.

use assert_matches::assert_matches;
use sqlx::PgPool;
use webresources_core::data_format::DataFormat;
use webresources_core::error::CoreError;
use webresources_core::status::WebResourceStatus;
use webresources_db::error::RepoError;
use webresources_db::models::project::CreateProject;
use webresources_db::models::user::CreateUser;
use webresources_db::models::webresource::{CreateWebResource, UpdateWebResource, WebResource};
use webresources_db::repositories::{ProjectRepo, UserRepo, WebResourceRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_project(pool: &PgPool, name: &str) -> (i64, i64) {
    let user = UserRepo::create(pool, &CreateUser { display_name: "admin".to_string() })
        .await
        .unwrap();
    let project = ProjectRepo::create(
        pool,
        &CreateProject { name: name.to_string(), status_id: None, islocked: None },
    )
    .await
    .unwrap();
    (project.id, user.id)
}

fn new_resource(name: &str) -> CreateWebResource {
    CreateWebResource {
        name: name.to_string(),
        description: None,
        data_format: DataFormat::GeoJson,
        url: format!("http://example.com/{name}.json"),
        colour: None,
        symbol: None,
    }
}

async fn create(pool: &PgPool, project_id: i64, user_id: i64, name: &str) -> WebResource {
    WebResourceRepo::create(pool, project_id, user_id, &new_resource(name))
        .await
        .unwrap()
}

fn names(rows: &[WebResource]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Create / find
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Defaults").await;

    let resource = create(&pool, project_id, user_id, "roads").await;

    assert_eq!(resource.project_id, project_id);
    assert_eq!(resource.creator_id, user_id);
    assert_eq!(resource.colour, "#0033ff");
    assert_eq!(resource.sort_order, 0);
    assert_eq!(resource.status(), Some(WebResourceStatus::Active));
    assert_eq!(resource.format(), Some(DataFormat::GeoJson));
    assert_eq!(resource.symbol, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookups_are_scoped_to_project(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Home").await;
    let (other_id, _) = seed_project(&pool, "Elsewhere").await;
    let resource = create(&pool, project_id, user_id, "rivers").await;

    let found = WebResourceRepo::find_by_id(&pool, project_id, resource.id)
        .await
        .unwrap();
    assert_eq!(found.map(|r| r.id), Some(resource.id));

    let foreign = WebResourceRepo::find_by_id(&pool, other_id, resource.id)
        .await
        .unwrap();
    assert!(foreign.is_none());

    let updated = WebResourceRepo::update(
        &pool,
        other_id,
        resource.id,
        &UpdateWebResource { name: Some("hijack".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    assert!(updated.is_none());
    assert!(!WebResourceRepo::soft_delete(&pool, other_id, resource.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_by_order_then_id(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Ordering").await;
    let a = create(&pool, project_id, user_id, "a").await;
    let b = create(&pool, project_id, user_id, "b").await;
    create(&pool, project_id, user_id, "c").await;

    sqlx::query("UPDATE webresources SET sort_order = 5 WHERE id = $1")
        .bind(a.id)
        .execute(&pool)
        .await
        .unwrap();
    WebResourceRepo::set_status(&pool, project_id, b.id, WebResourceStatus::Inactive)
        .await
        .unwrap();

    let all = WebResourceRepo::list_by_project(&pool, project_id).await.unwrap();
    assert_eq!(names(&all), vec!["b", "c", "a"]);

    let active = WebResourceRepo::list_active_by_project(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(names(&active), vec!["c", "a"]);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_only_touches_submitted_fields(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Update").await;
    let input = CreateWebResource {
        description: Some("Original".to_string()),
        symbol: Some("symbols/pin.png".to_string()),
        colour: Some("#ff0000".to_string()),
        ..new_resource("parks")
    };
    let resource = WebResourceRepo::create(&pool, project_id, user_id, &input)
        .await
        .unwrap();

    let updated = WebResourceRepo::update(
        &pool,
        project_id,
        resource.id,
        &UpdateWebResource {
            name: Some("Green spaces".to_string()),
            data_format: Some(DataFormat::Kml),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Green spaces");
    assert_eq!(updated.data_format, "KML");
    assert_eq!(updated.description.as_deref(), Some("Original"));
    assert_eq!(updated.colour, "#ff0000");
    assert_eq!(updated.symbol.as_deref(), Some("symbols/pin.png"));
    assert_eq!(updated.url, resource.url);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_clears_description_and_symbol(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Clear").await;
    let input = CreateWebResource {
        description: Some("Remove me".to_string()),
        symbol: Some("symbols/pin.png".to_string()),
        ..new_resource("trails")
    };
    let resource = WebResourceRepo::create(&pool, project_id, user_id, &input)
        .await
        .unwrap();

    let updated = WebResourceRepo::update(
        &pool,
        project_id,
        resource.id,
        &UpdateWebResource {
            description: Some(String::new()),
            clear_symbol: true,
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.description, None);
    assert_eq!(updated.symbol, None);
}

// ---------------------------------------------------------------------------
// Status / soft delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_status_toggles_and_rejects_deleted(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Toggle").await;
    let resource = create(&pool, project_id, user_id, "wells").await;

    let inactive = WebResourceRepo::set_status(
        &pool,
        project_id,
        resource.id,
        WebResourceStatus::Inactive,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(inactive.status(), Some(WebResourceStatus::Inactive));

    let result = WebResourceRepo::set_status(
        &pool,
        project_id,
        resource.id,
        WebResourceStatus::Deleted,
    )
    .await;
    assert_matches!(result, Err(RepoError::Core(CoreError::Validation(_))));

    let still = WebResourceRepo::find_by_id(&pool, project_id, resource.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still.status(), Some(WebResourceStatus::Inactive));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_is_terminal_and_idempotent(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Delete").await;
    let resource = create(&pool, project_id, user_id, "bins").await;

    assert!(WebResourceRepo::soft_delete(&pool, project_id, resource.id).await.unwrap());
    assert!(!WebResourceRepo::soft_delete(&pool, project_id, resource.id).await.unwrap());

    assert!(WebResourceRepo::find_by_id(&pool, project_id, resource.id)
        .await
        .unwrap()
        .is_none());
    let row = WebResourceRepo::find_by_id_include_deleted(&pool, project_id, resource.id)
        .await
        .unwrap()
        .expect("soft-deleted row is kept");
    assert_eq!(row.status(), Some(WebResourceStatus::Deleted));

    let revived = WebResourceRepo::set_status(
        &pool,
        project_id,
        resource.id,
        WebResourceStatus::Active,
    )
    .await
    .unwrap();
    assert!(revived.is_none(), "deleted resources cannot be reactivated");

    assert!(WebResourceRepo::list_by_project(&pool, project_id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_assigns_positions(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Reorder").await;
    let a = create(&pool, project_id, user_id, "a").await;
    let b = create(&pool, project_id, user_id, "b").await;
    let c = create(&pool, project_id, user_id, "c").await;

    let rows = WebResourceRepo::reorder(&pool, project_id, &[c.id, a.id, b.id])
        .await
        .unwrap();

    assert_eq!(names(&rows), vec!["c", "a", "b"]);
    let orders: Vec<i32> = rows.iter().map(|r| r.sort_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_with_foreign_id_changes_nothing(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Mine").await;
    let (other_id, _) = seed_project(&pool, "Theirs").await;
    let a = create(&pool, project_id, user_id, "a").await;
    let b = create(&pool, project_id, user_id, "b").await;
    let foreign = create(&pool, other_id, user_id, "x").await;

    let result = WebResourceRepo::reorder(&pool, project_id, &[b.id, foreign.id, a.id]).await;
    assert_matches!(result, Err(RepoError::Core(CoreError::Validation(_))));

    let rows = WebResourceRepo::list_by_project(&pool, project_id).await.unwrap();
    assert!(rows.iter().all(|r| r.sort_order == 0));
    assert_eq!(names(&rows), vec!["a", "b"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_rejects_deleted_and_duplicate_ids(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Strict").await;
    let a = create(&pool, project_id, user_id, "a").await;
    let gone = create(&pool, project_id, user_id, "gone").await;
    WebResourceRepo::soft_delete(&pool, project_id, gone.id)
        .await
        .unwrap();

    let deleted = WebResourceRepo::reorder(&pool, project_id, &[gone.id, a.id]).await;
    assert_matches!(deleted, Err(RepoError::Core(CoreError::Validation(_))));

    let twice = WebResourceRepo::reorder(&pool, project_id, &[a.id, a.id]).await;
    assert_matches!(twice, Err(RepoError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_reorder_leaves_others_untouched(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool, "Partial").await;
    let a = create(&pool, project_id, user_id, "a").await;
    let b = create(&pool, project_id, user_id, "b").await;
    let c = create(&pool, project_id, user_id, "c").await;
    sqlx::query("UPDATE webresources SET sort_order = 7 WHERE id = $1")
        .bind(c.id)
        .execute(&pool)
        .await
        .unwrap();

    let rows = WebResourceRepo::reorder(&pool, project_id, &[b.id, a.id])
        .await
        .unwrap();

    assert_eq!(names(&rows), vec!["b", "a", "c"]);
    assert_eq!(rows[2].sort_order, 7);

    let unchanged = WebResourceRepo::reorder(&pool, project_id, &[]).await.unwrap();
    assert_eq!(names(&unchanged), vec!["b", "a", "c"]);
}
