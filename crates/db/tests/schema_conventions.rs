//! Schema-wide conventions every migration must follow.

use sqlx::PgPool;

async fn base_tables(pool: &PgPool) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT table_name::TEXT
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name <> '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

/// Entity tables use BIGSERIAL ids, status lookups use SMALLSERIAL.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_primary_key_types(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name::TEXT, data_type::TEXT
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND column_name = 'id'
           AND table_name <> '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        let expected = if table.ends_with("_statuses") { "smallint" } else { "bigint" };
        assert_eq!(data_type, expected, "{table}.id");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_every_table_has_timestamptz_audit_columns(pool: PgPool) {
    for table in base_tables(&pool).await {
        for column in ["created_at", "updated_at"] {
            let data_type: Option<String> = sqlx::query_scalar(
                "SELECT data_type::TEXT
                 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
            )
            .bind(&table)
            .bind(column)
            .fetch_optional(&pool)
            .await
            .unwrap();

            assert_eq!(
                data_type.as_deref(),
                Some("timestamp with time zone"),
                "{table}.{column}"
            );
        }
    }
}

/// Text columns are TEXT with CHECK constraints, never VARCHAR.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let offenders: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::TEXT || '.' || column_name::TEXT
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name <> '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(offenders.is_empty(), "VARCHAR columns found: {offenders:?}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_keys_are_indexed(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT tc.table_name::TEXT, kcu.column_name::TEXT
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
           ON kcu.constraint_name = tc.constraint_name
          AND kcu.table_schema = tc.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!fk_columns.is_empty());
    for (table, column) in &fk_columns {
        let indexed: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM pg_indexes
                 WHERE schemaname = 'public'
                   AND tablename = $1
                   AND indexdef LIKE '%(' || $2 || ')%'
             )",
        )
        .bind(table)
        .bind(column)
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(indexed, "{table}.{column} is a foreign key without an index");
    }
}

/// Every foreign key spells out its ON DELETE / ON UPDATE behaviour.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_keys_declare_rules(pool: PgPool) {
    let rules: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT constraint_name::TEXT, delete_rule::TEXT, update_rule::TEXT
         FROM information_schema.referential_constraints
         WHERE constraint_schema = 'public'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rules.is_empty());
    for (constraint, on_delete, on_update) in &rules {
        assert!(
            on_delete != "NO ACTION" || on_update != "NO ACTION",
            "{constraint} relies on the implicit NO ACTION rules"
        );
    }
}

/// Tables with `updated_at` keep it current through the shared trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_every_table_has_updated_at_trigger(pool: PgPool) {
    let lookups = ["project_statuses", "webresource_statuses"];
    for table in base_tables(&pool).await {
        if lookups.contains(&table.as_str()) {
            continue;
        }
        let has_trigger: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM information_schema.triggers
                 WHERE event_object_schema = 'public'
                   AND event_object_table = $1
                   AND action_statement LIKE '%trigger_set_updated_at%'
             )",
        )
        .bind(&table)
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_trigger, "{table} has no updated_at trigger");
    }
}
