use sqlx::PgPool;

/// All `id` primary keys must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

/// Every table must carry a timestamptz `created_at`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn all_tables_have_created_at(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        // match_weight_settings is keyed by user and tracks updated_at only.
        let col = if table == "match_weight_settings" {
            "updated_at"
        } else if table == "messages" {
            "sent_at"
        } else {
            "created_at"
        };

        let result: Option<(String,)> = sqlx::query_as(
            "SELECT data_type
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name = $2",
        )
        .bind(table)
        .bind(col)
        .fetch_optional(&pool)
        .await
        .unwrap();

        let (data_type,) =
            result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
        assert_eq!(
            data_type, "timestamp with time zone",
            "Table {table}.{col} should be timestamptz, got {data_type}"
        );
    }
}

/// Uniqueness constraints the error classifier relies on must exist and
/// follow the `uq_` naming convention.
#[sqlx::test(migrations = "../../db/migrations")]
async fn conflict_constraints_follow_naming_convention(pool: PgPool) {
    let expected = [
        "uq_users_username",
        "uq_users_email",
        "uq_matches_pair",
        "uq_match_rejections_pair",
        "uq_sessions_refresh_token_hash",
    ];

    for name in expected {
        let found: Option<(String,)> = sqlx::query_as(
            "SELECT constraint_name
             FROM information_schema.table_constraints
             WHERE constraint_schema = 'public'
               AND constraint_type = 'UNIQUE'
               AND constraint_name = $1",
        )
        .bind(name)
        .fetch_optional(&pool)
        .await
        .unwrap();
        assert!(found.is_some(), "Missing unique constraint {name}");
    }
}
