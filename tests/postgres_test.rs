//! Integration tests against a live PostgreSQL server
//!
//! Run with `DATABASE_URL` set and `--ignored`.

use chrono::{TimeZone, Utc};
use sqljson::prelude::*;
use sqljson::sqlx::{self, PgPool, Row};

async fn setup_pool() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

async fn create_table(pool: &PgPool) {
    sqlx::query("DROP TABLE IF EXISTS sqljson_adapters")
        .execute(pool)
        .await
        .expect("Failed to drop table");
    sqlx::query(
        "CREATE TABLE sqljson_adapters (
            id INTEGER PRIMARY KEY,
            finished_at TIMESTAMPTZ,
            input JSON,
            output JSONB,
            input_b JSONB,
            output_j JSON
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create table");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_present_values_round_trip() {
    let pool = setup_pool().await;
    create_table(&pool).await;

    let finished_at = NullableTimestamp::new(Utc.with_ymd_and_hms(2024, 6, 1, 9, 15, 0).unwrap());
    let input = RawPayload::from(r#"{"z":1,"a":2}"#);
    let output = NullableRawPayload::from(r#"{"rows":[1,2]}"#);

    sqlx::query("INSERT INTO sqljson_adapters VALUES (1, $1, $2, $3, $2, $3)")
        .bind(finished_at)
        .bind(&input)
        .bind(&output)
        .execute(&pool)
        .await
        .unwrap();

    let row = sqlx::query(
        "SELECT finished_at, input, output, input_b, output_j FROM sqljson_adapters WHERE id = 1",
    )
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(row.get::<NullableTimestamp, _>("finished_at"), finished_at);
    // JSON columns keep the text as written, key order included
    assert_eq!(row.get::<RawPayload, _>("input"), input);
    assert_eq!(row.get::<NullableRawPayload, _>("output_j"), output);

    // JSONB columns hold the same document in normalized form
    let stored: NullableRawPayload = row.get("output");
    assert_eq!(
        stored.decode::<serde_json::Value>().unwrap(),
        serde_json::json!({"rows": [1, 2]})
    );
    let stored: RawPayload = row.get("input_b");
    assert_eq!(
        stored.decode::<serde_json::Value>().unwrap(),
        serde_json::json!({"a": 2, "z": 1})
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_empty_values_storage() {
    let pool = setup_pool().await;
    create_table(&pool).await;

    sqlx::query("INSERT INTO sqljson_adapters VALUES (2, $1, $2, $3, $2, $3)")
        .bind(NullableTimestamp::NULL)
        .bind(RawPayload::default())
        .bind(NullableRawPayload::default())
        .execute(&pool)
        .await
        .unwrap();

    let row = sqlx::query(
        "SELECT finished_at IS NULL AS ts_null, input IS NULL AS input_null,
                input::text AS input_text, output IS NULL AS output_null,
                input_b::text AS input_b_text, output_j IS NULL AS output_j_null
         FROM sqljson_adapters WHERE id = 2",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(row.get::<bool, _>("ts_null"));
    assert!(!row.get::<bool, _>("input_null"));
    assert_eq!(row.get::<String, _>("input_text"), "null");
    assert!(row.get::<bool, _>("output_null"));
    assert_eq!(row.get::<String, _>("input_b_text"), "null");
    assert!(row.get::<bool, _>("output_j_null"));

    let row = sqlx::query("SELECT finished_at, output FROM sqljson_adapters WHERE id = 2")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(row.get::<NullableTimestamp, _>("finished_at").is_null());
    assert_eq!(row.get::<NullableRawPayload, _>("output").as_bytes(), b"null");
}
