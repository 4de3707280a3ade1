//! Startup flow against the in-memory mock service: probe, conditional
//! table creation, listing, one sample insert, and a guaranteed close
//! regardless of what happened upstream.
//!
//! Run with: `cargo run --example bootstrap`

use std::sync::Arc;

use spanner_adapter::prelude::*;
use spanner_adapter::test_utils::MockDatabase;
use uuid::Uuid;

const CREATE_USER_TABLE: &str = "CREATE TABLE User (
    id STRING(36) NOT NULL,
    firstName STRING(100),
    lastName STRING(100),
    age INT64
) PRIMARY KEY (id)";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config =
        SpannerConfig::new("test-project", "test-instance", "test-db").with_endpoint("localhost:9010");
    let adapter = SpannerAdapter::new(config, Arc::new(MockDatabase::new()));

    if let Err(e) = run_examples(&adapter).await {
        eprintln!("error during example queries: {e}");
    }
    // close on every path, success or not
    match adapter.destroy().await {
        Ok(()) => println!("database connection closed"),
        Err(e) => eprintln!("error closing database connection: {e}"),
    }
}

async fn run_examples(adapter: &SpannerAdapter) -> Result<(), SpannerAdapterError> {
    if !adapter.test_connection().await {
        eprintln!("connection test failed");
    }

    if adapter.has_table("User").await? {
        println!("User table already exists");
    } else {
        adapter
            .update_schema(&[CREATE_USER_TABLE.to_string()])
            .await?;
        println!("User table created");
    }

    let tables = adapter.list_tables().await?;
    for row in &tables.rows {
        if let Some(name) = row.get("table_name").and_then(SpannerValue::as_text) {
            println!("table: {name}");
        }
    }

    let created = create_user(adapter, "Alice", "Smith", 30).await?;
    println!("created {created} user row(s)");
    Ok(())
}

async fn create_user(
    adapter: &SpannerAdapter,
    first: &str,
    last: &str,
    age: i64,
) -> Result<usize, SpannerAdapterError> {
    let mut conn = adapter.acquire_connection().await?;
    let request = QueryRequest::new(
        r#"INSERT INTO "User" (id, firstName, lastName, age) VALUES (?, ?, ?, ?)"#,
        vec![
            SpannerValue::Text(Uuid::new_v4().to_string()),
            SpannerValue::Text(first.to_string()),
            SpannerValue::Text(last.to_string()),
            SpannerValue::Int(age),
        ],
        OperationKind::from_builder_method("insert"),
    );

    let outcome = adapter.query(&mut conn, &request).await;
    // release on both paths before surfacing the query outcome
    let released = adapter.release_connection(conn).await;
    let result = outcome?;
    released?;
    Ok(result.row_count)
}
