#![cfg(feature = "test-utils")]

use std::sync::Arc;

use spanner_adapter::prelude::*;
use spanner_adapter::test_utils::{MockCall, MockDatabase};
use tokio::runtime::Runtime;
use uuid::Uuid;

const CREATE_USER_TABLE: &str = "CREATE TABLE User (
    id STRING(36) NOT NULL,
    firstName STRING(100),
    lastName STRING(100),
    age INT64
) PRIMARY KEY (id)";

fn adapter_over(db: &MockDatabase) -> SpannerAdapter {
    let config =
        SpannerConfig::new("test-project", "test-instance", "test-db").with_endpoint("localhost:9010");
    SpannerAdapter::new(config, Arc::new(db.clone()))
}

#[test]
fn empty_catalog_lists_no_tables() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = MockDatabase::new();
        let adapter = adapter_over(&db);

        let tables = adapter.list_tables().await?;
        assert!(tables.rows.is_empty());
        assert!(!adapter.has_table("User").await?);
        Ok::<(), SpannerAdapterError>(())
    })?;
    Ok(())
}

#[test]
fn test_connection_reports_failure_without_error() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = MockDatabase::new();
        let adapter = adapter_over(&db);

        assert!(adapter.test_connection().await);

        db.push_run_error("endpoint unreachable");
        assert!(!adapter.test_connection().await);
    });
    Ok(())
}

#[test]
fn bootstrap_flow_probe_create_list_insert() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = MockDatabase::new();
        let adapter = adapter_over(&db);

        assert!(adapter.test_connection().await);

        if !adapter.has_table("User").await? {
            adapter
                .update_schema(&[CREATE_USER_TABLE.to_string()])
                .await?;
        }
        assert!(adapter.has_table("User").await?);

        // creating again is skipped by the existence check
        if !adapter.has_table("User").await? {
            panic!("table should already exist");
        }

        let mut conn = adapter.acquire_connection().await?;
        let kind = OperationKind::from_builder_method("insert");
        let request = QueryRequest::new(
            r#"INSERT INTO "User" (id, firstName, lastName, age) VALUES (?, ?, ?, ?)"#,
            vec![
                SpannerValue::Text(Uuid::new_v4().to_string()),
                SpannerValue::Text("Alice".into()),
                SpannerValue::Text("Smith".into()),
                SpannerValue::Int(30),
            ],
            kind,
        );
        let result = adapter.query(&mut conn, &request).await?;
        assert_eq!(result.row_count, 1);
        adapter.release_connection(conn).await?;

        adapter.destroy().await?;
        assert!(db.calls().contains(&MockCall::Close));

        println!("bootstrap flow successful");
        Ok::<(), SpannerAdapterError>(())
    })?;
    Ok(())
}

#[test]
fn scripted_rows_map_back_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = MockDatabase::new();
        let adapter = adapter_over(&db);

        db.push_run_response(RpcRows::with_rows(
            vec!["id".to_string(), "firstName".to_string()],
            vec![
                vec![SpannerValue::Text("u1".into()), SpannerValue::Text("Alice".into())],
                vec![SpannerValue::Text("u2".into()), SpannerValue::Text("Bob".into())],
            ],
        ));

        let mut conn = adapter.acquire_connection().await?;
        let request = QueryRequest::new("SELECT * FROM User", vec![], OperationKind::Select);
        let result = adapter.query(&mut conn, &request).await?;
        adapter.release_connection(conn).await?;

        assert_eq!(result.row_count, 2);
        let rows = &result.result_set.rows;
        assert_eq!(
            rows[0].get("firstName"),
            Some(&SpannerValue::Text("Alice".into()))
        );
        assert_eq!(rows[1].get("id"), Some(&SpannerValue::Text("u2".into())));
        Ok::<(), SpannerAdapterError>(())
    })?;
    Ok(())
}
