#![cfg(feature = "test-utils")]

use std::sync::Arc;

use spanner_adapter::prelude::*;
use spanner_adapter::test_utils::{MockCall, MockDatabase};
use tokio::runtime::Runtime;

fn adapter_over(db: &MockDatabase) -> SpannerAdapter {
    let config = SpannerConfig::new("test-project", "test-instance", "test-db");
    SpannerAdapter::new(config, Arc::new(db.clone()))
}

fn insert_request() -> QueryRequest {
    QueryRequest::new(
        "INSERT INTO User (id, age) VALUES (?, ?)",
        vec![SpannerValue::Text("u1".into()), SpannerValue::Int(30)],
        OperationKind::Insert,
    )
}

#[test]
fn commit_failure_discards_result() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = MockDatabase::new();
        let adapter = adapter_over(&db);
        db.fail_commit("deadline exceeded");

        let mut conn = adapter.acquire_connection().await?;
        let err = adapter
            .query(&mut conn, &insert_request())
            .await
            .expect_err("commit failure must fail the whole operation");
        assert!(matches!(err, SpannerAdapterError::CommitFailed(_)));

        // the run succeeded and the commit was attempted before failing
        let calls = db.calls();
        assert!(matches!(calls[1], MockCall::TxRun { .. }));
        assert!(matches!(calls[2], MockCall::Commit));

        // the retired handle refuses further statements
        let err = adapter
            .query(
                &mut conn,
                &QueryRequest::new("SELECT 1", vec![], OperationKind::Select),
            )
            .await
            .expect_err("handle must be unusable after a failed commit");
        assert!(matches!(err, SpannerAdapterError::QueryFailed(_)));

        // release still works
        adapter.release_connection(conn).await?;
        assert!(matches!(db.calls().last(), Some(MockCall::End)));
        Ok::<(), SpannerAdapterError>(())
    })?;
    Ok(())
}

#[test]
fn run_failure_leaves_transaction_open_and_releasable() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = MockDatabase::new();
        let adapter = adapter_over(&db);
        db.push_run_error("table not found: User");

        let mut conn = adapter.acquire_connection().await?;
        let err = adapter
            .query(&mut conn, &insert_request())
            .await
            .expect_err("run failure must surface");
        assert!(matches!(err, SpannerAdapterError::QueryFailed(_)));

        // no commit was attempted after the failed run
        assert!(!db.calls().iter().any(|c| matches!(c, MockCall::Commit)));

        adapter.release_connection(conn).await?;
        assert!(matches!(db.calls().last(), Some(MockCall::End)));
        Ok::<(), SpannerAdapterError>(())
    })?;
    Ok(())
}

#[test]
fn reuse_after_commit_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = MockDatabase::new();
        let adapter = adapter_over(&db);

        let mut conn = adapter.acquire_connection().await?;
        adapter.query(&mut conn, &insert_request()).await?;
        assert!(conn.is_committed());

        let err = adapter
            .query(&mut conn, &insert_request())
            .await
            .expect_err("second statement on a committed handle must fail");
        assert!(matches!(err, SpannerAdapterError::QueryFailed(_)));

        // still exactly one commit on the wire
        let commits = db
            .calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Commit))
            .count();
        assert_eq!(commits, 1);

        adapter.release_connection(conn).await?;
        Ok::<(), SpannerAdapterError>(())
    })?;
    Ok(())
}
