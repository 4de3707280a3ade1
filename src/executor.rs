//! Query execution: translate, run, conditionally commit, map results.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error};

use crate::connection::SpannerConnection;
use crate::error::SpannerAdapterError;
use crate::results::{QueryResult, ResultSet};
use crate::rpc::RpcRows;
use crate::translation::translate;
use crate::types::QueryRequest;

/// Map a raw RPC payload into a `ResultSet`, preserving row order.
///
/// # Errors
///
/// Returns `SpannerAdapterError` when the affected-row count cannot be
/// converted to `usize`.
pub fn build_result_set(payload: RpcRows) -> Result<ResultSet, SpannerAdapterError> {
    let mut result_set = ResultSet::with_capacity(payload.rows.len());
    result_set.set_column_names(Arc::new(payload.columns));
    for values in payload.rows {
        result_set.add_row_values(values);
    }
    result_set.rows_affected = usize::try_from(payload.rows_affected).map_err(|e| {
        SpannerAdapterError::QueryFailed(format!("affected row count conversion error: {e}"))
    })?;
    Ok(result_set)
}

/// Execute one builder-issued query on a logical connection.
///
/// Mutating kinds (insert/update/delete) are committed immediately after a
/// successful run; select and DDL kinds never touch the commit path. When
/// the commit fails, row data already produced by the run is discarded and
/// the whole operation fails: the caller must not conclude the mutation did
/// or did not apply.
///
/// # Errors
///
/// * `SpannerAdapterError::ArityMismatch`: placeholder and binding counts
///   disagree; no RPC is issued.
/// * `SpannerAdapterError::QueryFailed`: the run RPC failed; the
///   transaction is left open and the caller must still release it.
/// * `SpannerAdapterError::CommitFailed`: the commit RPC failed after a
///   successful run.
pub async fn execute(
    conn: &mut SpannerConnection,
    request: &QueryRequest,
) -> Result<QueryResult, SpannerAdapterError> {
    let started = Instant::now();

    let translated = translate(&request.sql, &request.bindings)?;
    debug!(
        sql = %translated.sql,
        params = translated.params.len(),
        kind = ?request.kind,
        "executing query"
    );

    let payload = match conn.run(&translated.sql, &translated.params).await {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "query execution failed");
            return Err(e);
        }
    };

    if request.kind.is_mutating() {
        if let Err(e) = conn.commit().await {
            error!(error = %e, "commit failed; discarding query result");
            return Err(e);
        }
        debug!("transaction committed");
    }

    let result_set = build_result_set(payload)?;
    let row_count = if result_set.rows.is_empty() {
        result_set.rows_affected
    } else {
        result_set.rows.len()
    };

    Ok(QueryResult {
        result_set,
        row_count,
        warning_count: 0,
        duration: started.elapsed(),
        correlation_id: request.correlation_id.clone(),
    })
}
