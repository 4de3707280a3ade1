//! The backing database's RPC contract.
//!
//! The adapter core is generic over these traits. A production
//! implementation wraps the service's gRPC surface; the `test-utils` mock
//! implements them in memory. Implementations report transport failures as
//! [`RpcError`]; the adapter maps those into its own error taxonomy at each
//! call site.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::SpannerValue;

/// Transport-level failure reported by an RPC implementation.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct RpcError(pub String);

/// Raw row payload returned by a run call, before the executor maps it into
/// the builder-facing shape.
#[derive(Debug, Clone, Default)]
pub struct RpcRows {
    /// Column names, in select order. Empty for plain DML.
    pub columns: Vec<String>,
    /// Row cells, in service order.
    pub rows: Vec<Vec<SpannerValue>>,
    /// Affected-row count reported for DML statements.
    pub rows_affected: u64,
}

impl RpcRows {
    /// Payload for a DML statement that touched `rows_affected` rows.
    #[must_use]
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }

    /// Payload for a row-returning statement.
    #[must_use]
    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<SpannerValue>>) -> Self {
        Self {
            columns,
            rows,
            rows_affected: 0,
        }
    }
}

/// One in-flight read-write transaction on the backing service.
///
/// A handle is owned by exactly one logical connection and never shared;
/// statements issued through it execute in call order.
#[async_trait]
pub trait SpannerTransaction: Send {
    /// Run one SQL statement with named parameters inside this transaction.
    async fn run(
        &mut self,
        sql: &str,
        params: &HashMap<String, SpannerValue>,
    ) -> Result<RpcRows, RpcError>;

    /// Commit the transaction's mutations.
    async fn commit(&mut self) -> Result<(), RpcError>;

    /// End the underlying transport resource without committing.
    async fn end(&mut self) -> Result<(), RpcError>;
}

/// Handle to one logical database on the backing service.
#[async_trait]
pub trait SpannerDatabase: Send + Sync {
    /// Start a read-write transaction, resolving once the service has
    /// acknowledged it.
    async fn begin_transaction(&self) -> Result<Box<dyn SpannerTransaction>, RpcError>;

    /// Run a single-use statement outside any explicit transaction (probe
    /// and catalog queries).
    async fn run(
        &self,
        sql: &str,
        params: &HashMap<String, SpannerValue>,
    ) -> Result<RpcRows, RpcError>;

    /// Apply a batch of DDL statements through the schema-mutation call.
    async fn update_schema(&self, statements: &[String]) -> Result<(), RpcError>;

    /// Close the database handle. Closing twice is not guaranteed to be
    /// safe; calling any other method afterwards has undefined behavior.
    async fn close(&self) -> Result<(), RpcError>;
}
