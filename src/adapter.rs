//! The top-level client a query-builder framework drives.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::config::SpannerConfig;
use crate::connection::SpannerConnection;
use crate::error::SpannerAdapterError;
use crate::executor;
use crate::results::{QueryResult, ResultSet};
use crate::rpc::SpannerDatabase;
use crate::types::{QueryRequest, SpannerValue};

/// Catalog query listing user tables. The backing service keeps user tables
/// under the empty catalog and schema.
pub const LIST_TABLES_SQL: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_catalog = '' AND table_schema = ''";

/// Probe statement for connectivity checks.
pub const PROBE_SQL: &str = "SELECT 1";

/// The connection-lifecycle capability a query-builder framework requires
/// from a driver adapter.
///
/// The framework is responsible for pairing every successful
/// `acquire_connection` with exactly one `release_connection`, on every
/// exit path including failures; a leaked transaction is a caller bug the
/// adapter does not detect.
#[async_trait]
pub trait QueryBuilderDriver {
    /// Start a brand-new transaction and hand it out as a logical
    /// connection. No pooling: every call reaches the backing service.
    async fn acquire_connection(&self) -> Result<SpannerConnection, SpannerAdapterError>;

    /// Release a logical connection, ending its transport resource.
    async fn release_connection(&self, conn: SpannerConnection) -> Result<(), SpannerAdapterError>;

    /// Execute one builder-issued query on the given connection.
    async fn query(
        &self,
        conn: &mut SpannerConnection,
        request: &QueryRequest,
    ) -> Result<QueryResult, SpannerAdapterError>;

    /// Close the backing database handle. Not guaranteed idempotent:
    /// calling twice has undefined behavior.
    async fn destroy(&self) -> Result<(), SpannerAdapterError>;
}

/// Driver adapter for a Spanner-style transactional RPC database.
///
/// Owns the backing database handle for its whole lifetime; the handle is
/// read-only after construction. Constructed ready, closed by
/// [`QueryBuilderDriver::destroy`], never reopened.
pub struct SpannerAdapter {
    config: SpannerConfig,
    database: Arc<dyn SpannerDatabase>,
}

impl SpannerAdapter {
    /// Build an adapter over an already-connected database handle.
    #[must_use]
    pub fn new(config: SpannerConfig, database: Arc<dyn SpannerDatabase>) -> Self {
        debug!(database = %config.database_path(), "adapter ready");
        Self { config, database }
    }

    #[must_use]
    pub fn config(&self) -> &SpannerConfig {
        &self.config
    }

    /// Issue a trivial read-only probe and report whether it succeeded.
    /// Failures are logged, never propagated.
    pub async fn test_connection(&self) -> bool {
        match self.database.run(PROBE_SQL, &HashMap::new()).await {
            Ok(_) => {
                debug!("connection test successful");
                true
            }
            Err(e) => {
                error!(error = %e, "connection test failed");
                false
            }
        }
    }

    /// List user table names from the catalog. An empty catalog yields an
    /// empty result set, not an error.
    ///
    /// # Errors
    ///
    /// Returns `SpannerAdapterError::QueryFailed` when the catalog query
    /// fails.
    pub async fn list_tables(&self) -> Result<ResultSet, SpannerAdapterError> {
        let payload = self
            .database
            .run(LIST_TABLES_SQL, &HashMap::new())
            .await
            .map_err(|e| {
                error!(error = %e, "table listing failed");
                SpannerAdapterError::QueryFailed(format!("table listing failed: {e}"))
            })?;
        executor::build_result_set(payload)
    }

    /// Whether the named table exists in the catalog.
    ///
    /// # Errors
    ///
    /// Propagates `list_tables` failures.
    pub async fn has_table(&self, table: &str) -> Result<bool, SpannerAdapterError> {
        let tables = self.list_tables().await?;
        Ok(tables
            .rows
            .iter()
            .any(|row| row.get_by_index(0).and_then(SpannerValue::as_text) == Some(table)))
    }

    /// Apply a batch of DDL statements through the schema-mutation RPC.
    ///
    /// # Errors
    ///
    /// Returns `SpannerAdapterError::SchemaFailed` when the RPC fails.
    pub async fn update_schema(&self, statements: &[String]) -> Result<(), SpannerAdapterError> {
        self.database.update_schema(statements).await.map_err(|e| {
            error!(error = %e, "schema update failed");
            SpannerAdapterError::SchemaFailed(format!("schema update failed: {e}"))
        })
    }
}

#[async_trait]
impl QueryBuilderDriver for SpannerAdapter {
    async fn acquire_connection(&self) -> Result<SpannerConnection, SpannerAdapterError> {
        SpannerConnection::acquire(self.database.as_ref()).await
    }

    async fn release_connection(
        &self,
        conn: SpannerConnection,
    ) -> Result<(), SpannerAdapterError> {
        conn.end().await
    }

    async fn query(
        &self,
        conn: &mut SpannerConnection,
        request: &QueryRequest,
    ) -> Result<QueryResult, SpannerAdapterError> {
        executor::execute(conn, request).await
    }

    async fn destroy(&self) -> Result<(), SpannerAdapterError> {
        debug!(database = %self.config.database_path(), "closing database handle");
        self.database
            .close()
            .await
            .map_err(|e| SpannerAdapterError::ReleaseFailed(format!("close failed: {e}")))
    }
}
