//! Transaction-backed logical connections.

use std::collections::HashMap;

use tracing::debug;

use crate::error::SpannerAdapterError;
use crate::rpc::{RpcRows, SpannerDatabase, SpannerTransaction};
use crate::types::SpannerValue;

/// The unit the query builder treats as a "connection": exactly one live
/// transaction on the backing service.
///
/// A connection is acquired with [`SpannerConnection::acquire`], used for
/// zero or more queries, committed at most once, and released with
/// [`SpannerConnection::end`] (which consumes it, so a released handle
/// cannot be touched again). After a commit attempt, successful or not, the
/// handle refuses further statements with a defined error instead of
/// leaving their outcome to the service.
pub struct SpannerConnection {
    tx: Box<dyn SpannerTransaction>,
    committed: bool,
}

impl std::fmt::Debug for SpannerConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpannerConnection")
            .field("committed", &self.committed)
            .finish_non_exhaustive()
    }
}

impl SpannerConnection {
    /// Start a new transaction and wrap it as a logical connection.
    ///
    /// Resolves only after the backing service has acknowledged the
    /// transaction start. No retry.
    ///
    /// # Errors
    ///
    /// Returns `SpannerAdapterError::AcquireFailed` on any transport-level
    /// failure while starting the transaction.
    pub async fn acquire(db: &dyn SpannerDatabase) -> Result<Self, SpannerAdapterError> {
        let tx = db.begin_transaction().await.map_err(|e| {
            SpannerAdapterError::AcquireFailed(format!("could not start transaction: {e}"))
        })?;
        debug!("transaction acquired");
        Ok(Self {
            tx,
            committed: false,
        })
    }

    /// Run one translated statement inside this connection's transaction.
    ///
    /// # Errors
    ///
    /// Returns `SpannerAdapterError::QueryFailed` when the run RPC fails or
    /// when the transaction has already been committed. On RPC failure the
    /// transaction is left open; the caller must still release the
    /// connection.
    pub async fn run(
        &mut self,
        sql: &str,
        params: &HashMap<String, SpannerValue>,
    ) -> Result<RpcRows, SpannerAdapterError> {
        if self.committed {
            return Err(SpannerAdapterError::QueryFailed(
                "transaction already committed; acquire a new connection".to_string(),
            ));
        }
        self.tx
            .run(sql, params)
            .await
            .map_err(|e| SpannerAdapterError::QueryFailed(format!("run call failed: {e}")))
    }

    /// Commit the transaction. Explicit step; the executor calls it
    /// automatically after mutating statements.
    ///
    /// # Errors
    ///
    /// Returns `SpannerAdapterError::CommitFailed` when the commit RPC
    /// fails or the transaction was already committed. A failed commit also
    /// retires the handle: the mutation may or may not have applied, and
    /// further statements are refused.
    pub async fn commit(&mut self) -> Result<(), SpannerAdapterError> {
        if self.committed {
            return Err(SpannerAdapterError::CommitFailed(
                "transaction already committed".to_string(),
            ));
        }
        self.committed = true;
        self.tx
            .commit()
            .await
            .map_err(|e| SpannerAdapterError::CommitFailed(format!("commit call failed: {e}")))
    }

    /// Whether a commit has been attempted on this connection.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// End the underlying transport resource. Always callable, including
    /// after failed queries or commits.
    ///
    /// # Errors
    ///
    /// Returns `SpannerAdapterError::ReleaseFailed` when the close reports
    /// an error.
    pub async fn end(mut self) -> Result<(), SpannerAdapterError> {
        self.tx
            .end()
            .await
            .map_err(|e| SpannerAdapterError::ReleaseFailed(format!("end call failed: {e}")))
    }
}
