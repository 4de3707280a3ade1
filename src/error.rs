use thiserror::Error;

/// Errors surfaced by the adapter.
///
/// The variants track where in the request lifecycle a failure happened:
/// parameter translation, connection acquire/release, or the RPC
/// execution/commit path. The adapter never retries and never reconnects;
/// every failure is surfaced to the immediate caller.
#[derive(Debug, Error)]
pub enum SpannerAdapterError {
    /// Placeholder count and binding count disagree. The request never
    /// reaches the backing service.
    #[error("parameter arity mismatch: {0}")]
    ArityMismatch(String),

    /// Transport-level failure while starting a transaction.
    #[error("connection acquire error: {0}")]
    AcquireFailed(String),

    /// Transport-level failure while ending a connection or closing the
    /// backing handle.
    #[error("connection release error: {0}")]
    ReleaseFailed(String),

    /// The run RPC failed. The owning transaction is left open; the caller
    /// must still release the connection.
    #[error("query execution error: {0}")]
    QueryFailed(String),

    /// The commit RPC failed after a successful run. Row data produced by
    /// the run is discarded and the mutation's durability is unconfirmed.
    #[error("commit error: {0}")]
    CommitFailed(String),

    /// The schema-mutation RPC failed.
    #[error("schema change error: {0}")]
    SchemaFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("other database error: {0}")]
    Other(String),
}
