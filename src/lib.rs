//! Driver adapter that lets positional-parameter SQL builders run against a
//! Spanner-style transactional RPC database: `?` placeholders become named
//! `@paramN` parameters, every logical connection is exactly one
//! transaction, and mutating statements are committed as part of the query
//! call.

pub mod adapter;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod results;
pub mod rpc;
pub mod translation;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use adapter::{QueryBuilderDriver, SpannerAdapter};
pub use config::SpannerConfig;
pub use connection::SpannerConnection;
pub use error::SpannerAdapterError;
pub use executor::{build_result_set, execute};
pub use results::{QueryResult, ResultSet, SpannerRow};
pub use rpc::{RpcError, RpcRows, SpannerDatabase, SpannerTransaction};
pub use translation::{TranslatedQuery, translate};
pub use types::{OperationKind, QueryRequest, SpannerValue};
