//! Convenient imports for common functionality.

pub use crate::adapter::{QueryBuilderDriver, SpannerAdapter};
pub use crate::config::SpannerConfig;
pub use crate::connection::SpannerConnection;
pub use crate::error::SpannerAdapterError;
pub use crate::executor::execute;
pub use crate::results::{QueryResult, ResultSet, SpannerRow};
pub use crate::rpc::{RpcError, RpcRows, SpannerDatabase, SpannerTransaction};
pub use crate::translation::{TranslatedQuery, translate};
pub use crate::types::{OperationKind, QueryRequest, SpannerValue};
