use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values that cross the adapter boundary, either as query bindings or as
/// row cells coming back from the backing service.
///
/// One enum for both directions keeps helper code from branching on
/// direction-specific types:
/// ```rust
/// use spanner_adapter::prelude::*;
///
/// let bindings = vec![
///     SpannerValue::Int(30),
///     SpannerValue::Text("Smith".into()),
/// ];
/// # let _ = bindings;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SpannerValue {
    /// INT64
    Int(i64),
    /// FLOAT64
    Float(f64),
    /// STRING
    Text(String),
    /// BOOL
    Bool(bool),
    /// TIMESTAMP
    Timestamp(NaiveDateTime),
    /// JSON
    Json(JsonValue),
    /// BYTES
    Bytes(Vec<u8>),
    /// NULL
    Null,
}

impl SpannerValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// The statement kind the builder reports for a query.
///
/// Mutating kinds require a commit to durably apply; selects and schema
/// statements run outside the commit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Select,
    Insert,
    Update,
    Delete,
    Ddl,
}

impl OperationKind {
    /// Whether a successful run of this kind must be followed by a commit.
    #[must_use]
    pub fn is_mutating(self) -> bool {
        matches!(self, Self::Insert | Self::Update | Self::Delete)
    }

    /// Map the method string a builder framework attaches to its query
    /// context onto a kind. Unknown methods are treated as reads.
    #[must_use]
    pub fn from_builder_method(method: &str) -> Self {
        match method {
            "insert" => Self::Insert,
            "update" => Self::Update,
            "del" | "delete" => Self::Delete,
            "ddl" => Self::Ddl,
            _ => Self::Select,
        }
    }
}

/// A builder-issued query: positional-parameter SQL plus ordered bindings.
///
/// Invariant: the number of `?` placeholders in `sql` equals
/// `bindings.len()`; the translator rejects anything else before an RPC is
/// issued.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// SQL with `?` positional placeholders.
    pub sql: String,
    /// Bound values, in placeholder order.
    pub bindings: Vec<SpannerValue>,
    /// Statement kind; drives the commit decision.
    pub kind: OperationKind,
    /// Opaque correlation token, echoed back on the result.
    pub correlation_id: Option<String>,
}

impl QueryRequest {
    pub fn new(sql: impl Into<String>, bindings: Vec<SpannerValue>, kind: OperationKind) -> Self {
        Self {
            sql: sql.into(),
            bindings,
            kind,
            correlation_id: None,
        }
    }

    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutating_kinds() {
        assert!(OperationKind::Insert.is_mutating());
        assert!(OperationKind::Update.is_mutating());
        assert!(OperationKind::Delete.is_mutating());
        assert!(!OperationKind::Select.is_mutating());
        assert!(!OperationKind::Ddl.is_mutating());
    }

    #[test]
    fn builder_method_mapping() {
        assert_eq!(
            OperationKind::from_builder_method("insert"),
            OperationKind::Insert
        );
        assert_eq!(
            OperationKind::from_builder_method("del"),
            OperationKind::Delete
        );
        // reads and anything unrecognized stay off the commit path
        assert_eq!(
            OperationKind::from_builder_method("first"),
            OperationKind::Select
        );
        assert_eq!(
            OperationKind::from_builder_method("pluck"),
            OperationKind::Select
        );
    }
}
