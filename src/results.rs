use std::sync::Arc;
use std::time::Duration;

use crate::types::SpannerValue;

/// A single row from the backing service, with column names shared across
/// the whole result set.
#[derive(Debug, Clone)]
pub struct SpannerRow {
    column_names: Arc<Vec<String>>,
    values: Vec<SpannerValue>,
}

impl SpannerRow {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<SpannerValue>) -> Self {
        Self {
            column_names,
            values,
        }
    }

    /// Get a cell by column name, or None if the column is absent.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&SpannerValue> {
        self.column_names
            .iter()
            .position(|col| col == column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a cell by position, or None if the index is out of bounds.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&SpannerValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn values(&self) -> &[SpannerValue] {
        &self.values
    }
}

/// Ordered rows plus the affected-row count reported by the service.
///
/// Zero rows is a valid result, not an error.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the run call, in service order.
    pub rows: Vec<SpannerRow>,
    /// Affected-row count for DML statements.
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            rows: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
        }
    }

    /// Set the column names shared by all rows.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_names = Some(column_names);
    }

    #[must_use]
    pub fn column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append a row sharing this result set's column names.
    pub fn add_row_values(&mut self, values: Vec<SpannerValue>) {
        let column_names = self.column_names.clone().unwrap_or_default();
        self.rows.push(SpannerRow::new(column_names, values));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builder-facing response shape for one executed query.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Rows mapped from the RPC payload, in service order.
    pub result_set: ResultSet,
    /// Row count the builder should report: returned rows for row-returning
    /// statements, affected rows for DML.
    pub row_count: usize,
    /// Always zero; the service reports no warnings.
    pub warning_count: u32,
    /// Wall-clock time spent translating, running, and committing.
    pub duration: Duration,
    /// Correlation token from the request, echoed back.
    pub correlation_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lookup_by_name_and_index() {
        let mut rs = ResultSet::with_capacity(1);
        rs.set_column_names(Arc::new(vec!["id".to_string(), "age".to_string()]));
        rs.add_row_values(vec![SpannerValue::Text("u1".into()), SpannerValue::Int(30)]);

        let row = &rs.rows[0];
        assert_eq!(row.get("age"), Some(&SpannerValue::Int(30)));
        assert_eq!(row.get_by_index(0), Some(&SpannerValue::Text("u1".into())));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn empty_result_set_is_valid() {
        let rs = ResultSet::default();
        assert!(rs.is_empty());
        assert_eq!(rs.len(), 0);
        assert_eq!(rs.rows_affected, 0);
    }
}
