//! Adapter configuration.

use serde::{Deserialize, Serialize};

/// Connection coordinates for one logical database on the backing service.
///
/// All fields are opaque strings; the adapter performs no validation. The
/// optional endpoint points the transport at an emulator or non-default API
/// host; it is an explicit value, not ambient environment state.
///
/// ```rust
/// use spanner_adapter::prelude::*;
///
/// let config = SpannerConfig::new("test-project", "test-instance", "test-db")
///     .with_endpoint("localhost:9010");
/// assert_eq!(
///     config.database_path(),
///     "projects/test-project/instances/test-instance/databases/test-db"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpannerConfig {
    /// Project identifier.
    pub project_id: String,
    /// Logical instance identifier.
    pub instance: String,
    /// Logical database identifier.
    pub database: String,
    /// RPC endpoint address, e.g. `localhost:9010` for an emulator.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl SpannerConfig {
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        instance: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            instance: instance.into(),
            database: database.into(),
            endpoint: None,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Canonical resource name of the database, used for log correlation.
    #[must_use]
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project_id, self.instance, self.database
        )
    }
}
