//! Live warehouse introspection.
//!
//! Behind the `warehouse` feature, this module fetches view definitions and
//! fulfils the discovery interface (`listCatalogs`/`listSchemas`) against a
//! real Trino cluster. Without the feature, warehouse-backed `SourceArgs`
//! fields don't exist and the CLI only ever sees file/dataset sources.

#[cfg(feature = "warehouse")]
mod prusto_client;

#[cfg(feature = "warehouse")]
pub use prusto_client::PrustoWarehouseClient;

/// A provider of view definitions and catalog/schema discovery, fulfilled
/// either by a live warehouse connection or (in the CLI's non-warehouse
/// paths) a synthetic provider over packaged datasets.
pub trait WarehouseClient {
    /// Rows of `(table_name, view_definition)` from `information_schema.views`.
    fn fetch_views(&self, catalog: &str, schema: &str) -> anyhow::Result<Vec<(String, String)>>;

    /// `SHOW CATALOGS`.
    fn list_catalogs(&self) -> anyhow::Result<Vec<String>>;

    /// `SHOW SCHEMAS FROM <catalog>`.
    fn list_schemas(&self, catalog: &str) -> anyhow::Result<Vec<String>>;
}

/// Connection descriptor with no credentials, safe to print in diagnostics.
/// Trino's `ClientBuilder` takes a bare username, never a password, so there
/// is nothing to redact beyond the host/port/user triple itself.
pub fn describe_connection(user: &str, host: &str, port: u16) -> String {
    format!("trino://{user}@{host}:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_connection_has_no_secrets() {
        let d = describe_connection("viewmapper", "warehouse.internal", 8080);
        assert_eq!(d, "trino://viewmapper@warehouse.internal:8080");
    }
}
