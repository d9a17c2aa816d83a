//! Resolves a `SourceArgs` into a loaded [`DependencyGraph`] and fulfils the
//! `listCatalogs`/`listSchemas` discovery interface.
//!
//! File- and dataset-backed sources share a synthetic catalog named `test`
//! whose schemas are the packaged dataset names, per the host-interface
//! description; a warehouse-backed source answers discovery with live
//! `SHOW CATALOGS`/`SHOW SCHEMAS` queries.

use crate::cli::SourceArgs;
use crate::datasets;
use crate::input::{self, ViewsFile};
#[cfg(feature = "warehouse")]
use crate::warehouse;
use anyhow::{anyhow, bail, Result};
use viewmapper_core::{CoreError, DependencyGraph};

const SYNTHETIC_CATALOG: &str = "test";

fn views_file_from_source(source: &SourceArgs) -> Result<ViewsFile> {
    if let Some(path) = &source.file {
        input::read_views_file(path)
    } else if let Some(name) = &source.dataset {
        datasets::load(name)
    } else {
        bail!("no source given: pass --file, --dataset, or --warehouse-host")
    }
}

fn graph_from_views(views: ViewsFile) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for view in views.views {
        if let Err(err) = graph.add_view(&view.name, &view.sql) {
            tracing::warn!(view = %view.name, error = %err, "skipping view that failed to parse");
        }
    }
    graph
}

#[cfg(feature = "warehouse")]
fn warehouse_client(source: &SourceArgs) -> Result<Option<warehouse::PrustoWarehouseClient>> {
    match &source.warehouse_host {
        Some(host) => Ok(Some(warehouse::PrustoWarehouseClient::connect(
            host,
            source.warehouse_port,
            &source.warehouse_user,
        )?)),
        None => Ok(None),
    }
}

#[cfg(not(feature = "warehouse"))]
fn warehouse_client(_source: &SourceArgs) -> Result<Option<()>> {
    Ok(None)
}

/// Load a dependency graph from whichever source `SourceArgs` specifies.
pub fn load_graph(source: &SourceArgs) -> Result<DependencyGraph> {
    if let Some(client) = warehouse_client(source)? {
        return load_from_warehouse(source, &client);
    }
    Ok(graph_from_views(views_file_from_source(source)?))
}

#[cfg(feature = "warehouse")]
fn load_from_warehouse(
    source: &SourceArgs,
    client: &warehouse::PrustoWarehouseClient,
) -> Result<DependencyGraph> {
    use warehouse::WarehouseClient;

    let catalog = source
        .catalog
        .as_deref()
        .ok_or_else(|| anyhow!("--catalog is required for warehouse sources"))?;
    let schema = source
        .schema
        .as_deref()
        .ok_or_else(|| anyhow!("--schema is required for warehouse sources"))?;

    let rows = client.fetch_views(catalog, schema)?;
    if rows.is_empty() {
        return Err(CoreError::NoViewsFound {
            catalog: catalog.to_string(),
            schema: schema.to_string(),
        }
        .into());
    }

    let mut graph = DependencyGraph::new();
    for (table_name, view_definition) in rows {
        let name = format!("{catalog}.{schema}.{table_name}");
        if let Err(err) = graph.add_view(&name, &view_definition) {
            tracing::warn!(view = %name, error = %err, "skipping view that failed to parse");
        }
    }
    Ok(graph)
}

#[cfg(not(feature = "warehouse"))]
fn load_from_warehouse(_source: &SourceArgs, _client: &()) -> Result<DependencyGraph> {
    unreachable!("warehouse feature disabled")
}

/// `listCatalogs()`.
pub fn list_catalogs(source: &SourceArgs) -> Result<Vec<String>> {
    if let Some(client) = warehouse_client(source)? {
        return list_catalogs_warehouse(&client);
    }
    Ok(vec![SYNTHETIC_CATALOG.to_string()])
}

#[cfg(feature = "warehouse")]
fn list_catalogs_warehouse(client: &warehouse::PrustoWarehouseClient) -> Result<Vec<String>> {
    use warehouse::WarehouseClient;
    client.list_catalogs()
}

#[cfg(not(feature = "warehouse"))]
fn list_catalogs_warehouse(_client: &()) -> Result<Vec<String>> {
    unreachable!("warehouse feature disabled")
}

/// `listSchemas(catalog)`.
pub fn list_schemas(source: &SourceArgs, catalog: Option<&str>) -> Result<Vec<String>> {
    if let Some(client) = warehouse_client(source)? {
        let catalog = catalog.ok_or_else(|| {
            CoreError::InvalidArgument {
                argument: "catalog".to_string(),
                reason: "listSchemas requires a catalog when the connection is not bound to one"
                    .to_string(),
            }
        })?;
        return list_schemas_warehouse(&client, catalog);
    }
    Ok(datasets::names())
}

#[cfg(feature = "warehouse")]
fn list_schemas_warehouse(
    client: &warehouse::PrustoWarehouseClient,
    catalog: &str,
) -> Result<Vec<String>> {
    use warehouse::WarehouseClient;
    client.list_schemas(catalog)
}

#[cfg(not(feature = "warehouse"))]
fn list_schemas_warehouse(_client: &(), _catalog: &str) -> Result<Vec<String>> {
    unreachable!("warehouse feature disabled")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_for_dataset(name: &str) -> SourceArgs {
        SourceArgs {
            file: None,
            dataset: Some(name.to_string()),
            #[cfg(feature = "warehouse")]
            warehouse_host: None,
            #[cfg(feature = "warehouse")]
            warehouse_port: 8080,
            #[cfg(feature = "warehouse")]
            warehouse_user: "viewmapper".to_string(),
            catalog: None,
            schema: None,
        }
    }

    #[test]
    fn loads_graph_from_packaged_dataset() {
        let graph = load_graph(&source_for_dataset("simple_ecommerce")).unwrap();
        assert!(graph.vertex_count() >= 11);
    }

    #[test]
    fn list_catalogs_is_synthetic_for_dataset_sources() {
        let catalogs = list_catalogs(&source_for_dataset("simple_ecommerce")).unwrap();
        assert_eq!(catalogs, vec!["test".to_string()]);
    }

    #[test]
    fn list_schemas_lists_packaged_dataset_names() {
        let schemas = list_schemas(&source_for_dataset("simple_ecommerce"), Some("test")).unwrap();
        assert!(schemas.contains(&"moderate_analytics".to_string()));
    }

    #[test]
    fn no_source_given_is_an_error() {
        let source = SourceArgs {
            file: None,
            dataset: None,
            #[cfg(feature = "warehouse")]
            warehouse_host: None,
            #[cfg(feature = "warehouse")]
            warehouse_port: 8080,
            #[cfg(feature = "warehouse")]
            warehouse_user: "viewmapper".to_string(),
            catalog: None,
            schema: None,
        };
        assert!(load_graph(&source).is_err());
    }
}
