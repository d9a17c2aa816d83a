//! CLI argument parsing using clap.
//!
//! This binary stands in for the reasoning-loop host described by the tool
//! dispatch contract: it loads a graph once, then either runs a single
//! named tool call or serves a batch of tool calls read as JSON Lines from
//! stdin. It never runs the reasoning loop itself — that piece is outside
//! this crate's scope.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "viewmapper")]
#[command(about = "Load a warehouse's view definitions and query its dependency graph", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load views, then dispatch a single named tool call.
    Tool {
        #[command(flatten)]
        source: SourceArgs,
        /// Tool name: analyzeSchema, suggestEntryPoints, extractSubgraph, renderSubgraph, renderFullSchema.
        tool: String,
        /// Tool arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
        /// Print a human-readable rendering instead of the raw JSON result.
        #[arg(long)]
        human: bool,
    },
    /// Load views once, then read newline-delimited `{"tool": ..., "args": ...}`
    /// requests from stdin and write one JSON response per line to stdout.
    ServeTools {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Discovery: list catalogs visible to the configured source.
    ListCatalogs {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Discovery: list schemas within a catalog.
    ListSchemas {
        #[command(flatten)]
        source: SourceArgs,
        /// Catalog to list schemas for. Required unless `source` is bound
        /// to exactly one catalog (a warehouse connection string).
        #[arg(id = "list_schemas_catalog")]
        catalog: Option<String>,
    },
}

/// Where the view definitions come from: a JSON file, a packaged offline
/// dataset, or a live warehouse connection. Exactly one of `file`/`dataset`
/// or `warehouse_host` must be given.
#[derive(ClapArgs, Debug, Clone)]
pub struct SourceArgs {
    /// JSON file with shape `{"views": [{"name": ..., "sql": ...}, ...]}`.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["dataset", "warehouse_host"])]
    pub file: Option<PathBuf>,

    /// Name of a packaged offline dataset (simple_ecommerce, moderate_analytics,
    /// realistic_bi_warehouse, complex_enterprise).
    #[arg(long, value_name = "NAME", conflicts_with_all = ["file", "warehouse_host"])]
    pub dataset: Option<String>,

    /// Warehouse host for a live connection.
    #[cfg(feature = "warehouse")]
    #[arg(long, value_name = "HOST", conflicts_with_all = ["file", "dataset"])]
    pub warehouse_host: Option<String>,

    /// Warehouse port (default 8080).
    #[cfg(feature = "warehouse")]
    #[arg(long, default_value_t = 8080)]
    pub warehouse_port: u16,

    /// Warehouse user.
    #[cfg(feature = "warehouse")]
    #[arg(long, default_value = "viewmapper")]
    pub warehouse_user: String,

    /// Catalog to load views from (warehouse mode).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Schema to load views from (warehouse mode).
    #[arg(long)]
    pub schema: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_subcommand_with_dataset() {
        let cli = Cli::parse_from([
            "viewmapper",
            "tool",
            "--dataset",
            "simple_ecommerce",
            "analyzeSchema",
            "--args",
            r#"{"schema_name":"s"}"#,
        ]);
        match cli.command {
            Command::Tool {
                source,
                tool,
                args,
                human,
            } => {
                assert_eq!(source.dataset.as_deref(), Some("simple_ecommerce"));
                assert_eq!(tool, "analyzeSchema");
                assert!(args.contains("schema_name"));
                assert!(!human);
            }
            _ => panic!("expected Tool command"),
        }
    }

    #[test]
    fn parses_serve_tools_subcommand_with_file() {
        let cli = Cli::parse_from(["viewmapper", "serve-tools", "--file", "views.json"]);
        match cli.command {
            Command::ServeTools { source } => {
                assert_eq!(source.file, Some(PathBuf::from("views.json")));
            }
            _ => panic!("expected ServeTools command"),
        }
    }

    #[test]
    fn list_schemas_accepts_optional_catalog() {
        let cli = Cli::parse_from([
            "viewmapper",
            "list-schemas",
            "--dataset",
            "simple_ecommerce",
        ]);
        match cli.command {
            Command::ListSchemas { catalog, .. } => assert!(catalog.is_none()),
            _ => panic!("expected ListSchemas command"),
        }
    }
}
