//! Glue between a parsed request and the core's tool dispatch contract.
//!
//! Error text here follows the host convention spec'd for the dispatch
//! layer: a leading `✗ ` and the error's own `Display`, which already
//! carries a newline-separated cause where relevant (see `CoreError`).

use serde_json::Value;
use viewmapper_core::catalog::{dispatch, ToolOutput};
use viewmapper_core::{CoreError, DependencyGraph};

pub fn run_tool(graph: &DependencyGraph, tool: &str, args_json: &str) -> Result<ToolOutput, CoreError> {
    let args: Value = serde_json::from_str(args_json).map_err(|e| CoreError::InvalidArgument {
        argument: "args".to_string(),
        reason: format!("not valid JSON: {e}"),
    })?;
    dispatch(graph, tool, args)
}

/// Render a dispatch failure using the host's leading-symbol convention.
pub fn format_error(err: &CoreError) -> String {
    format!("✗ {err}")
}
