//! viewmapper - a command-line host for the view dependency mapper's
//! tool dispatch contract.
//!
//! Loads a graph once from a file, a packaged dataset, or a live
//! warehouse, then either dispatches a single named tool call or serves
//! a batch of them read as JSON Lines from stdin. The LLM reasoning loop
//! that would normally drive these calls is out of scope; this binary is
//! the collaborator interface the reasoning loop talks to.

mod cli;
mod datasets;
mod dispatch;
mod input;
mod output;
mod source;
#[cfg(feature = "warehouse")]
mod warehouse;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<viewmapper_core::CoreError>() {
                Some(core_err) => eprintln!("{}", dispatch::format_error(core_err)),
                None => eprintln!("✗ {e:#}"),
            }
            ExitCode::from(66)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Tool {
            source,
            tool,
            args,
            human,
        } => run_tool(&source, &tool, &args, human),
        Command::ServeTools { source } => serve_tools(&source),
        Command::ListCatalogs { source } => {
            let catalogs = source::list_catalogs(&source)?;
            println!("{}", serde_json::to_string_pretty(&catalogs)?);
            Ok(())
        }
        Command::ListSchemas { source, catalog } => {
            let schemas = source::list_schemas(&source, catalog.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&schemas)?);
            Ok(())
        }
    }
}

fn run_tool(source: &cli::SourceArgs, tool: &str, args: &str, human: bool) -> Result<()> {
    let graph = source::load_graph(source)?;
    match dispatch::run_tool(&graph, tool, args) {
        Ok(result) => {
            if human {
                println!("{}", output::format_tool_output(&result, true));
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Read newline-delimited `{"tool": ..., "args": ...}` requests from stdin,
/// writing one JSON response per line to stdout. A request that fails to
/// dispatch writes `{"error": "..."}` and processing continues.
fn serve_tools(source: &cli::SourceArgs) -> Result<()> {
    let graph = source::load_graph(source)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_serve_line(&graph, &line);
        writeln!(out, "{response}")?;
    }
    Ok(())
}

#[derive(serde::Deserialize)]
struct ServeRequest {
    tool: String,
    #[serde(default = "default_args")]
    args: serde_json::Value,
}

fn default_args() -> serde_json::Value {
    serde_json::json!({})
}

fn handle_serve_line(graph: &viewmapper_core::DependencyGraph, line: &str) -> String {
    let request: ServeRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => return error_line(&format!("malformed request: {e}")),
    };

    match viewmapper_core::catalog::dispatch(graph, &request.tool, request.args) {
        Ok(result) => serde_json::to_string(&result)
            .unwrap_or_else(|e| error_line(&format!("failed to encode result: {e}"))),
        Err(err) => error_line(&err.to_string()),
    }
}

fn error_line(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
