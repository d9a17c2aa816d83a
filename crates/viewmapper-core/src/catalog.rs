//! Tool Dispatch Contract (C10): the fixed, five-operation catalog exposed
//! to a reasoning loop. Declarative rather than protocol-bound — there is
//! no MCP transport here, only the typed request/response shapes and a
//! synchronous `dispatch` over them, grounded in the same schemars/serde_json
//! request-response pattern the packaged analysis types already use.
//!
//! The description strings below are user-visible contract: they are the
//! only signal a reasoning loop has about when to call which operation. Per
//! §4.9 each operation also carries a typed input and output JSON schema, so
//! a reasoning loop can validate arguments before calling and parse results
//! without guessing shapes.

use crate::complexity::{analyze_schema, SchemaComplexity};
use crate::diagram::{render_full_schema, render_subgraph};
use crate::entrypoints::{suggest_entry_points, EntryPointSuggestion};
use crate::error::CoreError;
use crate::graph::DependencyGraph;
use crate::subgraph::{extract_subgraph, SubgraphResult};
use schemars::generate::SchemaSettings;
use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, described operation in the catalog, with the input/output
/// schemas an LLM caller validates against. `description` is what an LLM
/// reads to decide whether to call this tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Schema,
    pub output_schema: Schema,
}

/// Draft-07 JSON schema for `T`, generated the same way the packaged
/// analysis types' own schema snapshot test builds theirs.
fn schema_of<T: JsonSchema>() -> Schema {
    SchemaSettings::draft07().into_generator().into_root_schema_for::<T>()
}

/// The fixed catalog of five operations. Order is stable and matches §4.9.
pub fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "analyzeSchema",
            description: "Report how many views are loaded and how complex the schema is, with guidance on whether a focused entry point is needed before asking for a diagram.",
            input_schema: schema_of::<AnalyzeSchemaArgs>(),
            output_schema: schema_of::<SchemaComplexity>(),
        },
        ToolDescriptor {
            name: "suggestEntryPoints",
            description: "Suggest good starting views for exploration, ranked by one of three strategies: high-impact (foundational views many others depend on), leaf-views (final outputs with no dependents), or central-hubs (views that bridge sources and consumers).",
            input_schema: schema_of::<SuggestEntryPointsArgs>(),
            output_schema: schema_of::<Vec<EntryPointSuggestion>>(),
        },
        ToolDescriptor {
            name: "extractSubgraph",
            description: "Extract a focused neighborhood of the dependency graph around a named view, bounded by upstream/downstream depth and a node cap, for inspection or diagramming.",
            input_schema: schema_of::<ExtractSubgraphArgs>(),
            output_schema: schema_of::<SubgraphResult>(),
        },
        ToolDescriptor {
            name: "renderSubgraph",
            description: "Render a previously extracted subgraph as a Mermaid diagram, with the focus view and its immediate upstream/downstream neighbors highlighted.",
            input_schema: schema_of::<RenderSubgraphArgs>(),
            output_schema: schema_of::<String>(),
        },
        ToolDescriptor {
            name: "renderFullSchema",
            description: "Render every loaded view as a single Mermaid diagram. Refuses with an overflow message above 100 views; call extractSubgraph first for large schemas.",
            input_schema: schema_of::<RenderFullSchemaArgs>(),
            output_schema: schema_of::<String>(),
        },
    ]
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeSchemaArgs {
    pub schema_name: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SuggestEntryPointsArgs {
    pub strategy: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExtractSubgraphArgs {
    pub focus: String,
    pub depth_up: usize,
    pub depth_down: usize,
    pub max_nodes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RenderSubgraphArgs {
    pub subgraph: SubgraphResult,
}

/// `renderFullSchema` takes no arguments; this empty struct exists only so
/// the operation still carries a typed input schema per §4.9.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RenderFullSchemaArgs {}

/// The result of dispatching a tool call: either a typed success payload
/// (always serializable as JSON) or the offending [`CoreError`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Complexity(SchemaComplexity),
    EntryPoints(Vec<EntryPointSuggestion>),
    Subgraph(SubgraphResult),
    Diagram(String),
}

/// Dispatches a named tool call with JSON-encoded arguments against `graph`.
/// Synchronous; never mutates `graph`.
pub fn dispatch(graph: &DependencyGraph, tool: &str, args: Value) -> Result<ToolOutput, CoreError> {
    match tool {
        "analyzeSchema" => {
            let args: AnalyzeSchemaArgs = parse_args(args)?;
            Ok(ToolOutput::Complexity(analyze_schema(
                &args.schema_name,
                graph.vertex_count(),
            )))
        }
        "suggestEntryPoints" => {
            let args: SuggestEntryPointsArgs = parse_args(args)?;
            let suggestions = suggest_entry_points(graph, &args.strategy, args.limit)?;
            Ok(ToolOutput::EntryPoints(suggestions))
        }
        "extractSubgraph" => {
            let args: ExtractSubgraphArgs = parse_args(args)?;
            let subgraph = extract_subgraph(
                graph,
                &args.focus,
                args.depth_up,
                args.depth_down,
                args.max_nodes,
            )?;
            Ok(ToolOutput::Subgraph(subgraph))
        }
        "renderSubgraph" => {
            let args: RenderSubgraphArgs = parse_args(args)?;
            Ok(ToolOutput::Diagram(render_subgraph(graph, &args.subgraph)))
        }
        "renderFullSchema" => Ok(ToolOutput::Diagram(render_full_schema(graph))),
        other => Err(CoreError::InvalidArgument {
            argument: "tool".to_string(),
            reason: format!("unknown tool '{other}'"),
        }),
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, CoreError> {
    serde_json::from_value(args).map_err(|e| CoreError::InvalidArgument {
        argument: "args".to_string(),
        reason: e.to_string(),
    })
}
