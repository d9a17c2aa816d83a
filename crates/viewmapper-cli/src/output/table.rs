//! Human-readable rendering of tool dispatch results.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::fmt::Write;
use tabled::{Table, Tabled};
use viewmapper_core::catalog::ToolOutput;

/// Render a tool dispatch result as human-readable text with optional colors.
pub fn format_tool_output(output: &ToolOutput, use_colors: bool) -> String {
    let colored = use_colors && std::io::stdout().is_terminal();
    match output {
        ToolOutput::Complexity(c) => format_complexity(c, colored),
        ToolOutput::EntryPoints(points) => format_entry_points(points, colored),
        ToolOutput::Subgraph(s) => format_subgraph(s, colored),
        ToolOutput::Diagram(text) => text.clone(),
    }
}

fn heading(out: &mut String, text: &str, colored: bool) {
    if colored {
        writeln!(out, "{}", text.bold()).unwrap();
    } else {
        writeln!(out, "{text}").unwrap();
    }
}

fn format_complexity(c: &viewmapper_core::SchemaComplexity, colored: bool) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Schema: {}", c.schema_name), colored);
    writeln!(out, "Views: {}", c.view_count).unwrap();
    writeln!(out, "Level: {:?}", c.level).unwrap();
    writeln!(out, "Requires entry point: {}", c.requires_entry_point).unwrap();
    writeln!(out, "Full diagram feasible: {}", c.full_diagram_feasible).unwrap();
    writeln!(out, "Guidance: {}", c.guidance).unwrap();
    out
}

#[derive(Tabled)]
struct EntryPointRow {
    #[tabled(rename = "View")]
    view: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

fn format_entry_points(
    points: &[viewmapper_core::EntryPointSuggestion],
    colored: bool,
) -> String {
    let mut out = String::new();
    if points.is_empty() {
        heading(&mut out, "No entry points found.", colored);
        return out;
    }
    let rows: Vec<EntryPointRow> = points
        .iter()
        .map(|p| EntryPointRow {
            view: p.view.clone(),
            score: format!("{:.1}", p.score),
            kind: format!("{:?}", p.kind),
            reason: p.reason.clone(),
        })
        .collect();
    writeln!(out, "{}", Table::new(rows)).unwrap();
    out
}

fn format_subgraph(s: &viewmapper_core::SubgraphResult, colored: bool) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!(
            "Subgraph around {} (up {}, down {})",
            s.focus, s.depth_upstream, s.depth_downstream
        ),
        colored,
    );
    writeln!(out, "Members: {}", s.members.len()).unwrap();
    writeln!(out, "Truncated: {}", s.truncated).unwrap();
    writeln!(out, "Visualizable: {}", s.visualizable()).unwrap();

    let mut members: Vec<&String> = s.members.iter().collect();
    members.sort();
    for member in members {
        if member == &s.focus {
            if colored {
                writeln!(out, "  * {}", member.green()).unwrap();
            } else {
                writeln!(out, "  * {member}").unwrap();
            }
        } else {
            writeln!(out, "    {member}").unwrap();
        }
    }
    out
}
