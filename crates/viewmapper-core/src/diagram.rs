//! Diagram Renderer (C9): renders a [`SubgraphResult`] or the full graph as
//! fenced Mermaid text.
//!
//! Node sanitization and label escaping follow the pattern used by the
//! packaged CLI's table-view Mermaid generator; this renderer emits a
//! single, fixed diagram shape (no script/table/column/hybrid view modes —
//! those belonged to lineage output this crate does not produce).

use crate::graph::DependencyGraph;
use crate::subgraph::SubgraphResult;

const MAX_RENDERABLE: usize = 100;
const FOCUS_STYLE: &str = "fill:#f96,stroke:#c30,stroke-width:2px";
const UPSTREAM_STYLE: &str = "fill:#bbf,stroke:#33f";
const DOWNSTREAM_STYLE: &str = "fill:#bfb,stroke:#3a3";

/// Renders a focused subgraph, with focus/upstream/downstream styling.
pub fn render_subgraph(graph: &DependencyGraph, subgraph: &SubgraphResult) -> String {
    if subgraph.members.is_empty() {
        return empty_diagram();
    }
    if subgraph.members.len() > MAX_RENDERABLE {
        return overflow_diagram(subgraph.members.len());
    }

    let mut members: Vec<&String> = subgraph.members.iter().collect();
    members.sort();

    let ids = assign_node_ids(&members);
    let mut lines = vec!["```mermaid".to_string(), "graph TB".to_string()];

    for &member in &members {
        let id = &ids[member];
        lines.push(format!("    {id}[\"{}\"]", escape_label(&short_label(member))));
    }

    emit_edges(graph, &members, &ids, &mut lines);

    if let Some(focus_id) = ids.get(&subgraph.focus) {
        lines.push(format!("    style {focus_id} {FOCUS_STYLE}"));
    }
    for upstream in graph
        .incoming_neighbours(&subgraph.focus)
        .filter(|v| subgraph.members.contains(*v))
    {
        if let Some(id) = ids.get(upstream) {
            lines.push(format!("    style {id} {UPSTREAM_STYLE}"));
        }
    }
    for downstream in graph
        .outgoing_neighbours(&subgraph.focus)
        .filter(|v| subgraph.members.contains(*v))
    {
        if let Some(id) = ids.get(downstream) {
            lines.push(format!("    style {id} {DOWNSTREAM_STYLE}"));
        }
    }

    lines.push("```".to_string());
    lines.join("\n")
}

/// Renders every vertex of `graph`, with no per-node styling.
pub fn render_full_schema(graph: &DependencyGraph) -> String {
    let mut members: Vec<&str> = graph.vertices().collect();
    if members.is_empty() {
        return empty_diagram();
    }
    if members.len() > MAX_RENDERABLE {
        return overflow_diagram(members.len());
    }
    members.sort();

    let owned: Vec<String> = members.iter().map(|s| s.to_string()).collect();
    let refs: Vec<&String> = owned.iter().collect();
    let ids = assign_node_ids(&refs);

    let mut lines = vec!["```mermaid".to_string(), "graph TB".to_string()];
    for member in &refs {
        let id = &ids[member.as_str()];
        lines.push(format!("    {id}[\"{}\"]", escape_label(&short_label(member))));
    }
    emit_edges(graph, &refs, &ids, &mut lines);
    lines.push("```".to_string());
    lines.join("\n")
}

fn assign_node_ids(members: &[&String]) -> std::collections::HashMap<String, String> {
    members
        .iter()
        .enumerate()
        .map(|(i, &m)| (m.clone(), format!("node{}", i + 1)))
        .collect()
}

fn emit_edges(
    graph: &DependencyGraph,
    members: &[&String],
    ids: &std::collections::HashMap<String, String>,
    lines: &mut Vec<String>,
) {
    for &u in members {
        for &v in members {
            if graph.has_edge(u, v) {
                lines.push(format!("    {} --> {}", ids[u], ids[v]));
            }
        }
    }
}

fn empty_diagram() -> String {
    "```mermaid\ngraph TB\n    empty[\"No views to display\"]\n```".to_string()
}

fn overflow_diagram(actual_size: usize) -> String {
    format!(
        "```mermaid\ngraph TB\n    overflow[\"{actual_size} nodes exceeds the 100-node diagram limit — use extractSubgraph to focus the view first\"]\n```"
    )
}

/// Human-readable label: the last one or two dot-separated name components.
fn short_label(fqn: &str) -> String {
    let parts: Vec<&str> = fqn.rsplitn(3, '.').collect();
    match parts.len() {
        0 => fqn.to_string(),
        1 => parts[0].to_string(),
        _ => {
            let mut last_two: Vec<&str> = parts.into_iter().take(2).collect();
            last_two.reverse();
            last_two.join(".")
        }
    }
}

fn escape_label(label: &str) -> String {
    label.replace('"', "\\\"").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subgraph::extract_subgraph;

    fn diamond() -> DependencyGraph {
        let mut g = DependencyGraph::new();
        g.add_view("b", "SELECT * FROM a").unwrap();
        g.add_view("c", "SELECT * FROM a").unwrap();
        g.add_view("d", "SELECT * FROM b JOIN c ON b.id = c.id")
            .unwrap();
        g
    }

    #[test]
    fn renders_fenced_mermaid_block() {
        let g = diamond();
        let subgraph = extract_subgraph(&g, "d", 2, 0, None).unwrap();
        let text = render_subgraph(&g, &subgraph);
        assert!(text.starts_with("```mermaid\ngraph TB"));
        assert!(text.ends_with("```"));
        assert!(text.contains("-->"));
    }

    #[test]
    fn focus_node_receives_focus_style() {
        let g = diamond();
        let subgraph = extract_subgraph(&g, "d", 2, 0, None).unwrap();
        let text = render_subgraph(&g, &subgraph);
        assert!(text.contains(FOCUS_STYLE));
    }

    #[test]
    fn empty_members_render_placeholder() {
        let g = diamond();
        let subgraph = crate::subgraph::SubgraphResult {
            members: Default::default(),
            focus: "d".to_string(),
            depth_upstream: 0,
            depth_downstream: 0,
            truncated: false,
        };
        let text = render_subgraph(&g, &subgraph);
        assert!(text.contains("No views to display"));
    }

    #[test]
    fn oversized_subgraph_renders_overflow_message() {
        let g = diamond();
        let members: std::collections::HashSet<String> =
            (0..150).map(|i| format!("v{i}")).collect();
        let subgraph = crate::subgraph::SubgraphResult {
            members,
            focus: "v0".to_string(),
            depth_upstream: 0,
            depth_downstream: 0,
            truncated: true,
        };
        let text = render_subgraph(&g, &subgraph);
        assert!(text.contains("150 nodes exceeds"));
    }

    #[test]
    fn full_schema_render_has_no_styling() {
        let g = diamond();
        let text = render_full_schema(&g);
        assert!(!text.contains("style "));
    }

    #[test]
    fn self_loop_is_rendered() {
        let mut g = DependencyGraph::new();
        g.add_view("recursive_totals", "SELECT * FROM recursive_totals")
            .unwrap();
        let text = render_full_schema(&g);
        let id = "node1";
        assert!(text.contains(&format!("{id} --> {id}")));
    }

    #[test]
    fn short_label_keeps_last_two_components() {
        assert_eq!(short_label("warehouse.sales.orders"), "sales.orders");
        assert_eq!(short_label("orders"), "orders");
    }
}
