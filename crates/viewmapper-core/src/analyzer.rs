//! Graph Analyzer (C5): the four read-only algorithms the rest of the crate
//! builds on — out-degree ranking, leaf enumeration, betweenness centrality,
//! and bounded bidirectional BFS.
//!
//! These operate against the polymorphic surface the graph exposes
//! (vertex set, in/out neighbours) rather than reaching into
//! [`crate::graph::DependencyGraph`]'s internals, matching the pack's
//! convention of keeping traversal algorithms free functions over a narrow
//! borrowed view of the graph.

use crate::graph::DependencyGraph;
use std::collections::{HashMap, HashSet, VecDeque};

/// §4.4.1 — vertices ranked by out-degree (the number of views that
/// directly depend on them), descending, ties broken lexicographically,
/// truncated to `limit`.
pub fn high_impact_ranking(graph: &DependencyGraph, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = graph
        .vertices()
        .map(|v| (v.to_string(), graph.out_degree(v)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// §4.4.2 — vertices with zero out-degree, ascending lexicographic order.
pub fn leaf_views(graph: &DependencyGraph) -> Vec<String> {
    let mut leaves: Vec<String> = graph
        .vertices()
        .filter(|v| graph.out_degree(v) == 0)
        .map(|v| v.to_string())
        .collect();
    leaves.sort();
    leaves
}

/// §4.4.3 — Brandes betweenness centrality over the directed graph,
/// unweighted, absolute (non-normalized) scores. Truncated to `limit`,
/// descending by score with a lexicographic tiebreak.
pub fn central_hubs(graph: &DependencyGraph, limit: usize) -> Vec<(String, f64)> {
    let vertices: Vec<&str> = graph.vertices().collect();
    let mut centrality: HashMap<&str, f64> = vertices.iter().map(|&v| (v, 0.0)).collect();

    for &s in &vertices {
        // Single-source BFS from s, recording shortest-path counts sigma and
        // predecessor lists, then back-propagating dependency scores.
        let mut sigma: HashMap<&str, f64> = HashMap::new();
        let mut dist: HashMap<&str, i64> = HashMap::new();
        let mut preds: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        sigma.insert(s, 1.0);
        dist.insert(s, 0);
        let mut queue = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let dv = dist[v];
            for w in graph.outgoing_neighbours(v) {
                if !dist.contains_key(w) {
                    dist.insert(w, dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == dv + 1 {
                    *sigma.entry(w).or_insert(0.0) += sigma[v];
                    preds.entry(w).or_default().push(v);
                }
            }
        }

        let mut delta: HashMap<&str, f64> = HashMap::new();
        while let Some(w) = order.pop() {
            let dw = *delta.get(w).unwrap_or(&0.0);
            if let Some(ps) = preds.get(w) {
                for &v in ps {
                    let contribution = (sigma[v] / sigma[w]) * (1.0 + dw);
                    *delta.entry(v).or_insert(0.0) += contribution;
                }
            }
            if w != s {
                *centrality.get_mut(w).unwrap() += dw;
            }
        }
    }

    let mut ranked: Vec<(String, f64)> = centrality
        .into_iter()
        .map(|(v, score)| (v.to_string(), score))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(limit);
    ranked
}

/// §4.4.4 — bounded bidirectional BFS around `focus`. Returns the empty set
/// if `focus` is not a vertex of `graph`.
pub fn bounded_subgraph(
    graph: &DependencyGraph,
    focus: &str,
    depth_up: usize,
    depth_down: usize,
    max_nodes: usize,
) -> HashSet<String> {
    if !graph.has_vertex(focus) {
        return HashSet::new();
    }

    let mut members: HashSet<String> = HashSet::new();
    members.insert(focus.to_string());

    if depth_up > 0 {
        bfs_bounded(graph, focus, depth_up, &mut members, |g, v| {
            g.incoming_neighbours(v)
        });
    }
    if depth_down > 0 {
        bfs_bounded(graph, focus, depth_down, &mut members, |g, v| {
            g.outgoing_neighbours(v)
        });
    }

    if max_nodes > 0 && members.len() > max_nodes {
        members = truncate_by_combined_degree(graph, focus, members, max_nodes);
    }

    members
}

fn bfs_bounded<'a, F, I>(
    graph: &'a DependencyGraph,
    focus: &'a str,
    max_depth: usize,
    members: &mut HashSet<String>,
    neighbours: F,
) where
    F: Fn(&'a DependencyGraph, &str) -> I,
    I: Iterator<Item = &'a str>,
{
    let mut frontier: Vec<String> = vec![focus.to_string()];
    let mut depth = 0;
    while depth < max_depth && !frontier.is_empty() {
        let mut next = Vec::new();
        for v in &frontier {
            for n in neighbours(graph, v) {
                if members.insert(n.to_string()) {
                    next.push(n.to_string());
                }
            }
        }
        frontier = next;
        depth += 1;
    }
}

/// Deterministic truncation: keep `focus`, then the `max_nodes - 1` highest
/// combined-degree members, ties broken lexicographically.
fn truncate_by_combined_degree(
    graph: &DependencyGraph,
    focus: &str,
    members: HashSet<String>,
    max_nodes: usize,
) -> HashSet<String> {
    let mut rest: Vec<String> = members.into_iter().filter(|v| v != focus).collect();
    rest.sort_by(|a, b| {
        let degree_a = graph.in_degree(a) + graph.out_degree(a);
        let degree_b = graph.in_degree(b) + graph.out_degree(b);
        degree_b.cmp(&degree_a).then_with(|| a.cmp(b))
    });
    rest.truncate(max_nodes.saturating_sub(1));

    let mut kept: HashSet<String> = rest.into_iter().collect();
    kept.insert(focus.to_string());
    kept
}
