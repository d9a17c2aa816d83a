//! Dependency graph (C4): a directed graph of view names, built incrementally
//! by parsing and extracting one view definition at a time.
//!
//! Grounded in the adjacency-map substrate used for dependency traversal in
//! the pack's `pg_tviews` dependency graph: two parallel `HashMap<String,
//! HashSet<String>>` maps (outgoing, incoming) plus a vertex set, rather than
//! an external graph crate. The graph never rejects an edge — every vertex
//! implicitly exists once referenced — so [`crate::error::CoreError::EdgeInsertionRejected`]
//! is declared but never raised here.

use crate::error::ParseError;
use crate::extractor::extract_dependencies;
use crate::parser::{parse_statement_with_dialect, Dialect};
use std::collections::{HashMap, HashSet};
#[cfg(feature = "tracing")]
use tracing::debug;

/// A directed graph of views, where an edge `a -> b` means "`b`'s definition
/// reads from `a`" — i.e. edges point from a dependency to its dependent,
/// so `outDegree(v)` counts the views that directly depend on `v`.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    vertices: HashSet<String>,
    /// `outgoing[v]` is the set of views that depend on `v`.
    outgoing: HashMap<String, HashSet<String>>,
    /// `incoming[v]` is the set of views `v` depends on.
    incoming: HashMap<String, HashSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `sql` and adds `name` as a vertex, with an edge to every
    /// dependency the definition resolves. Both `name` and every referenced
    /// table become vertices, whether or not they have their own definition
    /// (a referenced table with no later `add_view` call is a leaf with an
    /// unknown definition — still a valid vertex).
    ///
    /// Returns the parse error, if any, without mutating the graph further
    /// than registering `name` as a vertex; a view that fails to parse still
    /// occupies a node with no outgoing edges, so downstream graph
    /// operations don't need to special-case it.
    pub fn add_view(&mut self, name: &str, sql: &str) -> Result<(), ParseError> {
        self.add_view_with_dialect(name, sql, Dialect::Trino)
    }

    pub fn add_view_with_dialect(
        &mut self,
        name: &str,
        sql: &str,
        dialect: Dialect,
    ) -> Result<(), ParseError> {
        self.insert_vertex(name);

        let stmt = parse_statement_with_dialect(sql, dialect)?;
        let deps = extract_dependencies(&stmt);

        #[cfg(feature = "tracing")]
        debug!(view = name, dependency_count = deps.len(), "parsed view");

        for dep in deps {
            let dep_name = dep.fully_qualified_name();
            self.insert_vertex(&dep_name);
            // Edge points from the dependency to the dependent view.
            self.outgoing
                .entry(dep_name.clone())
                .or_default()
                .insert(name.to_string());
            self.incoming
                .entry(name.to_string())
                .or_default()
                .insert(dep_name);
        }

        Ok(())
    }

    fn insert_vertex(&mut self, name: &str) {
        if self.vertices.insert(name.to_string()) {
            self.outgoing.entry(name.to_string()).or_default();
            self.incoming.entry(name.to_string()).or_default();
        }
    }

    pub fn has_vertex(&self, name: &str) -> bool {
        self.vertices.contains(name)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().map(|s| s.as_str())
    }

    /// Views that depend on `name` (downstream consumers).
    pub fn outgoing_neighbours(&self, name: &str) -> impl Iterator<Item = &str> {
        self.outgoing
            .get(name)
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
    }

    /// Views `name` depends on (upstream dependencies, what it reads from).
    pub fn incoming_neighbours(&self, name: &str) -> impl Iterator<Item = &str> {
        self.incoming
            .get(name)
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.outgoing.get(name).map_or(0, |s| s.len())
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.incoming.get(name).map_or(0, |s| s.len())
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(|s| s.len()).sum()
    }

    /// Whether a direct edge `from -> to` exists (`to` depends on `from`).
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.outgoing.get(from).is_some_and(|s| s.contains(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_a_view_registers_its_dependencies_as_vertices() {
        let mut g = DependencyGraph::new();
        g.add_view("v1", "SELECT * FROM base").unwrap();
        assert!(g.has_vertex("v1"));
        assert!(g.has_vertex("base"));
        assert_eq!(g.vertex_count(), 2);
        // base -> v1: base has one dependent, v1 has one dependency.
        assert_eq!(g.out_degree("base"), 1);
        assert_eq!(g.in_degree("v1"), 1);
    }

    #[test]
    fn diamond_dependency_resolves_correctly() {
        let mut g = DependencyGraph::new();
        g.add_view("top", "SELECT * FROM mid_a JOIN mid_b ON mid_a.id = mid_b.id")
            .unwrap();
        g.add_view("mid_a", "SELECT * FROM base").unwrap();
        g.add_view("mid_b", "SELECT * FROM base").unwrap();

        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.out_degree("base"), 2);
        let mut downstream: Vec<&str> = g.outgoing_neighbours("base").collect();
        downstream.sort();
        assert_eq!(downstream, vec!["mid_a", "mid_b"]);
    }

    #[test]
    fn unparseable_view_still_becomes_a_vertex() {
        let mut g = DependencyGraph::new();
        let result = g.add_view("broken", "SELECT * FROM");
        assert!(result.is_err());
        assert!(g.has_vertex("broken"));
        assert_eq!(g.out_degree("broken"), 0);
    }

    #[test]
    fn insertion_order_does_not_affect_final_topology() {
        let mut forward = DependencyGraph::new();
        forward.add_view("a", "SELECT * FROM b").unwrap();
        forward.add_view("b", "SELECT * FROM c").unwrap();

        let mut backward = DependencyGraph::new();
        backward.add_view("b", "SELECT * FROM c").unwrap();
        backward.add_view("a", "SELECT * FROM b").unwrap();

        assert_eq!(forward.vertex_count(), backward.vertex_count());
        assert_eq!(forward.edge_count(), backward.edge_count());
        assert_eq!(forward.out_degree("a"), backward.out_degree("a"));
    }
}
