//! Subgraph Service (C8): wraps C5's bounded BFS, enforcing the focus
//! view's existence and computing the `truncated` flag.

use crate::analyzer::bounded_subgraph;
use crate::error::CoreError;
use crate::graph::DependencyGraph;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_MAX_NODES: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SubgraphResult {
    pub members: HashSet<String>,
    pub focus: String,
    pub depth_upstream: usize,
    pub depth_downstream: usize,
    pub truncated: bool,
}

impl SubgraphResult {
    /// Derived property: a subgraph is visualizable as a full diagram only
    /// up to 50 members.
    pub fn visualizable(&self) -> bool {
        self.members.len() <= 50
    }
}

/// `max_nodes` defaults to 50 when `None`. Fails with `ViewNotFound` if
/// `focus` is not a vertex of `graph`.
pub fn extract_subgraph(
    graph: &DependencyGraph,
    focus: &str,
    depth_upstream: usize,
    depth_downstream: usize,
    max_nodes: Option<usize>,
) -> Result<SubgraphResult, CoreError> {
    if !graph.has_vertex(focus) {
        return Err(CoreError::ViewNotFound(focus.to_string()));
    }

    let max_nodes = max_nodes.unwrap_or(DEFAULT_MAX_NODES);
    let members = bounded_subgraph(graph, focus, depth_upstream, depth_downstream, max_nodes);
    let truncated = max_nodes > 0 && members.len() >= max_nodes;

    Ok(SubgraphResult {
        members,
        focus: focus.to_string(),
        depth_upstream,
        depth_downstream,
        truncated,
    })
}
