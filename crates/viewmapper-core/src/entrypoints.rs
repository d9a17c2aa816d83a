//! Entry-Point Service (C7): maps a strategy name to one of C5's ranking
//! algorithms and renders each result as a human-readable suggestion.

use crate::analyzer::{central_hubs, high_impact_ranking, leaf_views};
use crate::error::CoreError;
use crate::graph::DependencyGraph;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum EntryPointKind {
    HighImpact,
    LeafView,
    CentralHub,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EntryPointSuggestion {
    pub view: String,
    pub score: f64,
    pub reason: String,
    pub kind: EntryPointKind,
}

/// `strategy` is matched case-insensitively against `"high-impact"`,
/// `"leaf-views"`, `"central-hubs"`; any other value is `InvalidArgument`.
/// `limit` defaults to 5 when `None`.
pub fn suggest_entry_points(
    graph: &DependencyGraph,
    strategy: &str,
    limit: Option<usize>,
) -> Result<Vec<EntryPointSuggestion>, CoreError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);

    match strategy.to_lowercase().as_str() {
        "high-impact" => Ok(high_impact_ranking(graph, limit)
            .into_iter()
            .map(|(view, count)| EntryPointSuggestion {
                reason: format!("{count} views depend on this (foundational/core view)"),
                score: count as f64,
                view,
                kind: EntryPointKind::HighImpact,
            })
            .collect()),
        "leaf-views" => {
            let mut leaves = leaf_views(graph);
            leaves.truncate(limit);
            Ok(leaves
                .into_iter()
                .map(|view| EntryPointSuggestion {
                    view,
                    score: 0.0,
                    reason: "Final output/report with no dependents".to_string(),
                    kind: EntryPointKind::LeafView,
                })
                .collect())
        }
        "central-hubs" => Ok(central_hubs(graph, limit)
            .into_iter()
            .map(|(view, score)| EntryPointSuggestion {
                reason: format!("Central hub (centrality: {score}) connecting sources to consumers"),
                score,
                view,
                kind: EntryPointKind::CentralHub,
            })
            .collect()),
        other => Err(CoreError::InvalidArgument {
            argument: "strategy".to_string(),
            reason: format!("unknown value '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> DependencyGraph {
        let mut g = DependencyGraph::new();
        g.add_view("b", "SELECT * FROM a").unwrap();
        g.add_view("c", "SELECT * FROM a").unwrap();
        g.add_view("d", "SELECT * FROM b JOIN c ON b.id = c.id")
            .unwrap();
        g
    }

    #[test]
    fn high_impact_strategy_reports_foundational_view() {
        let g = diamond();
        let suggestions = suggest_entry_points(&g, "high-impact", None).unwrap();
        assert_eq!(suggestions[0].view, "a");
        assert_eq!(
            suggestions[0].reason,
            "2 views depend on this (foundational/core view)"
        );
        assert_eq!(suggestions[0].kind, EntryPointKind::HighImpact);
    }

    #[test]
    fn leaf_views_strategy_reports_terminal_view() {
        let g = diamond();
        let suggestions = suggest_entry_points(&g, "LEAF-VIEWS", None).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].view, "d");
        assert_eq!(suggestions[0].reason, "Final output/report with no dependents");
    }

    #[test]
    fn central_hubs_strategy_is_case_insensitive() {
        let g = diamond();
        let suggestions = suggest_entry_points(&g, "Central-Hubs", Some(2)).unwrap();
        assert!(suggestions.len() <= 2);
    }

    #[test]
    fn unknown_strategy_is_invalid_argument() {
        let g = diamond();
        let result = suggest_entry_points(&g, "bogus", None);
        assert!(matches!(result, Err(CoreError::InvalidArgument { .. })));
    }
}
