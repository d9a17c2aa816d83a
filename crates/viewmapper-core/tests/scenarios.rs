//! End-to-end scenarios covering diamond dependencies, CTE masking, literal
//! pollution, cap enforcement, complexity classification, and centrality.

use viewmapper_core::{analyze_schema, extract_subgraph, ComplexityLevel, DependencyGraph};

fn sorted<I: IntoIterator<Item = String>>(iter: I) -> Vec<String> {
    let mut v: Vec<String> = iter.into_iter().collect();
    v.sort();
    v
}

/// Scenario A — diamond dependency.
#[test]
fn scenario_a_diamond_dependency() {
    let mut g = DependencyGraph::new();
    g.add_view("b", "SELECT * FROM a").unwrap();
    g.add_view("c", "SELECT * FROM a").unwrap();
    g.add_view("d", "SELECT * FROM b JOIN c ON b.id = c.id")
        .unwrap();

    assert_eq!(g.vertex_count(), 4);
    assert!(g.has_edge("a", "b"));
    assert!(g.has_edge("a", "c"));
    assert!(g.has_edge("b", "d"));
    assert!(g.has_edge("c", "d"));

    let leaves = viewmapper_core::analyzer::leaf_views(&g);
    assert_eq!(leaves, vec!["d".to_string()]);

    let top_impact = viewmapper_core::analyzer::high_impact_ranking(&g, 1);
    assert_eq!(top_impact[0], ("a".to_string(), 2));

    let subgraph = extract_subgraph(&g, "d", 2, 0, None).unwrap();
    assert_eq!(
        sorted(subgraph.members),
        vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()]
    );
}

/// Scenario B — CTE masking.
#[test]
fn scenario_b_cte_masking() {
    let mut g = DependencyGraph::new();
    g.add_view(
        "u",
        "WITH users AS (SELECT * FROM customers WHERE active) SELECT * FROM users",
    )
    .unwrap();

    assert_eq!(g.vertex_count(), 2);
    assert!(g.has_vertex("u"));
    assert!(g.has_vertex("customers"));
    assert!(!g.has_vertex("users"));
    assert!(g.has_edge("customers", "u"));
}

/// Scenario C — literal pollution.
#[test]
fn scenario_c_literal_pollution() {
    let mut g = DependencyGraph::new();
    g.add_view(
        "x",
        "SELECT * FROM users WHERE description LIKE '%schema.fake_table%'",
    )
    .unwrap();

    assert_eq!(g.vertex_count(), 2);
    assert!(g.has_vertex("users"));
    assert!(g.has_vertex("x"));
    assert!(!g.has_vertex("schema.fake_table"));
    assert!(g.has_edge("users", "x"));
}

/// Scenario D — cap enforcement.
#[test]
fn scenario_d_cap_enforcement() {
    let mut g = DependencyGraph::new();
    g.add_view("v1", "SELECT * FROM v2").unwrap();
    g.add_view("v2", "SELECT * FROM v3").unwrap();
    g.add_view("v3", "SELECT * FROM v4").unwrap();
    g.add_view("v4", "SELECT * FROM v5").unwrap();
    g.add_view("v5", "SELECT 1").unwrap();

    let subgraph = extract_subgraph(&g, "v3", 2, 2, Some(3)).unwrap();
    assert_eq!(subgraph.members.len(), 3);
    assert!(subgraph.members.contains("v3"));
    assert!(subgraph.truncated);
}

/// Scenario E — complexity classification at 100 views.
#[test]
fn scenario_e_complexity_classification_at_100_views() {
    let mut g = DependencyGraph::new();
    for i in 0..100 {
        g.add_view(&format!("v{i}"), "SELECT * FROM base").unwrap();
    }

    assert!(g.vertex_count() == 100 || g.vertex_count() == 101);

    let result = analyze_schema("s", g.vertex_count());
    assert_eq!(result.level, ComplexityLevel::Complex);
    assert!(result.requires_entry_point);
}

/// Scenario F — centrality bridge.
#[test]
fn scenario_f_centrality_bridge() {
    let mut g = DependencyGraph::new();
    g.add_view("b", "SELECT * FROM a").unwrap();
    g.add_view("bridge", "SELECT * FROM b JOIN c ON b.id = c.id")
        .unwrap();
    g.add_view("d", "SELECT * FROM bridge").unwrap();
    g.add_view("e", "SELECT * FROM d").unwrap();

    let ranked = viewmapper_core::analyzer::central_hubs(&g, 1);
    assert_eq!(ranked[0].0, "bridge");
    assert!(ranked[0].1 > 0.0);
}
