//! Fuzz target for graph construction.
//!
//! Checks that `DependencyGraph::add_view()` never panics, even when the
//! SQL text is garbage and the view name contains arbitrary bytes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use viewmapper_core::DependencyGraph;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    name: String,
    sql: String,
}

fuzz_target!(|input: FuzzInput| {
    let mut graph = DependencyGraph::new();
    let _result = graph.add_view(&input.name, &input.sql);
});
