//! Packaged offline datasets, embedded into the binary at build time.
//!
//! These back the `--dataset` source option and the synthetic `test`
//! catalog's discovery responses: a `listSchemas("test")` call returns
//! exactly the names in [`names`].

use crate::input::{parse_views_file, ViewsFile};
use anyhow::{anyhow, Result};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "datasets/"]
#[include = "*.json"]
struct Datasets;

/// Names of the packaged datasets, sorted for deterministic discovery output.
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = Datasets::iter()
        .filter_map(|f| f.strip_suffix(".json").map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Load and parse a packaged dataset by name.
pub fn load(name: &str) -> Result<ViewsFile> {
    let file = Datasets::get(&format!("{name}.json"))
        .ok_or_else(|| anyhow!("unknown dataset '{name}' (known: {})", names().join(", ")))?;
    let content = std::str::from_utf8(file.data.as_ref())
        .map_err(|e| anyhow!("dataset '{name}' is not valid UTF-8: {e}"))?;
    parse_views_file(content)
}
