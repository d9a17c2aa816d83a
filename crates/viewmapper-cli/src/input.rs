//! JSON views-file loading.
//!
//! A views file has shape `{"description"?: string, "views": [{"name":
//! string, "sql": string}, ...]}`. Both a user-supplied `--file` and a
//! packaged offline dataset deserialize to the same shape.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ViewEntry {
    pub name: String,
    pub sql: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewsFile {
    #[serde(default)]
    pub description: Option<String>,
    pub views: Vec<ViewEntry>,
}

/// Read and parse a views file from disk.
pub fn read_views_file(path: &Path) -> Result<ViewsFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read views file: {}", path.display()))?;
    parse_views_file(&content)
        .with_context(|| format!("failed to parse views file: {}", path.display()))
}

/// Parse a views file's JSON text.
pub fn parse_views_file(content: &str) -> Result<ViewsFile> {
    serde_json::from_str(content).context("invalid views file JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_minimal_views_file() {
        let file =
            parse_views_file(r#"{"views":[{"name":"v","sql":"SELECT * FROM t"}]}"#).unwrap();
        assert_eq!(file.views.len(), 1);
        assert_eq!(file.views[0].name, "v");
        assert!(file.description.is_none());
    }

    #[test]
    fn parses_views_file_with_description() {
        let file = parse_views_file(
            r#"{"description":"demo","views":[{"name":"v","sql":"SELECT 1"}]}"#,
        )
        .unwrap();
        assert_eq!(file.description.as_deref(), Some("demo"));
    }

    #[test]
    fn reads_views_file_from_disk() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"views":[{{"name":"v","sql":"SELECT 1"}}]}}"#).unwrap();
        let parsed = read_views_file(f.path()).unwrap();
        assert_eq!(parsed.views.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = read_views_file(Path::new("/nonexistent/views.json"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result = parse_views_file("not json");
        assert!(result.is_err());
    }
}
