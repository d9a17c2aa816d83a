//! `TableReference`: an immutable, up-to-three-part qualified table name (C3).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A table or view name as it occurs in a query, carrying up to three name
/// parts (`catalog.schema.table`). Equality and hashing are based on the
/// canonical joined string, not the individual parts.
///
/// Parts are stored exactly as the AST produced them: unquoted identifiers
/// have already been lower-cased by the parser (see `parser::parse_sql`),
/// quoted identifiers retain their original case and may contain spaces,
/// dashes, or punctuation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TableReference {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table: String,
}

impl TableReference {
    /// Builds a reference from 1-3 name parts, last part is `table`.
    ///
    /// Panics if `parts` is empty — a table reference with no name cannot
    /// occur in a valid AST.
    pub fn from_parts(parts: &[String]) -> Self {
        match parts.len() {
            0 => panic!("TableReference::from_parts called with zero parts"),
            1 => Self {
                catalog: None,
                schema: None,
                table: parts[0].clone(),
            },
            2 => Self {
                catalog: None,
                schema: Some(parts[0].clone()),
                table: parts[1].clone(),
            },
            _ => {
                let n = parts.len();
                Self {
                    catalog: Some(parts[n - 3].clone()),
                    schema: Some(parts[n - 2].clone()),
                    table: parts[n - 1].clone(),
                }
            }
        }
    }

    /// The canonical `[catalog.][schema.]table` string used for equality,
    /// hashing, and as the vertex label in the dependency graph.
    pub fn fully_qualified_name(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(catalog) = &self.catalog {
            parts.push(catalog.as_str());
        }
        if let Some(schema) = &self.schema {
            parts.push(schema.as_str());
        }
        parts.push(self.table.as_str());
        parts.join(".")
    }
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fully_qualified_name())
    }
}

impl PartialEq for TableReference {
    fn eq(&self, other: &Self) -> bool {
        self.fully_qualified_name() == other.fully_qualified_name()
    }
}

impl Eq for TableReference {}

impl std::hash::Hash for TableReference {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.fully_qualified_name().hash(state);
    }
}
