//! Complexity Classifier (C6): a pure function of view count.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Schema complexity tier, ordered by `viewCount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
    VeryComplex,
}

impl ComplexityLevel {
    fn classify(view_count: usize) -> Self {
        match view_count {
            0..=19 => ComplexityLevel::Simple,
            20..=99 => ComplexityLevel::Moderate,
            100..=499 => ComplexityLevel::Complex,
            _ => ComplexityLevel::VeryComplex,
        }
    }

    fn requires_entry_point(self) -> bool {
        matches!(self, ComplexityLevel::Complex | ComplexityLevel::VeryComplex)
    }

    fn full_diagram_feasible(self) -> bool {
        matches!(self, ComplexityLevel::Simple)
    }

    fn guidance(self) -> &'static str {
        match self {
            ComplexityLevel::Simple => "Full diagram feasible.",
            ComplexityLevel::Moderate => "Suggest grouping by domain or iterative exploration.",
            ComplexityLevel::Complex => "Require focused exploration with an entry point.",
            ComplexityLevel::VeryComplex => "Guided step-by-step exploration required.",
        }
    }
}

/// Result of `analyzeSchema`. `schema_name` is echoed back verbatim — the
/// loaded graph is process-global and is not actually filtered by name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SchemaComplexity {
    pub schema_name: String,
    pub view_count: usize,
    pub level: ComplexityLevel,
    pub requires_entry_point: bool,
    pub full_diagram_feasible: bool,
    pub guidance: String,
}

/// Classifies a schema of `view_count` views under the name `schema_name`.
/// `schema_name` is not used to select or filter anything; it is carried
/// through to the result for display purposes only.
pub fn analyze_schema(schema_name: &str, view_count: usize) -> SchemaComplexity {
    let level = ComplexityLevel::classify(view_count);
    SchemaComplexity {
        schema_name: schema_name.to_string(),
        view_count,
        requires_entry_point: level.requires_entry_point(),
        full_diagram_feasible: level.full_diagram_feasible(),
        guidance: level.guidance().to_string(),
        level,
    }
}
