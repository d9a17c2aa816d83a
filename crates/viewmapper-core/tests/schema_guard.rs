//! Boundary checks for the complexity classifier's view-count thresholds.

use rstest::rstest;
use viewmapper_core::{analyze_schema, ComplexityLevel};

#[rstest]
#[case(19, ComplexityLevel::Simple)]
#[case(20, ComplexityLevel::Moderate)]
#[case(99, ComplexityLevel::Moderate)]
#[case(100, ComplexityLevel::Complex)]
#[case(499, ComplexityLevel::Complex)]
#[case(500, ComplexityLevel::VeryComplex)]
fn view_count_boundaries_classify_correctly(
    #[case] view_count: usize,
    #[case] expected: ComplexityLevel,
) {
    let result = analyze_schema("s", view_count);
    assert_eq!(result.level, expected);
}
