//! JSON output formatter.
//!
//! Produces a pretty-printed JSON document with the score, the findings
//! split into violations, warnings and info, and the full cross-reference
//! analysis.

use crate::finding::{Finding, ValidationReport};
use crate::graph::CrossReferenceReport;
use crate::score::Recommendation;

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    bundle: &'a str,
    bundle_path: String,
    timestamp: &'a str,
    score: u8,
    recommendation: Recommendation,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    summary: Summary,
    violations: &'a [Finding],
    warnings: &'a [Finding],
    info: &'a [Finding],
    #[serde(skip_serializing_if = "Option::is_none")]
    cross_references: Option<&'a CrossReferenceReport>,
    skipped_checks: Vec<&'a str>,
}

#[derive(serde::Serialize)]
struct Summary {
    critical: usize,
    major: usize,
    warnings: usize,
    info: usize,
}

/// Formats a [`ValidationReport`] as pretty-printed JSON.
pub fn format(report: &ValidationReport) -> String {
    let (critical, major, warnings, info) = report.count_by_severity();
    let output = JsonOutput {
        bundle: &report.bundle,
        bundle_path: report.bundle_path.display().to_string(),
        timestamp: &report.timestamp,
        score: report.score,
        recommendation: report.recommendation,
        passed: report.passed(),
        error: report.error.as_deref(),
        summary: Summary {
            critical,
            major,
            warnings,
            info,
        },
        violations: &report.violations,
        warnings: &report.warnings,
        info: &report.info,
        cross_references: report.cross_references.as_ref(),
        skipped_checks: report
            .check_results
            .iter()
            .filter(|r| r.skipped)
            .map(|r| r.check_name.as_str())
            .collect(),
    };

    // Every field is a string, number, bool or map with string keys.
    serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| super::serialization_error("report", &e))
}
