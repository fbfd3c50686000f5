//! Output formatting for validation reports.
//!
//! Three formats are supported:
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | Terminal / human review |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | Automation / scripting  |
//! | [`Sarif`](OutputFormat::Sarif)   | [`sarif`]  | CI/CD integration       |
//!
//! Use [`format_report`] to render a [`ValidationReport`] in any of the above
//! formats. How much the pretty format shows is controlled by
//! [`RenderOptions`], passed explicitly rather than kept as global state.

pub mod json;
pub mod pretty;
pub mod sarif;

use crate::finding::ValidationReport;

/// Supported output formats for validation reports.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text.
    Pretty,
    /// Machine-readable JSON.
    Json,
    /// [SARIF 2.1.0](https://sarifweb.azurewebsites.net/) for CI/CD tool integration.
    Sarif,
}

/// Verbosity of the pretty format. Structured formats always carry everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// One-line score plus violations and warnings; no cross-reference map.
    pub minimal: bool,
    /// Also list info findings.
    pub verbose: bool,
}

/// Formats a [`ValidationReport`] in the requested [`OutputFormat`].
///
/// # Examples
///
/// ```rust,no_run
/// use oxidized_skill_lint::output::{format_report, OutputFormat, RenderOptions};
/// # use oxidized_skill_lint::finding::ValidationReport;
/// # fn example(report: &ValidationReport) {
/// let json = format_report(report, &OutputFormat::Json, RenderOptions::default());
/// println!("{json}");
/// # }
/// ```
pub fn format_report(
    report: &ValidationReport,
    format: &OutputFormat,
    options: RenderOptions,
) -> String {
    match format {
        OutputFormat::Pretty => pretty::format(report, options),
        OutputFormat::Json => json::format(report),
        OutputFormat::Sarif => sarif::format(report),
    }
}

/// JSON document standing in for a report that failed to serialize.
pub(crate) fn serialization_error(what: &str, error: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": format!("{what} serialization failed: {error}") }).to_string()
}
