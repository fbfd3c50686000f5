//! Human-readable colored text formatter.
//!
//! Produces a terminal-friendly report with ANSI color codes: score and
//! recommendation, violations and warnings with their details, the
//! cross-reference map (direct, indirect and orphaned files, broken
//! references) and a one-line summary.

use super::RenderOptions;
use crate::finding::{Finding, Severity, ValidationReport};
use crate::graph::{Classification, CrossReferenceReport};
use crate::score::Recommendation;
use colored::Colorize;
use serde_json::Value;

/// Referrers listed per indirect file before eliding the rest.
const REFERRERS_SHOWN: usize = 2;

/// Formats a [`ValidationReport`] as human-readable, ANSI-colored text.
///
/// Sections rendered (in order):
/// 1. **Header** — bundle name, score and recommendation.
/// 2. **Violations** and **Warnings** — with details and suggestions.
/// 3. **Info** — only with [`RenderOptions::verbose`].
/// 4. **Cross-references** — skipped with [`RenderOptions::minimal`].
/// 5. **Summary** — recommendation and severity counts.
pub fn format(report: &ValidationReport, options: RenderOptions) -> String {
    let mut out = String::new();

    if options.minimal {
        out.push_str(&format!(
            "{}: {}/5 {}\n",
            report.bundle.bold(),
            report.score,
            colored_recommendation(report.recommendation)
        ));
    } else {
        out.push_str(&format!(
            "\n{}\n",
            format!("  Skill Validation: {}  ", report.bundle)
                .bold()
                .on_blue()
                .white()
        ));
        out.push_str(&format!("  Timestamp: {}\n", report.timestamp));
        out.push_str(&format!(
            "  Score: {}/5  Recommendation: {}\n\n",
            report.score.to_string().bold(),
            colored_recommendation(report.recommendation)
        ));
    }

    if let Some(ref error) = report.error {
        out.push_str(&format!("{} {}\n\n", "ERROR".red().bold(), error));
    }

    if !report.violations.is_empty() {
        out.push_str(&format!(
            "{} ({})\n",
            "Violations".bold().underline(),
            report.violations.len()
        ));
        for finding in &report.violations {
            push_finding(&mut out, finding, options);
        }
        out.push('\n');
    }

    if !report.warnings.is_empty() {
        out.push_str(&format!(
            "{} ({})\n",
            "Warnings".bold().underline(),
            report.warnings.len()
        ));
        for finding in &report.warnings {
            push_finding(&mut out, finding, options);
        }
        out.push('\n');
    }

    if options.verbose && !report.info.is_empty() {
        out.push_str(&format!(
            "{} ({})\n",
            "Info".bold().underline(),
            report.info.len()
        ));
        for finding in &report.info {
            push_finding(&mut out, finding, options);
        }
        out.push('\n');
    }

    if options.minimal {
        return out;
    }

    if let Some(ref xref) = report.cross_references {
        push_cross_references(&mut out, xref);
    }

    if report.violations.is_empty() && report.warnings.is_empty() && report.error.is_none() {
        out.push_str(&format!("{}\n\n", "No violations found".green().bold()));
    }

    let (critical, major, warnings, info) = report.count_by_severity();
    out.push_str(&format!(
        "Result: {}  |  {} critical, {} major, {} warnings, {} info\n",
        colored_recommendation(report.recommendation),
        critical,
        major,
        warnings,
        info,
    ));

    out
}

fn colored_recommendation(recommendation: Recommendation) -> String {
    let text = recommendation.to_string();
    match recommendation {
        Recommendation::Approve => text.green().bold().to_string(),
        Recommendation::NeedsMinorRevision => text.yellow().bold().to_string(),
        Recommendation::NeedsMajorRevision | Recommendation::Error => {
            text.red().bold().to_string()
        }
    }
}

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Critical => "CRITICAL".red().bold().to_string(),
        Severity::Major => "   MAJOR".red().to_string(),
        Severity::Warning => "    WARN".yellow().bold().to_string(),
        Severity::Info => "    INFO".blue().to_string(),
    }
}

fn push_finding(out: &mut String, finding: &Finding, options: RenderOptions) {
    out.push_str(&format!(
        "  [{}] {:<24} {}\n",
        severity_label(finding.severity),
        finding.category.dimmed(),
        finding.message,
    ));
    if !options.minimal {
        for (key, value) in &finding.details {
            out.push_str(&format!(
                "             {}: {}\n",
                key.dimmed(),
                detail_text(value)
            ));
        }
    }
    if let Some(ref suggestion) = finding.suggestion {
        out.push_str(&format!("             > {}\n", suggestion.cyan()));
    }
}

fn detail_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(detail_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn push_cross_references(out: &mut String, xref: &CrossReferenceReport) {
    let stats = &xref.stats;
    out.push_str(&format!("{}\n", "Cross-references".bold().underline()));
    out.push_str(&format!(
        "  {} files: {} direct, {} indirect, {} unreferenced, {} broken references\n",
        stats.total_files,
        stats.direct,
        stats.indirect,
        stats.unreferenced,
        stats.broken_references
    ));
    out.push_str(&format!(
        "  Coverage: {:.1}% direct, {:.1}% total\n\n",
        stats.direct_coverage_pct, stats.total_coverage_pct
    ));

    let mut direct = xref.of_class(Classification::Direct).peekable();
    if direct.peek().is_some() {
        out.push_str(&format!("  {}\n", "Direct (mentioned in SKILL.md)".bold()));
        for file in direct {
            out.push_str(&format!("    {} {}\n", "✓".green(), file.path));
        }
    }

    let mut indirect = xref.of_class(Classification::Indirect).peekable();
    if indirect.peek().is_some() {
        out.push_str(&format!("  {}\n", "Indirect (via other resources)".bold()));
        for file in indirect {
            out.push_str(&format!("    {} {}\n", "↳".cyan(), file.path));
            if file.chain.is_empty() {
                out.push_str(&format!("      {}\n", "no chain back to SKILL.md".yellow()));
            } else {
                out.push_str(&format!("      chain: {}\n", file.chain.join(" → ").cyan()));
            }
            for r in file.referenced_by.iter().take(REFERRERS_SHOWN) {
                out.push_str(&format!(
                    "      {}:{} {}\n",
                    r.source,
                    r.line,
                    r.context.dimmed()
                ));
            }
            if file.referenced_by.len() > REFERRERS_SHOWN {
                out.push_str(&format!(
                    "      ... and {} more\n",
                    file.referenced_by.len() - REFERRERS_SHOWN
                ));
            }
        }
    }

    let mut orphans = xref.of_class(Classification::Unreferenced).peekable();
    if orphans.peek().is_some() {
        out.push_str(&format!("  {}\n", "Unreferenced (orphaned)".bold()));
        for file in orphans {
            out.push_str(&format!("    {} {}\n", "✗".yellow(), file.path));
        }
    }

    if !xref.broken.is_empty() {
        out.push_str(&format!("  {}\n", "Broken references".bold()));
        for broken in &xref.broken {
            out.push_str(&format!(
                "    {} {} (mentioned in {})\n",
                "✗".red(),
                broken.target,
                broken.sources().join(", ")
            ));
        }
    }
    out.push('\n');
}
