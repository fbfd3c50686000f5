//! Domain overlap between skill descriptions.
//!
//! Each manifest description is reduced to a set of key terms: lowercase
//! whitespace-separated words, stripped of surrounding punctuation, longer
//! than four characters and not in [`STOP_WORDS`]. Sharing
//! `thresholds.overlap_terms` or more key terms with a sibling suggests the
//! two skills cover the same domain.

use super::{Check, Context, RuleInfo};
use crate::error::Result;
use crate::finding::{Finding, Severity};
use crate::markdown::extract_description;
use serde_json::json;
use std::collections::BTreeSet;

/// Terms that appear in almost every skill description.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "for", "with", "to", "from", "this", "that", "these",
    "those", "is", "are", "was", "were", "when", "should", "be", "used", "skill", "claude", "code",
    // actions
    "creates", "create", "creating", "created", "provides", "provide", "providing", "provided",
    "manages", "manage", "managing", "managed", "helps", "help", "helping", "helped", "uses",
    "use", "using", "triggers", "trigger", "requests", "request",
    // qualifiers
    "new", "existing", "current", "updated", "where", "what", "how", "which",
    // generic nouns
    "like", "such", "also", "well", "make", "made", "file", "files", "folder", "folders",
    "guide", "workflow", "process", "task", "tasks",
];

const MIN_TERM_CHARS: usize = 5;
const SURROUNDING_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'',
];

/// Key terms of a description.
///
/// ```
/// use oxidized_skill_lint::checks::overlap::key_terms;
///
/// let terms = key_terms("Creates (PDF) reports from spreadsheet exports.");
/// assert!(terms.contains("reports"));
/// assert!(terms.contains("spreadsheet"));
/// assert!(!terms.contains("creates"));
/// assert!(!terms.contains("pdf"));
/// ```
pub fn key_terms(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .map(|w| w.trim_matches(SURROUNDING_PUNCTUATION).to_string())
        .filter(|w| w.chars().count() >= MIN_TERM_CHARS && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

pub struct OverlapCheck;

impl Check for OverlapCheck {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn description(&self) -> &'static str {
        "Domain overlap between skill descriptions"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<Vec<Finding>> {
        let Some(manifest) = ctx.bundle.manifest_text() else {
            return Ok(vec![]);
        };
        let Some(description) = extract_description(manifest) else {
            return Ok(vec![Finding::new(
                "missing_description",
                Severity::Info,
                "SKILL.md has no description; domain overlap was not checked",
            )
            .suggest("Add a description field to the SKILL.md frontmatter")]);
        };

        let terms = key_terms(&description);
        let mut findings = Vec::new();

        for sibling in ctx.siblings {
            let Some(other) = sibling.manifest_text().and_then(extract_description) else {
                continue;
            };
            let other_terms = key_terms(&other);
            let shared: Vec<&String> = terms.intersection(&other_terms).collect();
            if shared.len() >= ctx.config.thresholds.overlap_terms {
                findings.push(
                    Finding::new(
                        "domain_overlap",
                        Severity::Warning,
                        format!("Potential domain overlap with '{}' skill", sibling.name),
                    )
                    .detail("skill", sibling.name.as_str())
                    .detail("overlapping_terms", json!(shared))
                    .suggest(format!(
                        "Review skill boundaries and delegation to '{}'",
                        sibling.name
                    )),
                );
            }
        }

        Ok(findings)
    }
}

pub fn rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            id: "domain_overlap",
            severity: "warning",
            check: "overlap",
            message: "Skill description shares several key terms with a sibling skill",
            remediation: "Clarify the skill boundary or delegate to the overlapping skill",
        },
        RuleInfo {
            id: "missing_description",
            severity: "info",
            check: "overlap",
            message: "SKILL.md has no description, so overlap could not be checked",
            remediation: "Add a description field to the SKILL.md frontmatter",
        },
    ]
}
