//! Bundle layout checks.
//!
//! | Category | Sev | What it flags |
//! |----------|-----|---------------|
//! | `missing_skill_md` | Critical | No `SKILL.md` at the bundle root |
//! | `reference_naming` | Warning | A reference file with a generic name such as `guide.md` |
//! | `heading_hierarchy` | Info | A reference document that skips heading levels |

use super::{Check, Context, RuleInfo};
use crate::bundle::ResourceKind;
use crate::error::Result;
use crate::finding::{Finding, Severity};
use crate::markdown::{extract_headings, skipped_heading_levels};

/// File names generic enough to suggest a reference shared with other skills.
/// Only an exact (case-insensitive) match of the whole file name counts.
const GENERIC_REFERENCE_NAMES: &[&str] = &[
    "template.md",
    "example.md",
    "guide.md",
    "workflow.md",
    "best-practices.md",
    "patterns.md",
    "structure.md",
    "readme.md",
];

pub struct StructureCheck;

impl Check for StructureCheck {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn description(&self) -> &'static str {
        "SKILL.md presence, reference naming and heading structure"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        if ctx.bundle.manifest.is_none() && !ctx.bundle.root.join(crate::bundle::MANIFEST).exists()
        {
            findings.push(
                Finding::new("missing_skill_md", Severity::Critical, "SKILL.md not found")
                    .suggest("Create SKILL.md with name and description frontmatter"),
            );
        }

        for file in ctx.bundle.files_of_kind(ResourceKind::Reference) {
            if file.is_top_level()
                && GENERIC_REFERENCE_NAMES.contains(&file.file_name().to_lowercase().as_str())
            {
                findings.push(
                    Finding::new(
                        "reference_naming",
                        Severity::Warning,
                        format!(
                            "Reference '{}' has a very generic name that might indicate a shared domain",
                            file.file_name()
                        ),
                    )
                    .detail("file", file.path.as_str())
                    .suggest("Use a more specific name or verify the content is skill-specific"),
                );
            }

            if !file.path.ends_with(".md") {
                continue;
            }
            let Some(text) = file.content.as_text() else {
                continue;
            };
            let headings = extract_headings(text);
            for (prev_level, heading) in skipped_heading_levels(&headings) {
                findings.push(
                    Finding::new(
                        "heading_hierarchy",
                        Severity::Info,
                        format!(
                            "'{}' skips from H{} to H{} at '{}'",
                            file.path, prev_level, heading.level, heading.title
                        ),
                    )
                    .detail("file", file.path.as_str())
                    .detail("line", heading.line),
                );
            }
        }

        Ok(findings)
    }
}

pub fn rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            id: "missing_skill_md",
            severity: "critical",
            check: "structure",
            message: "SKILL.md not found in the skill root",
            remediation: "Create SKILL.md with name and description frontmatter",
        },
        RuleInfo {
            id: "reference_naming",
            severity: "warning",
            check: "structure",
            message: "Reference file has a very generic name (guide.md, patterns.md, ...)",
            remediation: "Rename it after the skill-specific topic it covers",
        },
        RuleInfo {
            id: "heading_hierarchy",
            severity: "info",
            check: "structure",
            message: "Reference document skips a heading level",
            remediation: "Nest headings one level at a time (H1 → H2 → H3)",
        },
    ]
}
