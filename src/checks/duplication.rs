//! Duplication against sibling skills.
//!
//! Templates are compared by content: for every file under `templates/`, the
//! first same-named file under each sibling's `templates/` is scored with
//! [`similarity::ratio`](crate::similarity::ratio). Python scripts are
//! compared by name only; a sibling holding a script with the same file name
//! is enough to report duplication.
//!
//! | Category | Sev | What it flags |
//! |----------|-----|---------------|
//! | `template_duplication` | Critical | Similarity above `thresholds.duplication` |
//! | `template_similarity` | Warning | Similarity above `thresholds.similarity` |
//! | `template_unreadable` | Info | A template pair that is not text |
//! | `script_duplication` | Major | Same `scripts/*.py` file name in a sibling |
//! | `no_templates` | Info | The skill has no `templates/` directory |

use super::{Check, Context, RuleInfo};
use crate::bundle::{ResourceFile, ResourceKind, SkillBundle};
use crate::error::Result;
use crate::finding::{Finding, Severity};
use crate::similarity;

pub struct DuplicationCheck;

impl Check for DuplicationCheck {
    fn name(&self) -> &'static str {
        "duplication"
    }

    fn description(&self) -> &'static str {
        "Templates and scripts duplicated in sibling skills"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        if ctx.bundle.has_dir("templates") {
            check_templates(ctx, &mut findings);
        } else {
            findings.push(Finding::new(
                "no_templates",
                Severity::Info,
                "No templates directory found",
            ));
        }
        check_scripts(ctx, &mut findings);

        Ok(findings)
    }
}

fn check_templates(ctx: &Context<'_>, findings: &mut Vec<Finding>) {
    let thresholds = &ctx.config.thresholds;

    for template in ctx.bundle.files_of_kind(ResourceKind::Template) {
        for sibling in ctx.siblings {
            let Some(other) = find_template(sibling, template.file_name()) else {
                continue;
            };

            let (Some(a), Some(b)) = (template.content.as_text(), other.content.as_text()) else {
                findings.push(
                    Finding::new(
                        "template_unreadable",
                        Severity::Info,
                        format!(
                            "Template '{}' could not be compared with '{}' skill (not text)",
                            template.file_name(),
                            sibling.name
                        ),
                    )
                    .detail("file", template.path.as_str())
                    .detail("other_skill", sibling.name.as_str()),
                );
                continue;
            };

            let ratio = similarity::ratio(a, b);
            tracing::debug!(
                template = %template.path,
                sibling = %sibling.name,
                ratio,
                "compared templates"
            );

            if ratio > thresholds.duplication {
                findings.push(
                    Finding::new(
                        "template_duplication",
                        Severity::Critical,
                        format!(
                            "Template '{}' duplicates content from '{}' skill",
                            template.file_name(),
                            sibling.name
                        ),
                    )
                    .detail("file", template.path.as_str())
                    .detail("skill", ctx.bundle.name.as_str())
                    .detail("duplicate_in", sibling.name.as_str())
                    .detail("similarity", format_percent(ratio))
                    .suggest(format!(
                        "Remove the template or delegate to '{}' skill",
                        sibling.name
                    )),
                );
            } else if ratio > thresholds.similarity {
                findings.push(
                    Finding::new(
                        "template_similarity",
                        Severity::Warning,
                        format!(
                            "Template '{}' has similar content to '{}' skill",
                            template.file_name(),
                            sibling.name
                        ),
                    )
                    .detail("file", template.path.as_str())
                    .detail("skill", ctx.bundle.name.as_str())
                    .detail("similar_to", sibling.name.as_str())
                    .detail("similarity", format_percent(ratio))
                    .suggest("Review for potential consolidation or delegation"),
                );
            }
        }
    }
}

/// First template named `name` anywhere under the sibling's `templates/`.
fn find_template<'a>(sibling: &'a SkillBundle, name: &str) -> Option<&'a ResourceFile> {
    sibling
        .files_of_kind(ResourceKind::Template)
        .find(|f| f.file_name() == name)
}

fn check_scripts(ctx: &Context<'_>, findings: &mut Vec<Finding>) {
    for script in python_scripts(ctx.bundle) {
        for sibling in ctx.siblings {
            if python_scripts(sibling).any(|s| s.file_name() == script.file_name()) {
                findings.push(
                    Finding::new(
                        "script_duplication",
                        Severity::Major,
                        format!(
                            "Script '{}' exists in '{}' skill",
                            script.file_name(),
                            sibling.name
                        ),
                    )
                    .detail("file", script.path.as_str())
                    .detail("duplicate_in", sibling.name.as_str())
                    .suggest("Consolidate scripts or justify duplication"),
                );
            }
        }
    }
}

/// `.py` files directly inside `scripts/`.
fn python_scripts(bundle: &SkillBundle) -> impl Iterator<Item = &ResourceFile> {
    bundle
        .files_of_kind(ResourceKind::Script)
        .filter(|f| f.is_top_level() && f.path.ends_with(".py"))
}

/// `0.8333` → `"83.3%"`.
fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub fn rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            id: "template_duplication",
            severity: "critical",
            check: "duplication",
            message: "Template content duplicates a same-named template in a sibling skill",
            remediation: "Remove the template and delegate to the skill that owns it",
        },
        RuleInfo {
            id: "template_similarity",
            severity: "warning",
            check: "duplication",
            message: "Template content is similar to a same-named template in a sibling skill",
            remediation: "Review for potential consolidation or delegation",
        },
        RuleInfo {
            id: "template_unreadable",
            severity: "info",
            check: "duplication",
            message: "Same-named templates could not be compared because one is not text",
            remediation: "No action needed unless the template is meant to be text",
        },
        RuleInfo {
            id: "script_duplication",
            severity: "major",
            check: "duplication",
            message: "A sibling skill ships a Python script with the same file name",
            remediation: "Consolidate scripts in one skill or justify the duplication",
        },
        RuleInfo {
            id: "no_templates",
            severity: "info",
            check: "duplication",
            message: "No templates directory found",
            remediation: "No action needed",
        },
    ]
}
