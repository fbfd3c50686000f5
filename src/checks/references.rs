//! Findings derived from the cross-reference graph.
//!
//! | Category | Sev | What it flags |
//! |----------|-----|---------------|
//! | `broken_reference` | Major | A mentioned resource path that does not exist |
//! | `unreferenced_resource` | Warning | A resource no document mentions |
//! | `missing_reference_chain` | Info | An indirect file with no chain back to `SKILL.md` |
//! | `reference_coverage` | Info | Coverage summary |

use super::{Check, Context, RuleInfo};
use crate::error::Result;
use crate::finding::{Finding, Severity};
use crate::graph::Classification;
use serde_json::json;

pub struct ReferencesCheck;

impl Check for ReferencesCheck {
    fn name(&self) -> &'static str {
        "references"
    }

    fn description(&self) -> &'static str {
        "Broken references, orphaned resources and reference coverage"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<Vec<Finding>> {
        let xref = ctx.xref;
        let mut findings = Vec::new();

        for broken in &xref.broken {
            let examples: Vec<String> = broken
                .examples()
                .iter()
                .map(|r| format!("{}:{}: {}", r.source, r.line, r.context))
                .collect();
            let mut finding = Finding::new(
                "broken_reference",
                Severity::Major,
                format!("'{}' is referenced but does not exist", broken.target),
            );
            // Locate the finding at the first mention.
            if let Some(first) = broken.referrers.first() {
                finding = finding
                    .detail("file", first.source.as_str())
                    .detail("line", first.line);
            }
            findings.push(
                finding
                    .detail("target", broken.target.as_str())
                    .detail("mentioned_in", json!(broken.sources()))
                    .detail("mentions", broken.referrers.len())
                    .detail("examples", json!(examples))
                    .suggest("Create the file or fix the path in the referring documents"),
            );
        }

        for file in xref.of_class(Classification::Unreferenced) {
            let mut finding = Finding::new(
                "unreferenced_resource",
                Severity::Warning,
                format!("'{}' is never mentioned by SKILL.md or any other resource", file.path),
            )
            .detail("file", file.path.as_str())
            .suggest(format!(
                "Reference it from SKILL.md (e.g. 'See {}') or remove it",
                file.path
            ));
            if !file.mentions_others.is_empty() {
                finding = finding.detail("mentions", json!(file.mentions_others));
            }
            findings.push(finding);
        }

        for file in xref.of_class(Classification::Indirect) {
            if file.chain.is_empty() {
                let referrers: Vec<&str> =
                    file.referenced_by.iter().map(|r| r.source.as_str()).collect();
                findings.push(
                    Finding::new(
                        "missing_reference_chain",
                        Severity::Info,
                        format!(
                            "'{}' is only mentioned by files that SKILL.md does not lead to",
                            file.path
                        ),
                    )
                    .detail("file", file.path.as_str())
                    .detail("referenced_by", json!(referrers)),
                );
            }
        }

        let stats = &xref.stats;
        findings.push(
            Finding::new(
                "reference_coverage",
                Severity::Info,
                format!(
                    "{} of {} resource files reachable from SKILL.md ({:.1}%), {} directly ({:.1}%)",
                    stats.direct + stats.indirect,
                    stats.total_files,
                    stats.total_coverage_pct,
                    stats.direct,
                    stats.direct_coverage_pct,
                ),
            )
            .detail("total_files", stats.total_files)
            .detail("direct", stats.direct)
            .detail("indirect", stats.indirect)
            .detail("unreferenced", stats.unreferenced)
            .detail("broken_references", stats.broken_references),
        );

        Ok(findings)
    }
}

pub fn rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            id: "broken_reference",
            severity: "major",
            check: "references",
            message: "A resource path mentioned in the skill does not exist",
            remediation: "Create the missing file or correct the path where it is mentioned",
        },
        RuleInfo {
            id: "unreferenced_resource",
            severity: "warning",
            check: "references",
            message: "Resource file is never mentioned by SKILL.md or another resource",
            remediation: "Mention the file where it is needed (e.g. 'See references/x.md') or delete it",
        },
        RuleInfo {
            id: "missing_reference_chain",
            severity: "info",
            check: "references",
            message: "File is mentioned only by resources that SKILL.md never leads to",
            remediation: "Link the referring resources from SKILL.md, directly or through another resource",
        },
        RuleInfo {
            id: "reference_coverage",
            severity: "info",
            check: "references",
            message: "Share of resource files reachable from SKILL.md",
            remediation: "No action needed; raise coverage by referencing orphaned files",
        },
    ]
}
