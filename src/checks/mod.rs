//! Bundle checks.
//!
//! Every check implements the [`Check`] trait and reads from a shared
//! [`Context`]: the collected bundle, its reference graph and classification,
//! the sibling bundles and the configuration.
//!
//! - [`references`]: broken references, orphaned files, coverage.
//! - [`structure`]: manifest presence, reference naming and headings.
//! - [`duplication`]: templates and scripts duplicated in sibling skills.
//! - [`overlap`]: manifest descriptions sharing too many key terms.
//!
//! Use [`all_checks`] to obtain all registered checks and [`all_rules`] to
//! list every finding category they can emit.

pub mod duplication;
pub mod overlap;
pub mod references;
pub mod structure;

use crate::bundle::SkillBundle;
use crate::config::Config;
use crate::error::Result;
use crate::finding::{CheckResult, Finding};
use crate::graph::{CrossReferenceReport, ReferenceGraph};

/// Everything a check may look at. Built once per validation run.
pub struct Context<'a> {
    pub bundle: &'a SkillBundle,
    pub graph: &'a ReferenceGraph,
    pub xref: &'a CrossReferenceReport,
    /// Sibling bundles, never including `bundle` itself.
    pub siblings: &'a [SkillBundle],
    pub config: &'a Config,
}

pub trait Check {
    /// Unique identifier, also the key under `[checks]` in the config file.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Runs the check.
    ///
    /// # Errors
    ///
    /// An error means the check itself broke, not that the bundle has a
    /// problem; problems are reported as findings.
    fn run(&self, ctx: &Context<'_>) -> Result<Vec<Finding>>;
}

pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(references::ReferencesCheck),
        Box::new(structure::StructureCheck),
        Box::new(duplication::DuplicationCheck),
        Box::new(overlap::OverlapCheck),
    ]
}

/// Runs every enabled check in order. Disabled checks are recorded as
/// skipped; a failing check records its error and the remaining checks
/// still run.
pub fn run_checks(checks: &[Box<dyn Check>], ctx: &Context<'_>) -> Vec<CheckResult> {
    checks
        .iter()
        .map(|check| {
            if !ctx.config.is_check_enabled(check.name()) {
                return CheckResult::skipped(check.name());
            }
            match check.run(ctx) {
                Ok(findings) => CheckResult {
                    check_name: check.name().to_string(),
                    findings,
                    skipped: false,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(check = check.name(), error = %e, "check failed");
                    CheckResult {
                        check_name: check.name().to_string(),
                        findings: vec![],
                        skipped: false,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}

/// Metadata for a single finding category.
///
/// Returned by [`all_rules`] and used by the `list-rules` and `explain`
/// commands.
pub struct RuleInfo {
    /// Finding category (e.g. `"broken_reference"`).
    pub id: &'static str,
    /// `"critical"`, `"major"`, `"warning"` or `"info"`.
    pub severity: &'static str,
    /// Check that emits this category.
    pub check: &'static str,
    pub message: &'static str,
    pub remediation: &'static str,
}

/// Aggregates [`RuleInfo`] from every check module, plus the categories the
/// validation pipeline emits itself.
pub fn all_rules() -> Vec<RuleInfo> {
    let mut rules = crate::validate::rules();
    rules.extend(references::rules());
    rules.extend(structure::rules());
    rules.extend(duplication::rules());
    rules.extend(overlap::rules());
    rules
}
