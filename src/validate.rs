//! Validation orchestration.
//!
//! [`run_validation`] is the main entry-point: it collects the bundle, builds
//! and classifies its reference graph, loads sibling bundles, runs every
//! enabled [`Check`](crate::checks::Check) and scores the result.

use crate::bundle::{SiblingBundleProvider, SkillBundle};
use crate::checks::{self, Check, Context, RuleInfo};
use crate::config::Config;
use crate::error::{LintError, Result};
use crate::finding::{CheckResult, Finding, Severity, ValidationReport};
use crate::graph::{classify, ReferenceGraph};
use std::path::Path;

/// Validates the skill at `path` against the bundles `siblings` lists.
///
/// # Pipeline
///
/// 1. Collects the manifest and resource files ([`SkillBundle::load`]).
///    Unreadable files become info findings.
/// 2. Builds the [`ReferenceGraph`] and classifies every resource.
/// 3. Lists sibling bundles, dropping the bundle under validation.
/// 4. Runs the enabled checks in order.
/// 5. Assembles and scores the [`ValidationReport`].
///
/// # Errors
///
/// Only fatal conditions are errors: a missing or non-directory bundle root.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use oxidized_skill_lint::{bundle::DirectorySiblings, config::Config, validate};
///
/// let config = Config::default();
/// let siblings = DirectorySiblings::new("/opt/skills");
/// let report = validate::run_validation(Path::new("./my-skill"), &config, &siblings)?;
/// std::process::exit(if report.passed() { 0 } else { 1 });
/// # Ok::<(), oxidized_skill_lint::error::LintError>(())
/// ```
pub fn run_validation(
    path: &Path,
    config: &Config,
    siblings: &dyn SiblingBundleProvider,
) -> Result<ValidationReport> {
    let checks = checks::all_checks();
    run_validation_with(path, config, siblings, &checks)
}

/// [`run_validation`] with an explicit set of checks.
pub fn run_validation_with(
    path: &Path,
    config: &Config,
    siblings: &dyn SiblingBundleProvider,
    checks: &[Box<dyn Check>],
) -> Result<ValidationReport> {
    let bundle = SkillBundle::load(path)?;
    tracing::debug!(
        bundle = %bundle.name,
        files = bundle.files.len(),
        unreadable = bundle.unreadable.len(),
        "collected bundle"
    );

    let mut pipeline = Vec::new();
    for file in &bundle.unreadable {
        pipeline.push(
            Finding::new(
                "unreadable_file",
                Severity::Info,
                format!("Could not read '{}': {}", file.path, file.reason),
            )
            .detail("file", file.path.as_str()),
        );
    }

    let graph = ReferenceGraph::build(&bundle);
    let xref = classify(&graph, config.thresholds.max_chain_depth);

    let sibling_bundles = match siblings.list() {
        Ok(list) => exclude_self(list, &bundle),
        Err(LintError::SiblingsUnavailable(dir)) => {
            tracing::warn!(dir = %dir.display(), "no sibling skills directory");
            pipeline.push(
                Finding::new(
                    "siblings_unavailable",
                    Severity::Info,
                    format!(
                        "Sibling skills directory {} not found; cross-skill checks compared nothing",
                        dir.display()
                    ),
                )
                .suggest("Pass --skills-dir to compare against installed skills"),
            );
            Vec::new()
        }
        Err(e) => {
            let results = vec![CheckResult {
                check_name: "siblings".to_string(),
                findings: pipeline,
                skipped: false,
                error: Some(e.to_string()),
            }];
            return Ok(ValidationReport::from_results(
                &bundle.name,
                bundle.root.clone(),
                results,
                Some(xref),
            ));
        }
    };

    let ctx = Context {
        bundle: &bundle,
        graph: &graph,
        xref: &xref,
        siblings: &sibling_bundles,
        config,
    };

    let mut results = vec![CheckResult {
        check_name: "collect".to_string(),
        findings: pipeline,
        skipped: false,
        error: None,
    }];
    results.extend(checks::run_checks(checks, &ctx));

    Ok(ValidationReport::from_results(
        &bundle.name,
        bundle.root.clone(),
        results,
        Some(xref),
    ))
}

/// Drops the bundle under validation from the sibling list, comparing
/// canonical paths so `./a` and `/abs/a` are the same skill.
fn exclude_self(siblings: Vec<SkillBundle>, bundle: &SkillBundle) -> Vec<SkillBundle> {
    let own = bundle.root.canonicalize().ok();
    siblings
        .into_iter()
        .filter(|s| match (&own, s.root.canonicalize().ok()) {
            (Some(own), Some(other)) => *own != other,
            _ => s.root != bundle.root,
        })
        .collect()
}

/// Categories emitted by the pipeline itself rather than by a check.
pub fn rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            id: "unreadable_file",
            severity: "info",
            check: "collect",
            message: "A file in the skill could not be read and was left out of the analysis",
            remediation: "Fix the file permissions or remove the file",
        },
        RuleInfo {
            id: "siblings_unavailable",
            severity: "info",
            check: "collect",
            message: "The sibling skills directory does not exist",
            remediation: "Pass --skills-dir or set [siblings] dir in the config file",
        },
    ]
}
