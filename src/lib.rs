//! # oxidized-skill-lint
//!
//! Structural linting for AI agent skills.
//!
//! `oxidized-skill-lint` reads a skill directory (a `SKILL.md` manifest plus
//! `scripts/`, `references/`, `templates/` and `assets/`), works out which
//! files mention which others, and reports broken references, orphaned
//! resources, content duplicated from sibling skills and overlapping skill
//! domains. Findings fold into a 1–5 score with a recommendation, rendered as
//! human-readable text, JSON, or [SARIF].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use oxidized_skill_lint::{bundle::DirectorySiblings, config::Config, output, validate};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let siblings = DirectorySiblings::new("/home/me/.claude/skills");
//! let report = validate::run_validation(Path::new("./my-skill"), &config, &siblings)
//!     .expect("skill directory missing");
//!
//! let text = output::format_report(
//!     &report,
//!     &output::OutputFormat::Pretty,
//!     output::RenderOptions::default(),
//! );
//! print!("{text}");
//! ```
//!
//! ## Architecture
//!
//! 1. **[`bundle`]** — collect the manifest and resource files; list siblings.
//! 2. **[`graph`]** — extract path mentions, build the reference graph,
//!    classify files as direct, indirect or unreferenced and find chains.
//! 3. **[`checks`]** — pluggable [`checks::Check`] implementations turning the
//!    graph and sibling comparisons into [`finding::Finding`]s.
//! 4. **[`score`]** — fold findings into a score and recommendation.
//! 5. **[`validate`]** — orchestrate the above into a [`finding::ValidationReport`].
//! 6. **[`output`]** — format reports as pretty text, JSON, or SARIF.
//!
//! [SARIF]: https://sarifweb.azurewebsites.net/

pub mod bundle;
pub mod checks;
pub mod config;
pub mod error;
pub mod finding;
pub mod graph;
pub mod markdown;
pub mod output;
pub mod score;
pub mod similarity;
pub mod validate;
