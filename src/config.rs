//! Configuration loading.
//!
//! The default configuration file is `oxidized-skill-lint.toml` in the
//! current working directory. Every field has a default, so the file can be
//! omitted entirely.
//!
//! ```toml
//! [thresholds]
//! duplication = 0.8      # template similarity above this is critical
//! similarity = 0.5       # ...above this is a warning
//! overlap_terms = 3      # shared description terms that signal overlap
//! max_chain_depth = 5
//!
//! [checks]
//! overlap = false
//!
//! [siblings]
//! dir = "/opt/skills"
//! ```

use crate::error::{LintError, Result};
use crate::graph::DEFAULT_MAX_CHAIN_DEPTH;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "oxidized-skill-lint.toml";

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub checks: ChecksConfig,
    pub siblings: SiblingsConfig,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Thresholds {
    /// Template similarity ratio above which duplication is critical.
    pub duplication: f64,
    /// Template similarity ratio above which a warning is raised.
    pub similarity: f64,
    /// Minimum number of shared description terms reported as overlap.
    pub overlap_terms: usize,
    /// Backward hops searched when reconstructing a reference chain.
    pub max_chain_depth: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            duplication: 0.8,
            similarity: 0.5,
            overlap_terms: 3,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }
}

/// Per-check on/off toggles. Every check defaults to enabled.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ChecksConfig {
    pub references: bool,
    pub structure: bool,
    pub duplication: bool,
    pub overlap: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        ChecksConfig {
            references: true,
            structure: true,
            duplication: true,
            overlap: true,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SiblingsConfig {
    /// Directory holding the installed skills; `~/.claude/skills` when unset.
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. Otherwise try `oxidized-skill-lint.toml` in the current directory.
    /// 3. Otherwise return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// [`LintError::ConfigNotFound`] for a missing explicit path,
    /// [`LintError::Io`] when the file cannot be read and
    /// [`LintError::ConfigParse`] for invalid TOML or out-of-range thresholds.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config_path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => return Err(LintError::ConfigNotFound(p.to_path_buf())),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        let Some(path) = config_path else {
            return Ok(Config::default());
        };

        let content = std::fs::read_to_string(&path).map_err(|e| LintError::io(&path, e))?;
        let config: Config = toml::from_str(&content).map_err(|e| LintError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        config.validate().map_err(|message| LintError::ConfigParse {
            path: path.clone(),
            message,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.similarity) || !(0.0..=1.0).contains(&t.duplication) {
            return Err("similarity thresholds must be between 0 and 1".to_string());
        }
        if t.similarity > t.duplication {
            return Err("thresholds.similarity must not exceed thresholds.duplication".to_string());
        }
        Ok(())
    }

    /// Returns `true` if the named check is enabled. Unknown names are enabled.
    pub fn is_check_enabled(&self, name: &str) -> bool {
        match name {
            "references" => self.checks.references,
            "structure" => self.checks.structure,
            "duplication" => self.checks.duplication,
            "overlap" => self.checks.overlap,
            _ => true,
        }
    }

    /// Siblings directory: the explicit override, then the config file, then
    /// the conventional installation directory.
    pub fn siblings_dir(&self, cli_override: Option<&Path>) -> Option<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.siblings.dir.clone())
            .or_else(crate::bundle::DirectorySiblings::default_root)
    }
}
