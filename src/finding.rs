use crate::graph::CrossReferenceReport;
use crate::score::{self, Recommendation};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Warning,
    Info,
}

impl Severity {
    /// Critical and major findings are violations; the rest are advisory.
    pub fn is_violation(self) -> bool {
        matches!(self, Severity::Critical | Severity::Major)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Major => write!(f, "major"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    pub category: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(category: &str, severity: Severity, message: impl Into<String>) -> Self {
        Finding {
            category: category.to_string(),
            severity,
            message: message.into(),
            details: BTreeMap::new(),
            suggestion: None,
        }
    }

    pub fn detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Relative file the finding points at, when it names one.
    pub fn file(&self) -> Option<&str> {
        self.details.get("file").and_then(Value::as_str)
    }
}

/// Findings of a single [`Check`](crate::checks::Check) run.
#[derive(Debug, serde::Serialize)]
pub struct CheckResult {
    pub check_name: String,
    pub findings: Vec<Finding>,
    pub skipped: bool,
    pub error: Option<String>,
}

impl CheckResult {
    pub fn skipped(name: &str) -> Self {
        CheckResult {
            check_name: name.to_string(),
            findings: vec![],
            skipped: true,
            error: None,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ValidationReport {
    pub bundle: String,
    pub bundle_path: PathBuf,
    pub timestamp: String,
    pub violations: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub info: Vec<Finding>,
    pub score: u8,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_references: Option<CrossReferenceReport>,
    pub check_results: Vec<CheckResult>,
}

impl ValidationReport {
    /// Splits the findings of every check by severity and scores them.
    ///
    /// A check that failed internally turns the whole report into an
    /// [`Recommendation::Error`] report with score 1.
    pub fn from_results(
        bundle: &str,
        bundle_path: PathBuf,
        mut results: Vec<CheckResult>,
        cross_references: Option<CrossReferenceReport>,
    ) -> Self {
        let mut violations = Vec::new();
        let mut warnings = Vec::new();
        let mut info = Vec::new();

        for result in &mut results {
            for finding in result.findings.drain(..) {
                match finding.severity {
                    s if s.is_violation() => violations.push(finding),
                    Severity::Warning => warnings.push(finding),
                    _ => info.push(finding),
                }
            }
        }

        let error = results
            .iter()
            .filter_map(|r| r.error.as_ref().map(|e| format!("{}: {e}", r.check_name)))
            .next();

        let assessment = match &error {
            Some(_) => score::Assessment::error(),
            None => score::aggregate(violations.iter().chain(&warnings).chain(&info)),
        };

        ValidationReport {
            bundle: bundle.to_string(),
            bundle_path,
            timestamp: chrono::Utc::now().to_rfc3339(),
            violations,
            warnings,
            info,
            score: assessment.score,
            recommendation: assessment.recommendation,
            error,
            cross_references,
            check_results: results,
        }
    }

    pub fn passed(&self) -> bool {
        self.score >= score::PASSING_SCORE
    }

    /// Count critical, major, warning and info findings.
    pub fn count_by_severity(&self) -> (usize, usize, usize, usize) {
        let (critical, major) =
            self.violations
                .iter()
                .fold((0, 0), |(c, m), f| match f.severity {
                    Severity::Critical => (c + 1, m),
                    _ => (c, m + 1),
                });
        (critical, major, self.warnings.len(), self.info.len())
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.violations
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }
}
