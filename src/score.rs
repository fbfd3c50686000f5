//! Score aggregation.
//!
//! Every skill starts at 5 points. Critical findings cost 2, major findings
//! 1 and warnings half a point; info findings are free. The result is clamped
//! to `1..=5` and truncated toward zero.

use crate::finding::{Finding, Severity};
use std::fmt;

pub const MAX_SCORE: u8 = 5;
pub const MIN_SCORE: u8 = 1;
/// Scores at or above this value approve the skill and exit with status 0.
pub const PASSING_SCORE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Approve,
    NeedsMinorRevision,
    NeedsMajorRevision,
    Error,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Approve => write!(f, "APPROVE"),
            Recommendation::NeedsMinorRevision => write!(f, "NEEDS_MINOR_REVISION"),
            Recommendation::NeedsMajorRevision => write!(f, "NEEDS_MAJOR_REVISION"),
            Recommendation::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub score: u8,
    pub recommendation: Recommendation,
}

impl Assessment {
    /// The forced outcome of a run that failed internally.
    pub fn error() -> Self {
        Assessment {
            score: MIN_SCORE,
            recommendation: Recommendation::Error,
        }
    }
}

/// Points deducted for a single finding.
pub fn penalty(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 2.0,
        Severity::Major => 1.0,
        Severity::Warning => 0.5,
        Severity::Info => 0.0,
    }
}

/// Folds findings into a bounded score and its recommendation.
///
/// ```
/// use oxidized_skill_lint::finding::{Finding, Severity};
/// use oxidized_skill_lint::score::{aggregate, Recommendation};
///
/// let findings = [Finding::new("template_duplication", Severity::Critical, "dup")];
/// let assessment = aggregate(&findings);
/// assert_eq!(assessment.score, 3);
/// assert_eq!(assessment.recommendation, Recommendation::NeedsMinorRevision);
/// ```
pub fn aggregate<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Assessment {
    let deducted: f64 = findings.into_iter().map(|f| penalty(f.severity)).sum();
    let raw = f64::from(MAX_SCORE) - deducted;
    let score = raw.clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)).trunc() as u8;

    Assessment {
        score,
        recommendation: recommend(score),
    }
}

pub fn recommend(score: u8) -> Recommendation {
    if score >= PASSING_SCORE {
        Recommendation::Approve
    } else if score == 3 {
        Recommendation::NeedsMinorRevision
    } else {
        Recommendation::NeedsMajorRevision
    }
}
