use oxidized_skill_lint::finding::{CheckResult, Finding, Severity, ValidationReport};
use oxidized_skill_lint::score::{aggregate, recommend, Recommendation};
use std::path::PathBuf;

fn findings(severities: &[Severity]) -> Vec<Finding> {
    severities
        .iter()
        .map(|&s| Finding::new("test", s, "test finding"))
        .collect()
}

#[test]
fn clean_skill_scores_five() {
    let assessment = aggregate(&Vec::<Finding>::new());
    assert_eq!(assessment.score, 5);
    assert_eq!(assessment.recommendation, Recommendation::Approve);
}

#[test]
fn info_findings_are_free() {
    let assessment = aggregate(&findings(&[Severity::Info; 10]));
    assert_eq!(assessment.score, 5);
}

#[test]
fn single_warning_truncates_to_four() {
    // 4.5 truncates to 4 and still approves.
    let assessment = aggregate(&findings(&[Severity::Warning]));
    assert_eq!(assessment.score, 4);
    assert_eq!(assessment.recommendation, Recommendation::Approve);
}

#[test]
fn mixed_penalties_accumulate() {
    let assessment = aggregate(&findings(&[
        Severity::Major,
        Severity::Warning,
        Severity::Warning,
        Severity::Warning,
    ]));
    // 5 - 1 - 1.5 = 2.5
    assert_eq!(assessment.score, 2);
    assert_eq!(assessment.recommendation, Recommendation::NeedsMajorRevision);
}

#[test]
fn score_never_drops_below_one() {
    let assessment = aggregate(&findings(&[Severity::Critical; 6]));
    assert_eq!(assessment.score, 1);
    assert_eq!(assessment.recommendation, Recommendation::NeedsMajorRevision);
}

#[test]
fn recommendation_thresholds() {
    assert_eq!(recommend(5), Recommendation::Approve);
    assert_eq!(recommend(4), Recommendation::Approve);
    assert_eq!(recommend(3), Recommendation::NeedsMinorRevision);
    assert_eq!(recommend(2), Recommendation::NeedsMajorRevision);
    assert_eq!(recommend(1), Recommendation::NeedsMajorRevision);
}

#[test]
fn report_splits_findings_by_severity() {
    let results = vec![CheckResult {
        check_name: "test".to_string(),
        findings: findings(&[
            Severity::Critical,
            Severity::Major,
            Severity::Warning,
            Severity::Info,
        ]),
        skipped: false,
        error: None,
    }];
    let report = ValidationReport::from_results("demo", PathBuf::from("/tmp/demo"), results, None);

    assert_eq!(report.violations.len(), 2);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.info.len(), 1);
    assert_eq!(report.count_by_severity(), (1, 1, 1, 1));
    assert_eq!(report.score, 1);
    assert!(!report.passed());
    assert!(report.check_results[0].findings.is_empty());
}

#[test]
fn check_error_forces_error_recommendation() {
    let results = vec![
        CheckResult::skipped("overlap"),
        CheckResult {
            check_name: "duplication".to_string(),
            findings: vec![],
            skipped: false,
            error: Some("disk on fire".to_string()),
        },
    ];
    let report = ValidationReport::from_results("demo", PathBuf::from("demo"), results, None);

    assert_eq!(report.score, 1);
    assert_eq!(report.recommendation, Recommendation::Error);
    assert_eq!(report.error.as_deref(), Some("duplication: disk on fire"));
}

#[test]
fn finding_builder_sets_details() {
    let finding = Finding::new("broken_reference", Severity::Major, "gone")
        .detail("file", "SKILL.md")
        .detail("line", 7)
        .suggest("fix it");

    assert_eq!(finding.file(), Some("SKILL.md"));
    assert_eq!(finding.details["line"], 7);
    assert_eq!(finding.suggestion.as_deref(), Some("fix it"));
    assert!(finding.severity.is_violation());
    assert!(!Severity::Warning.is_violation());
}

#[test]
fn severity_serializes_lowercase() {
    let json = serde_json::to_string(&Severity::Critical).unwrap();
    assert_eq!(json, "\"critical\"");
    let json = serde_json::to_string(&Recommendation::NeedsMinorRevision).unwrap();
    assert_eq!(json, "\"NEEDS_MINOR_REVISION\"");
}
