use assert_cmd::Command;
use predicates::prelude::*;

fn lint() -> Command {
    assert_cmd::cargo::cargo_bin_cmd!("oxidized-skill-lint")
}

#[test]
fn validate_clean_skill_passes() {
    lint()
        .args([
            "validate",
            "tests/fixtures/clean-skill",
            "--skills-dir",
            "tests/fixtures/collection",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("APPROVE"));
}

#[test]
fn validate_dirty_skill_fails() {
    lint()
        .args([
            "validate",
            "tests/fixtures/dirty-skill",
            "--skills-dir",
            "tests/fixtures/does-not-exist",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("NEEDS_MINOR_REVISION"))
        .stdout(predicate::str::contains("references/missing.md"));
}

#[test]
fn validate_dirty_skill_json_format() {
    lint()
        .args([
            "validate",
            "tests/fixtures/dirty-skill",
            "--skills-dir",
            "tests/fixtures/does-not-exist",
            "--format",
            "json",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"passed\": false"))
        .stdout(predicate::str::contains("\"siblings_unavailable\""));
}

#[test]
fn validate_dirty_skill_sarif_format() {
    lint()
        .args([
            "validate",
            "tests/fixtures/dirty-skill",
            "--skills-dir",
            "tests/fixtures/does-not-exist",
            "--format",
            "sarif",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"version\": \"2.1.0\""));
}

#[test]
fn validate_writes_output_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("report.json");
    lint()
        .args([
            "validate",
            "tests/fixtures/clean-skill",
            "--skills-dir",
            "tests/fixtures/collection",
            "--format",
            "json",
            "--output",
        ])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Output written to"));

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"recommendation\": \"APPROVE\""));
}

#[test]
fn validate_nonexistent_path_exits_2() {
    lint()
        .args(["validate", "tests/fixtures/does-not-exist"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn validate_collection_dir_suggests_validate_all() {
    lint()
        .args(["validate", "tests/fixtures/collection"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("validate-all"));
}

#[test]
fn validate_missing_config_exits_2() {
    lint()
        .args([
            "validate",
            "tests/fixtures/clean-skill",
            "--config",
            "tests/fixtures/absent.toml",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn validate_all_flags_duplicated_templates() {
    lint()
        .args(["validate-all", "tests/fixtures/collection"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("template_duplication"))
        .stdout(predicate::str::contains("Collection Summary"));
}

#[test]
fn validate_all_json_reports_each_skill() {
    lint()
        .args(["validate-all", "tests/fixtures/collection", "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"bundle\": \"alpha\""))
        .stdout(predicate::str::contains("\"bundle\": \"beta\""))
        .stdout(predicate::str::contains("\"similarity\": \"100.0%\""));
}

#[test]
fn validate_all_without_skills_exits_2() {
    lint()
        .args(["validate-all", "tests/fixtures/clean-skill"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no skill directories"));
}

#[test]
fn list_rules_shows_categories() {
    lint()
        .arg("list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("broken_reference"))
        .stdout(predicate::str::contains("template_duplication"))
        .stdout(predicate::str::contains("domain_overlap"));
}

#[test]
fn explain_known_rule() {
    lint()
        .args(["explain", "unreferenced_resource"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"));
}

#[test]
fn explain_unknown_rule_exits_2() {
    lint()
        .args(["explain", "no_such_rule"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown rule"));
}
