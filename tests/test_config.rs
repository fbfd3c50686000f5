use oxidized_skill_lint::config::Config;
use oxidized_skill_lint::error::LintError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("lint.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn defaults_match_documented_thresholds() {
    let config = Config::default();
    assert_eq!(config.thresholds.duplication, 0.8);
    assert_eq!(config.thresholds.similarity, 0.5);
    assert_eq!(config.thresholds.overlap_terms, 3);
    assert_eq!(config.thresholds.max_chain_depth, 5);
    assert!(config.is_check_enabled("references"));
    assert!(config.is_check_enabled("overlap"));
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[thresholds]
overlap_terms = 5

[checks]
duplication = false
"#,
    );

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.thresholds.overlap_terms, 5);
    assert_eq!(config.thresholds.duplication, 0.8);
    assert!(!config.is_check_enabled("duplication"));
    assert!(config.is_check_enabled("structure"));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, LintError::ConfigNotFound(_)));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[thresholds\nduplication = ");
    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, LintError::ConfigParse { .. }));
}

#[test]
fn similarity_above_duplication_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[thresholds]\nsimilarity = 0.9\nduplication = 0.6\n");
    let err = Config::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("similarity"));
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[thresholds]\nduplication = 1.5\n");
    assert!(Config::load(Some(&path)).is_err());
}

#[test]
fn siblings_dir_prefers_cli_override() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[siblings]\ndir = \"/opt/skills\"\n");
    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(
        config.siblings_dir(Some(Path::new("/tmp/other"))),
        Some(PathBuf::from("/tmp/other"))
    );
    assert_eq!(config.siblings_dir(None), Some(PathBuf::from("/opt/skills")));
}
