use oxidized_skill_lint::bundle::SkillBundle;
use oxidized_skill_lint::graph::{classify, Classification, ReferenceGraph};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn analyze(root: &Path) -> (ReferenceGraph, oxidized_skill_lint::graph::CrossReferenceReport) {
    let bundle = SkillBundle::load(root).unwrap();
    let graph = ReferenceGraph::build(&bundle);
    let report = classify(&graph, 5);
    (graph, report)
}

#[test]
fn manifest_mention_makes_file_direct() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", "Run scripts/build.sh before anything else.\n");
    write(dir.path(), "scripts/build.sh", "echo build\n");

    let (_, report) = analyze(dir.path());
    let file = report.get("scripts/build.sh").unwrap();
    assert_eq!(file.classification, Classification::Direct);
    assert_eq!(file.referenced_by[0].source, "SKILL.md");
    assert_eq!(file.referenced_by[0].line, 1);
    assert!(file.chain.is_empty());
}

#[test]
fn files_partition_into_exactly_one_class() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", "See references/a.md\n");
    write(dir.path(), "references/a.md", "Details in references/b.md\n");
    write(dir.path(), "references/b.md", "leaf\n");
    write(dir.path(), "assets/logo.txt", "orphan\n");
    write(dir.path(), "templates/report.md", "orphan\n");

    let (graph, report) = analyze(dir.path());
    let stats = &report.stats;
    assert_eq!(stats.total_files, 4);
    assert_eq!(stats.direct + stats.indirect + stats.unreferenced, stats.total_files);
    assert_eq!(report.files.len(), graph.nodes().len() - 1);
    assert_eq!(stats.direct, 1);
    assert_eq!(stats.indirect, 1);
    assert_eq!(stats.unreferenced, 2);
    assert_eq!(stats.direct_coverage_pct, 25.0);
    assert_eq!(stats.total_coverage_pct, 50.0);
}

#[test]
fn indirect_file_gets_chain_from_manifest() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", "Start with references/a.md\n");
    write(dir.path(), "references/a.md", "# A\n\nContinue in references/b.md\n");
    write(dir.path(), "references/b.md", "# B\n");

    let (_, report) = analyze(dir.path());
    let b = report.get("references/b.md").unwrap();
    assert_eq!(b.classification, Classification::Indirect);
    assert_eq!(
        b.chain,
        vec!["SKILL.md", "references/a.md", "references/b.md"]
    );
    assert_eq!(b.referenced_by.len(), 1);
    assert_eq!(b.referenced_by[0].source, "references/a.md");
    assert_eq!(b.referenced_by[0].line, 3);
}

#[test]
fn cycle_without_manifest_terminates() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", "# Nothing linked\n");
    write(dir.path(), "references/a.md", "see references/b.md\n");
    write(dir.path(), "references/b.md", "see references/a.md\n");

    let (_, report) = analyze(dir.path());
    for path in ["references/a.md", "references/b.md"] {
        let file = report.get(path).unwrap();
        assert_eq!(file.classification, Classification::Indirect);
        assert!(file.chain.is_empty(), "{path} should have no chain");
    }
}

#[test]
fn chain_search_respects_depth_bound() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", "See references/r1.md\n");
    for i in 1..=6 {
        write(
            dir.path(),
            &format!("references/r{i}.md"),
            &format!("next: references/r{}.md\n", i + 1),
        );
    }
    write(dir.path(), "references/r7.md", "end\n");

    let (_, report) = analyze(dir.path());
    let r5 = report.get("references/r5.md").unwrap();
    assert_eq!(r5.chain.len(), 6);
    assert_eq!(r5.chain.first().map(String::as_str), Some("SKILL.md"));

    let r6 = report.get("references/r6.md").unwrap();
    assert_eq!(r6.classification, Classification::Indirect);
    assert!(r6.chain.is_empty());
}

#[test]
fn broken_reference_lists_every_referrer_and_is_not_a_node() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", "Use references/gone.md\n");
    write(dir.path(), "references/a.md", "also references/gone.md\n");
    write(dir.path(), "scripts/run.sh", "# references/gone.md\n# references/gone.md\n");

    let (graph, report) = analyze(dir.path());
    assert!(graph.id("references/gone.md").is_none());
    assert_eq!(report.broken.len(), 1);

    let broken = &report.broken[0];
    assert_eq!(broken.target, "references/gone.md");
    assert_eq!(broken.referrers.len(), 4);
    assert_eq!(
        broken.sources(),
        vec!["SKILL.md", "references/a.md", "scripts/run.sh"]
    );
    assert_eq!(broken.examples().len(), 3);
    assert_eq!(report.stats.broken_references, 1);
}

#[test]
fn empty_bundle_has_zero_coverage() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", "# Empty\n");

    let (graph, report) = analyze(dir.path());
    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(report.stats.total_files, 0);
    assert_eq!(report.stats.direct_coverage_pct, 0.0);
    assert_eq!(report.stats.total_coverage_pct, 0.0);
}

#[test]
fn missing_manifest_still_has_manifest_node() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "references/a.md", "see references/b.md\n");
    write(dir.path(), "references/b.md", "leaf\n");

    let (graph, report) = analyze(dir.path());
    assert_eq!(graph.path(oxidized_skill_lint::graph::NodeId::MANIFEST), "SKILL.md");
    assert_eq!(report.stats.direct, 0);
    assert_eq!(
        report.get("references/a.md").unwrap().classification,
        Classification::Unreferenced
    );
}

#[test]
fn binary_files_are_nodes_but_not_scanned() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", "Logo: assets/logo.png\n");
    let mut bytes = b"references/hidden.md".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, 0x00]);
    fs::create_dir_all(dir.path().join("assets")).unwrap();
    fs::write(dir.path().join("assets/logo.png"), bytes).unwrap();

    let (_, report) = analyze(dir.path());
    assert_eq!(
        report.get("assets/logo.png").unwrap().classification,
        Classification::Direct
    );
    assert!(report.broken.is_empty());
}

#[cfg(unix)]
#[test]
fn symlinked_resource_is_a_node() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", "See references/shared.md\n");
    write(dir.path(), "shared/real.md", "# Shared\n");
    fs::create_dir_all(dir.path().join("references")).unwrap();
    std::os::unix::fs::symlink(
        dir.path().join("shared/real.md"),
        dir.path().join("references/shared.md"),
    )
    .unwrap();

    let (_, report) = analyze(dir.path());
    assert!(report.broken.is_empty());
    assert_eq!(report.stats.total_files, 1);
    assert_eq!(
        report.get("references/shared.md").unwrap().classification,
        Classification::Direct
    );
}
