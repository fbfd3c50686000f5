use oxidized_skill_lint::bundle::{
    find_skill_dirs, DirectorySiblings, ResourceKind, SiblingBundleProvider, SkillBundle,
};
use oxidized_skill_lint::error::LintError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn collects_resource_dirs_in_path_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", b"# Skill\n");
    write(dir.path(), "templates/b.md", b"b");
    write(dir.path(), "scripts/z.sh", b"z");
    write(dir.path(), "references/nested/deep.md", b"deep");
    write(dir.path(), "assets/a.txt", b"a");
    write(dir.path(), "notes/ignored.md", b"outside the resource dirs");
    write(dir.path(), "README.md", b"not a resource");

    let bundle = SkillBundle::load(dir.path()).unwrap();
    let paths: Vec<&str> = bundle.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "assets/a.txt",
            "references/nested/deep.md",
            "scripts/z.sh",
            "templates/b.md"
        ]
    );
    assert!(bundle.manifest.is_some());
    assert_eq!(bundle.files[1].kind, ResourceKind::Reference);
    assert!(!bundle.files[1].is_top_level());
    assert!(bundle.files[2].is_top_level());
}

#[test]
fn skips_python_caches() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", b"# Skill\n");
    write(dir.path(), "scripts/tool.py", b"print(1)\n");
    write(dir.path(), "scripts/__pycache__/tool.cpython-312.pyc", b"\x00\x01");
    write(dir.path(), "scripts/stale.pyc", b"\x00\x01");

    let bundle = SkillBundle::load(dir.path()).unwrap();
    let paths: Vec<&str> = bundle.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["scripts/tool.py"]);
}

#[test]
fn binary_content_is_kept_without_text() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "assets/icon.png", &[0x89, 0x50, 0xff, 0xfe]);

    let bundle = SkillBundle::load(dir.path()).unwrap();
    assert!(bundle.manifest.is_none());
    assert_eq!(bundle.files.len(), 1);
    assert!(bundle.files[0].content.as_text().is_none());
    assert!(bundle.unreadable.is_empty());
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = SkillBundle::load(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, LintError::BundleNotFound(_)));
}

#[test]
fn file_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "SKILL.md", b"# Skill\n");
    let err = SkillBundle::load(&dir.path().join("SKILL.md")).unwrap_err();
    assert!(matches!(err, LintError::NotADirectory(_)));
}

#[test]
fn bundle_name_comes_from_directory() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("pdf-tools");
    write(&root, "SKILL.md", b"# PDF\n");

    let bundle = SkillBundle::load(&root).unwrap();
    assert_eq!(bundle.name, "pdf-tools");
}

#[test]
fn directory_siblings_lists_skill_dirs_only() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "beta/SKILL.md", b"# Beta\n");
    write(dir.path(), "alpha/SKILL.md", b"# Alpha\n");
    write(dir.path(), "not-a-skill/readme.md", b"nothing\n");

    let dirs = find_skill_dirs(dir.path()).unwrap();
    assert_eq!(dirs.len(), 2);

    let siblings = DirectorySiblings::new(dir.path()).list().unwrap();
    let names: Vec<&str> = siblings.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[test]
fn missing_siblings_dir_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let err = DirectorySiblings::new(dir.path().join("missing"))
        .list()
        .unwrap_err();
    assert!(matches!(err, LintError::SiblingsUnavailable(_)));
}

#[test]
fn bundle_name_resolves_relative_components() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("pdf-tools");
    write(&root, "SKILL.md", b"# PDF\n");
    write(&root, "references/a.md", b"a");

    let bundle = SkillBundle::load(&root.join("references").join("..")).unwrap();
    assert_eq!(bundle.name, "pdf-tools");
}

#[cfg(unix)]
#[test]
fn find_skill_dirs_follows_symlinked_skills() {
    let dir = TempDir::new().unwrap();
    let store = TempDir::new().unwrap();
    write(store.path(), "linked/SKILL.md", b"# Linked\n");
    write(dir.path(), "local/SKILL.md", b"# Local\n");
    std::os::unix::fs::symlink(store.path().join("linked"), dir.path().join("linked")).unwrap();

    let dirs = find_skill_dirs(dir.path()).unwrap();
    let names: Vec<String> = dirs
        .iter()
        .map(|d| d.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["linked", "local"]);
}
