//! Skill bundles and resource file collection.
//!
//! A bundle is a directory with a `SKILL.md` manifest and up to four resource
//! directories. [`SkillBundle::load`] walks those directories once and keeps
//! every file in memory for the rest of the run; bundles are small.

use crate::error::{LintError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of the bundle manifest; also the manifest's graph node path.
pub const MANIFEST: &str = "SKILL.md";

/// Resource directories scanned under the bundle root, in scan order.
pub const RESOURCE_DIRS: &[&str] = &["scripts", "references", "templates", "assets"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Script,
    Reference,
    Template,
    Asset,
    Manifest,
}

impl ResourceKind {
    /// Kind of a resource from its top-level directory (`scripts/...`).
    pub fn from_path(rel_path: &str) -> Option<Self> {
        match rel_path.split('/').next()? {
            "scripts" => Some(ResourceKind::Script),
            "references" => Some(ResourceKind::Reference),
            "templates" => Some(ResourceKind::Template),
            "assets" => Some(ResourceKind::Asset),
            _ if rel_path == MANIFEST => Some(ResourceKind::Manifest),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Script => write!(f, "script"),
            ResourceKind::Reference => write!(f, "reference"),
            ResourceKind::Template => write!(f, "template"),
            ResourceKind::Asset => write!(f, "asset"),
            ResourceKind::Manifest => write!(f, "manifest"),
        }
    }
}

/// File contents. Non-UTF-8 files (images, archives) are kept as graph
/// nodes but never scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary { len: usize },
}

impl Content {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Content::Text(text),
            Err(e) => Content::Binary {
                len: e.into_bytes().len(),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(t) => Some(t),
            Content::Binary { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    /// Path relative to the bundle root, `/`-separated.
    pub path: String,
    pub kind: ResourceKind,
    pub content: Content,
}

impl ResourceFile {
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// `true` for files directly inside their resource directory
    /// (`scripts/x.py`, not `scripts/lib/x.py`).
    pub fn is_top_level(&self) -> bool {
        self.path.matches('/').count() == 1
    }
}

/// A file that exists on disk but could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFile {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct SkillBundle {
    pub name: String,
    pub root: PathBuf,
    pub manifest: Option<ResourceFile>,
    /// Resource files sorted by path. Never contains the manifest.
    pub files: Vec<ResourceFile>,
    pub unreadable: Vec<UnreadableFile>,
}

impl SkillBundle {
    /// Collects the manifest and every resource file under `root`.
    ///
    /// # Errors
    ///
    /// Fails only when `root` is missing or is not a directory. Files that
    /// cannot be read are recorded in [`SkillBundle::unreadable`].
    pub fn load(root: &Path) -> Result<SkillBundle> {
        if !root.exists() {
            return Err(LintError::BundleNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(LintError::NotADirectory(root.to_path_buf()));
        }

        let mut unreadable = Vec::new();

        let manifest_path = root.join(MANIFEST);
        let manifest = if manifest_path.is_file() {
            match std::fs::read(&manifest_path) {
                Ok(bytes) => Some(ResourceFile {
                    path: MANIFEST.to_string(),
                    kind: ResourceKind::Manifest,
                    content: Content::from_bytes(bytes),
                }),
                Err(e) => {
                    tracing::warn!(path = %manifest_path.display(), error = %e, "manifest unreadable");
                    unreadable.push(UnreadableFile {
                        path: MANIFEST.to_string(),
                        reason: e.to_string(),
                    });
                    None
                }
            }
        } else {
            None
        };

        let mut files = Vec::new();
        for dir in RESOURCE_DIRS {
            let dir_path = root.join(dir);
            if !dir_path.is_dir() {
                continue;
            }
            let before = files.len();
            collect_dir(root, &dir_path, &mut files, &mut unreadable);
            tracing::debug!(dir, files = files.len() - before, "collected resource directory");
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        unreadable.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(SkillBundle {
            name: root
                .canonicalize()
                .map(|p| bundle_name(&p))
                .unwrap_or_else(|_| bundle_name(root)),
            root: root.to_path_buf(),
            manifest,
            files,
            unreadable,
        })
    }

    pub fn has_dir(&self, dir: &str) -> bool {
        self.root.join(dir).is_dir()
    }

    pub fn files_of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    pub fn manifest_text(&self) -> Option<&str> {
        self.manifest.as_ref().and_then(|m| m.content.as_text())
    }
}

fn collect_dir(
    root: &Path,
    dir: &Path,
    files: &mut Vec<ResourceFile>,
    unreadable: &mut Vec<UnreadableFile>,
) {
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != "__pycache__");

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| relative_path(root, p))
                    .unwrap_or_else(|| relative_path(root, dir));
                tracing::warn!(%path, error = %e, "directory entry unreadable");
                unreadable.push(UnreadableFile {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() || is_compiled_artifact(entry.path()) {
            continue;
        }

        let rel = relative_path(root, entry.path());
        let Some(kind) = ResourceKind::from_path(&rel) else {
            continue;
        };
        match std::fs::read(entry.path()) {
            Ok(bytes) => files.push(ResourceFile {
                path: rel,
                kind,
                content: Content::from_bytes(bytes),
            }),
            Err(e) => {
                tracing::warn!(path = %rel, error = %e, "resource unreadable");
                unreadable.push(UnreadableFile {
                    path: rel,
                    reason: e.to_string(),
                });
            }
        }
    }
}

fn is_compiled_artifact(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("pyc") | Some("pyo")
    )
}

/// `/`-separated path of `path` relative to `root`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Bundle name from its directory, `"unknown"` for paths without a file name.
pub fn bundle_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Supplies the sibling bundles a skill is compared against.
pub trait SiblingBundleProvider {
    /// Returns every sibling bundle, sorted by name.
    ///
    /// # Errors
    ///
    /// [`LintError::SiblingsUnavailable`] when there is nothing to list.
    fn list(&self) -> Result<Vec<SkillBundle>>;
}

/// Lists bundles as the immediate child directories of `root` that contain
/// a `SKILL.md`.
pub struct DirectorySiblings {
    root: PathBuf,
}

impl DirectorySiblings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySiblings { root: root.into() }
    }

    /// `~/.claude/skills`, the conventional installation directory.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".claude").join("skills"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SiblingBundleProvider for DirectorySiblings {
    fn list(&self) -> Result<Vec<SkillBundle>> {
        if !self.root.is_dir() {
            return Err(LintError::SiblingsUnavailable(self.root.clone()));
        }
        let mut bundles = Vec::new();
        for dir in find_skill_dirs(&self.root)? {
            bundles.push(SkillBundle::load(&dir)?);
        }
        Ok(bundles)
    }
}

/// A fixed set of bundles.
impl SiblingBundleProvider for Vec<SkillBundle> {
    fn list(&self) -> Result<Vec<SkillBundle>> {
        let mut bundles = self.clone();
        bundles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(bundles)
    }
}

/// Immediate child directories of `path` containing a `SKILL.md`, sorted.
pub fn find_skill_dirs(path: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(path).map_err(|e| LintError::io(path, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let child = entry.path();
        if child.is_dir() && child.join(MANIFEST).exists() {
            dirs.push(child);
        }
    }

    dirs.sort();
    Ok(dirs)
}
