//! Markdown helpers shared by the checks.
//!
//! These are deliberately small: YAML frontmatter is handed to `serde_yaml`
//! and headings are matched line by line. Neither function ever fails; a
//! malformed document simply yields nothing.

use serde_yaml::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static RE_HEADING: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

/// A markdown ATX heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub title: String,
    /// 1-based line number.
    pub line: usize,
}

/// Returns the raw YAML between the opening and closing `---` lines.
fn frontmatter_block(content: &str) -> Option<&str> {
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

/// Parses the YAML frontmatter of `content` into a key/value map.
///
/// Returns `None` when the document has no frontmatter block, when the YAML
/// is invalid, or when it is not a mapping with string keys.
///
/// ```
/// use oxidized_skill_lint::markdown::parse_frontmatter;
///
/// let fm = parse_frontmatter("---\nname: pdf-tools\n---\n# Body\n").unwrap();
/// assert_eq!(fm["name"].as_str(), Some("pdf-tools"));
/// assert!(parse_frontmatter("# No frontmatter").is_none());
/// ```
pub fn parse_frontmatter(content: &str) -> Option<BTreeMap<String, Value>> {
    let block = frontmatter_block(content)?;
    serde_yaml::from_str(block).ok()
}

/// Returns the `description` field of the frontmatter, if it is a string.
pub fn extract_description(content: &str) -> Option<String> {
    let frontmatter = parse_frontmatter(content)?;
    frontmatter
        .get("description")
        .and_then(Value::as_str)
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Extracts ATX headings in document order, skipping fenced code blocks
/// (both ```` ``` ```` and `~~~`).
pub fn extract_headings(content: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut in_fence = false;

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = RE_HEADING.captures(line) {
            headings.push(Heading {
                level: caps[1].len(),
                title: caps[2].trim().to_string(),
                line: idx + 1,
            });
        }
    }

    headings
}

/// Headings that jump more than one level deeper than their predecessor.
pub fn skipped_heading_levels(headings: &[Heading]) -> Vec<(usize, &Heading)> {
    headings
        .windows(2)
        .filter(|w| w[1].level > w[0].level + 1)
        .map(|w| (w[0].level, &w[1]))
        .collect()
}
