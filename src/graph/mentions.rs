//! Lexical extraction of resource-path mentions.
//!
//! Any token shaped like `scripts/...`, `references/...`, `templates/...` or
//! `assets/...` counts as a mention, wherever it appears. Fenced code blocks
//! and inline code spans are *not* excluded: a path inside a code example is
//! still a mention. Heading extraction in [`crate::markdown`] does skip code
//! fences; the two behave differently on purpose until there is a reason to
//! unify them.

use regex::Regex;
use std::sync::LazyLock;

/// Characters of context kept on each side of a mention.
pub const CONTEXT_CHARS: usize = 50;

static RE_RESOURCE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:scripts|references|templates|assets)/[\w\-./]+").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Mention {
    /// Node path of the document containing the mention.
    pub source: String,
    /// The path token as written, minus trailing sentence punctuation.
    pub target: String,
    /// 1-based line number.
    pub line: usize,
    pub context: String,
}

/// Scans `text` (the content of `source`) for resource-path mentions.
///
/// ```
/// use oxidized_skill_lint::graph::mentions::extract_mentions;
///
/// let found = extract_mentions("SKILL.md", "Intro\nRun `scripts/build.py` first.");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].target, "scripts/build.py");
/// assert_eq!(found[0].line, 2);
/// ```
pub fn extract_mentions(source: &str, text: &str) -> Vec<Mention> {
    let mut mentions = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        for m in RE_RESOURCE_PATH.find_iter(line) {
            let Some(target) = normalize_target(m.as_str()) else {
                continue;
            };
            mentions.push(Mention {
                source: source.to_string(),
                target,
                line: idx + 1,
                context: context_window(line, m.start(), m.end()),
            });
        }
    }

    mentions
}

/// Drops trailing `.` (end of sentence) and rejects bare `category/` tokens.
fn normalize_target(raw: &str) -> Option<String> {
    let trimmed = raw.trim_end_matches('.');
    let (_, rest) = trimmed.split_once('/')?;
    if rest.trim_matches('/').is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Up to [`CONTEXT_CHARS`] characters either side of `line[start..end]`,
/// clipped to the line and trimmed.
fn context_window(line: &str, start: usize, end: usize) -> String {
    let from = line[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = line[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(line.len());
    line[from..to].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_clipped_to_line() {
        assert_eq!(context_window("see scripts/a.py now", 4, 16), "see scripts/a.py now");
    }

    #[test]
    fn context_keeps_fifty_chars_each_side() {
        let line = format!("{}scripts/a.py{}", "x".repeat(80), "y".repeat(80));
        let ctx = context_window(&line, 80, 92);
        assert_eq!(ctx, format!("{}scripts/a.py{}", "x".repeat(50), "y".repeat(50)));
    }

    #[test]
    fn context_counts_characters_not_bytes() {
        let line = format!("{}scripts/a.py", "é".repeat(60));
        let start = line.find("scripts").unwrap();
        let ctx = context_window(&line, start, line.len());
        assert_eq!(ctx, format!("{}scripts/a.py", "é".repeat(50)));
    }

    #[test]
    fn trailing_period_is_trimmed() {
        assert_eq!(
            normalize_target("references/a.md.").as_deref(),
            Some("references/a.md")
        );
    }

    #[test]
    fn bare_category_is_rejected() {
        assert!(normalize_target("scripts/").is_none());
        assert!(normalize_target("scripts/.").is_none());
        assert!(normalize_target("references//").is_none());
    }
}
