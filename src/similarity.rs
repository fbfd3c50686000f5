//! Sequence similarity by longest matching blocks (Ratcliff/Obershelp).
//!
//! The longest common substring of the two inputs is matched first, then the
//! regions to its left and right are matched the same way, recursively. The
//! ratio is `2·M / (|a| + |b|)` where `M` is the total length of all matched
//! blocks. Lengths are counted in characters. There is no "junk" heuristic:
//! every character takes part in matching.

use std::collections::HashMap;

/// A run of `len` equal characters at `a[a_start..]` and `b[b_start..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

/// Similarity ratio of `a` and `b` in `0.0..=1.0`.
///
/// Two empty strings are identical (1.0).
///
/// ```
/// use oxidized_skill_lint::similarity::ratio;
///
/// assert_eq!(ratio("abcd", "abcd"), 1.0);
/// assert_eq!(ratio("abc", "xyz"), 0.0);
/// assert_eq!(ratio("abcd", "bcde"), 0.75);
/// ```
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matching_blocks(&a, &b).iter().map(|m| m.len).sum();
    2.0 * matched as f64 / total as f64
}

/// Non-overlapping matching blocks, sorted by position.
pub fn matching_blocks<T: Eq + std::hash::Hash>(a: &[T], b: &[T]) -> Vec<MatchBlock> {
    let mut b_index: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, item) in b.iter().enumerate() {
        b_index.entry(item).or_default().push(j);
    }

    let mut blocks = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let m = longest_match(a, &b_index, alo, ahi, blo, bhi);
        if m.len == 0 {
            continue;
        }
        blocks.push(m);
        if alo < m.a_start && blo < m.b_start {
            pending.push((alo, m.a_start, blo, m.b_start));
        }
        if m.a_start + m.len < ahi && m.b_start + m.len < bhi {
            pending.push((m.a_start + m.len, ahi, m.b_start + m.len, bhi));
        }
    }

    blocks.sort_by_key(|m| (m.a_start, m.b_start));
    blocks
}

/// Longest block within `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match<T: Eq + std::hash::Hash>(
    a: &[T],
    b_index: &HashMap<&T, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchBlock {
    let mut best = MatchBlock {
        a_start: alo,
        b_start: blo,
        len: 0,
    };
    // run_len[j + 1] = length of the match ending at a[i - 1], b[j]
    let mut run_len: HashMap<usize, usize> = HashMap::new();

    for (i, item) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_run: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b_index.get(item) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = run_len.get(&j).copied().unwrap_or(0) + 1;
                next_run.insert(j + 1, k);
                if k > best.len {
                    best = MatchBlock {
                        a_start: i + 1 - k,
                        b_start: j + 1 - k,
                        len: k,
                    };
                }
            }
        }
        run_len = next_run;
    }

    best
}
