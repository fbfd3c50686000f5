//! Reachability classification and reference chains.
//!
//! Every resource node falls in exactly one class:
//!
//! | Class | Incoming edges |
//! |-------|----------------|
//! | [`Direct`](Classification::Direct) | at least one from the manifest |
//! | [`Indirect`](Classification::Indirect) | some, none from the manifest |
//! | [`Unreferenced`](Classification::Unreferenced) | none |
//!
//! Indirect files also get a *chain*: a path of mentions leading back from
//! the manifest to the file. Chains are found by a depth-bounded backward
//! search that returns the first path it reaches. That path is a valid
//! witness but not necessarily the shortest one.

use super::{BrokenReference, NodeId, ReferenceGraph};
use crate::bundle::ResourceKind;
use std::collections::HashSet;

/// Hops searched backwards from an indirect file before giving up.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Direct,
    Indirect,
    Unreferenced,
}

/// One mention of a file by another document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Referrer {
    pub source: String,
    pub line: usize,
    pub context: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FileReference {
    pub path: String,
    pub kind: ResourceKind,
    pub classification: Classification,
    pub referenced_by: Vec<Referrer>,
    /// Manifest-first chain for indirect files; empty otherwise, and empty
    /// when no chain exists within the depth bound.
    pub chain: Vec<String>,
    /// Distinct targets this file mentions, resolved or not.
    pub mentions_others: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CoverageStats {
    pub total_files: usize,
    pub direct: usize,
    pub indirect: usize,
    pub unreferenced: usize,
    pub broken_references: usize,
    pub direct_coverage_pct: f64,
    pub total_coverage_pct: f64,
}

impl CoverageStats {
    fn new(direct: usize, indirect: usize, unreferenced: usize, broken: usize) -> Self {
        let total = direct + indirect + unreferenced;
        CoverageStats {
            total_files: total,
            direct,
            indirect,
            unreferenced,
            broken_references: broken,
            direct_coverage_pct: percentage(direct, total),
            total_coverage_pct: percentage(direct + indirect, total),
        }
    }
}

/// `part / total * 100`, or 0 for an empty bundle.
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CrossReferenceReport {
    /// One entry per resource file, sorted by path.
    pub files: Vec<FileReference>,
    pub broken: Vec<BrokenReference>,
    pub stats: CoverageStats,
}

impl CrossReferenceReport {
    pub fn of_class(&self, class: Classification) -> impl Iterator<Item = &FileReference> {
        self.files.iter().filter(move |f| f.classification == class)
    }

    pub fn get(&self, path: &str) -> Option<&FileReference> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// Classifies a single node from its incoming edges.
pub fn classification_of(graph: &ReferenceGraph, id: NodeId) -> Classification {
    let mut incoming = graph.incoming(id).peekable();
    if incoming.peek().is_none() {
        Classification::Unreferenced
    } else if incoming.any(|e| e.from == NodeId::MANIFEST) {
        Classification::Direct
    } else {
        Classification::Indirect
    }
}

/// Classifies every resource node and reconstructs chains for indirect ones.
pub fn classify(graph: &ReferenceGraph, max_depth: usize) -> CrossReferenceReport {
    let mut files = Vec::new();
    let (mut direct, mut indirect, mut unreferenced) = (0, 0, 0);

    for id in graph.resource_ids() {
        let classification = classification_of(graph, id);
        let chain = match classification {
            Classification::Direct => {
                direct += 1;
                Vec::new()
            }
            Classification::Indirect => {
                indirect += 1;
                find_chain(graph, id, HashSet::new(), max_depth)
                    .map(|ids| ids.into_iter().map(|n| graph.path(n).to_string()).collect())
                    .unwrap_or_default()
            }
            Classification::Unreferenced => {
                unreferenced += 1;
                Vec::new()
            }
        };

        let referenced_by = graph
            .incoming(id)
            .map(|e| Referrer {
                source: graph.path(e.from).to_string(),
                line: e.line,
                context: e.context.clone(),
            })
            .collect();

        let node = graph.node(id);
        files.push(FileReference {
            path: node.path.clone(),
            kind: node.kind,
            classification,
            referenced_by,
            chain,
            mentions_others: mentioned_targets(graph, id),
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    let broken = graph.broken().to_vec();
    let stats = CoverageStats::new(direct, indirect, unreferenced, broken.len());

    CrossReferenceReport {
        files,
        broken,
        stats,
    }
}

/// Backward search from `target` towards the manifest.
///
/// Each branch carries its own copy of `visited`, so a node reached twice
/// through different branches is explored both times, while a cycle within
/// one branch is cut. Returns the chain manifest-first.
fn find_chain(
    graph: &ReferenceGraph,
    target: NodeId,
    mut visited: HashSet<NodeId>,
    depth: usize,
) -> Option<Vec<NodeId>> {
    if depth == 0 || !visited.insert(target) {
        return None;
    }

    for edge in graph.incoming(target) {
        if edge.from == NodeId::MANIFEST {
            return Some(vec![NodeId::MANIFEST, target]);
        }
        if let Some(mut chain) = find_chain(graph, edge.from, visited.clone(), depth - 1) {
            chain.push(target);
            return Some(chain);
        }
    }

    None
}

fn mentioned_targets(graph: &ReferenceGraph, id: NodeId) -> Vec<String> {
    let source = graph.path(id);
    let mut targets: Vec<String> = graph
        .outgoing(id)
        .map(|e| graph.path(e.to).to_string())
        .chain(
            graph
                .broken()
                .iter()
                .filter(|b| b.referrers.iter().any(|r| r.source == source))
                .map(|b| b.target.clone()),
        )
        .collect();
    targets.sort();
    targets.dedup();
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_empty_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn percentage_exact() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(3, 3), 100.0);
    }
}
