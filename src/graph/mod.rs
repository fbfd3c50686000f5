//! Resource cross-reference graph.
//!
//! Nodes are the manifest plus every collected resource file, stored in an
//! arena and addressed by [`NodeId`]. Edges are mentions that resolve to a
//! node by exact path equality; mentions that resolve to nothing are kept
//! aside as [`BrokenReference`]s and never become nodes.
//!
//! ```text
//! SKILL.md ──▶ references/a.md ──▶ references/b.md
//!    │
//!    └──▶ references/missing.md   (broken, not a node)
//! ```

pub mod classify;
pub mod mentions;

pub use classify::{
    classify, Classification, CoverageStats, CrossReferenceReport, FileReference, Referrer,
    DEFAULT_MAX_CHAIN_DEPTH,
};

use crate::bundle::{ResourceKind, SkillBundle, MANIFEST};
use mentions::{extract_mentions, Mention};
use std::collections::{BTreeMap, HashMap};

/// Index of a node in [`ReferenceGraph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The manifest is always the first node.
    pub const MANIFEST: NodeId = NodeId(0);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub path: String,
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub line: usize,
    pub context: String,
}

/// A mentioned path that matches no file in the bundle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BrokenReference {
    pub target: String,
    /// Every mention of `target`, in scan order.
    pub referrers: Vec<Referrer>,
}

impl BrokenReference {
    /// Number of example mentions shown in reports.
    pub const EXAMPLES: usize = 3;

    pub fn examples(&self) -> &[Referrer] {
        &self.referrers[..self.referrers.len().min(Self::EXAMPLES)]
    }

    /// Distinct referring documents, in first-mention order.
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for r in &self.referrers {
            if !sources.contains(&r.source.as_str()) {
                sources.push(&r.source);
            }
        }
        sources
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    edges: Vec<ReferenceEdge>,
    incoming: Vec<Vec<usize>>,
    outgoing: Vec<Vec<usize>>,
    broken: Vec<BrokenReference>,
}

impl ReferenceGraph {
    /// Builds the graph for `bundle`.
    ///
    /// The manifest is scanned first, then every textual resource in path
    /// order, so each node's incoming edges are listed manifest-first.
    pub fn build(bundle: &SkillBundle) -> ReferenceGraph {
        let mut graph = ReferenceGraph::default();
        graph.add_node(MANIFEST, ResourceKind::Manifest);
        for file in &bundle.files {
            graph.add_node(&file.path, file.kind);
        }

        let documents = bundle
            .manifest
            .iter()
            .chain(bundle.files.iter())
            .filter_map(|f| f.content.as_text().map(|text| (f.path.as_str(), text)));

        let mut broken: BTreeMap<String, Vec<Referrer>> = BTreeMap::new();
        let mut mention_count = 0usize;

        for (path, text) in documents {
            for mention in extract_mentions(path, text) {
                mention_count += 1;
                graph.add_mention(mention, &mut broken);
            }
        }

        graph.broken = broken
            .into_iter()
            .map(|(target, referrers)| BrokenReference { target, referrers })
            .collect();

        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            mentions = mention_count,
            broken = graph.broken.len(),
            "built reference graph"
        );
        graph
    }

    fn add_node(&mut self, path: &str, kind: ResourceKind) -> NodeId {
        if let Some(&id) = self.index.get(path) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            path: path.to_string(),
            kind,
        });
        self.index.insert(path.to_string(), id);
        self.incoming.push(Vec::new());
        self.outgoing.push(Vec::new());
        id
    }

    fn add_mention(&mut self, mention: Mention, broken: &mut BTreeMap<String, Vec<Referrer>>) {
        let (Some(&from), Some(&to)) = (self.index.get(&mention.source), self.index.get(&mention.target))
        else {
            broken.entry(mention.target).or_default().push(Referrer {
                source: mention.source,
                line: mention.line,
                context: mention.context,
            });
            return;
        };

        let edge = self.edges.len();
        self.edges.push(ReferenceEdge {
            from,
            to,
            line: mention.line,
            context: mention.context,
        });
        self.incoming[to.0].push(edge);
        self.outgoing[from.0].push(edge);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn path(&self, id: NodeId) -> &str {
        &self.nodes[id.0].path
    }

    pub fn id(&self, path: &str) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    pub fn edges(&self) -> &[ReferenceEdge] {
        &self.edges
    }

    /// Ids of every node except the manifest.
    pub fn resource_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (1..self.nodes.len()).map(NodeId)
    }

    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &ReferenceEdge> {
        self.incoming[id.0].iter().map(move |&e| &self.edges[e])
    }

    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &ReferenceEdge> {
        self.outgoing[id.0].iter().map(move |&e| &self.edges[e])
    }

    pub fn broken(&self) -> &[BrokenReference] {
        &self.broken
    }
}
