use std::collections::{HashMap, HashSet};

use crate::domain::PrecedencePair;

pub type NodeIndex = usize;

/// Directed precedence graph over player names.
///
/// Nodes are numbered in the order they are first mentioned (predecessor
/// before successor within a pair). Parallel pairs collapse into a single
/// edge and successor lists keep first-seen order. Self-loops are kept as
/// edges; every algorithm over this graph tolerates them.
#[derive(Debug, Clone, Default)]
pub struct PrecedenceGraph {
    names: Vec<String>,
    index: HashMap<String, NodeIndex>,
    successors: Vec<Vec<NodeIndex>>,
    edges: HashSet<(NodeIndex, NodeIndex)>,
}

impl PrecedenceGraph {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = &'a PrecedencePair>,
    {
        let mut graph = Self::default();
        for pair in pairs {
            graph.add_pair(pair);
        }
        graph
    }

    fn add_pair(&mut self, pair: &PrecedencePair) {
        let from = self.intern(&pair.predecessor);
        let to = self.intern(&pair.successor);
        if self.edges.insert((from, to)) {
            self.successors[from].push(to);
        }
    }

    fn intern(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.successors.push(Vec::new());
        idx
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn successors(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.successors[node]
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        0..self.names.len()
    }

    pub fn path_names(&self, path: &[NodeIndex]) -> Vec<String> {
        path.iter().map(|&node| self.names[node].clone()).collect()
    }
}
