//! Contradiction diagnostics over precedence pairs.
//!
//! These helpers never influence the ranking itself; they produce a concrete
//! loop of names (`A -> B -> C -> A`) that can be shown to a person before
//! contradictory input is stored.

use std::collections::{HashMap, VecDeque};

use log::debug;

use super::graph::{NodeIndex, PrecedenceGraph};
use crate::domain::PrecedencePair;

/// Find one cycle in the pairs, returned as a closed path whose first and
/// last entries are the same name.
///
/// Which cycle is reported depends on the order pairs were first seen; it is
/// not necessarily the shortest one.
pub fn find_cycle_path(pairs: &[PrecedencePair]) -> Option<Vec<String>> {
    let graph = PrecedenceGraph::from_pairs(pairs);
    let cycle = DepthFirstCycleSearch::new(&graph).run()?;
    Some(graph.path_names(&cycle))
}

struct Frame {
    node: NodeIndex,
    next_successor: usize,
}

struct DepthFirstCycleSearch<'a> {
    graph: &'a PrecedenceGraph,
    visited: Vec<bool>,
    on_path: Vec<bool>,
    path: Vec<NodeIndex>,
}

impl<'a> DepthFirstCycleSearch<'a> {
    fn new(graph: &'a PrecedenceGraph) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            visited: vec![false; n],
            on_path: vec![false; n],
            path: Vec::new(),
        }
    }

    fn run(mut self) -> Option<Vec<NodeIndex>> {
        let graph = self.graph;
        for root in graph.nodes() {
            if self.visited[root] {
                continue;
            }
            if let Some(cycle) = self.search_from(root) {
                return Some(cycle);
            }
        }
        None
    }

    fn search_from(&mut self, root: NodeIndex) -> Option<Vec<NodeIndex>> {
        let graph = self.graph;
        let mut frames = vec![self.enter(root)];

        while let Some(frame) = frames.last_mut() {
            let node = frame.node;

            if let Some(&successor) = graph.successors(node).get(frame.next_successor) {
                frame.next_successor += 1;
                if !self.visited[successor] {
                    frames.push(self.enter(successor));
                } else if self.on_path[successor] {
                    return Some(self.close_cycle(successor));
                }
                continue;
            }

            frames.pop();
            self.on_path[node] = false;
            self.path.pop();
        }
        None
    }

    fn enter(&mut self, node: NodeIndex) -> Frame {
        self.visited[node] = true;
        self.on_path[node] = true;
        self.path.push(node);
        Frame {
            node,
            next_successor: 0,
        }
    }

    /// Path suffix starting at the revisited node, closed by repeating it.
    fn close_cycle(&self, revisited: NodeIndex) -> Vec<NodeIndex> {
        let start = self
            .path
            .iter()
            .position(|&node| node == revisited)
            .unwrap_or(0);
        let mut cycle = self.path[start..].to_vec();
        cycle.push(revisited);
        cycle
    }
}

/// Shortest chain of precedence edges leading from `from` to `to`.
pub fn find_path(pairs: &[PrecedencePair], from: &str, to: &str) -> Option<Vec<String>> {
    let graph = PrecedenceGraph::from_pairs(pairs);
    find_path_in(&graph, from, to)
}

fn find_path_in(graph: &PrecedenceGraph, from: &str, to: &str) -> Option<Vec<String>> {
    let start = graph.index_of(from)?;
    let goal = graph.index_of(to)?;

    let mut queue = VecDeque::from([start]);
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut seen = vec![false; graph.node_count()];
    seen[start] = true;

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(graph.path_names(&reconstruct_path(start, goal, &parent)));
        }
        for &next in graph.successors(current) {
            if !seen[next] {
                seen[next] = true;
                parent.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

fn reconstruct_path(
    start: NodeIndex,
    goal: NodeIndex,
    parent: &HashMap<NodeIndex, NodeIndex>,
) -> Vec<NodeIndex> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while cursor != start {
        match parent.get(&cursor) {
            Some(&previous) => {
                cursor = previous;
                path.push(cursor);
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Check whether storing `new_pairs` on top of `existing` closes a loop.
///
/// For a new pair `p -> s`, an existing chain `s -> ... -> p` means the
/// observation contradicts earlier ones; the loop `s -> ... -> p -> s` is
/// returned. A pair naming the same player twice is reported as `[p, p]`.
pub fn detect_contradiction(
    existing: &[PrecedencePair],
    new_pairs: &[PrecedencePair],
) -> Option<Vec<String>> {
    let graph = PrecedenceGraph::from_pairs(existing);

    for pair in new_pairs {
        if pair.is_self_loop() {
            debug!("Observation repeats player {}", pair.predecessor);
            return Some(vec![pair.predecessor.clone(), pair.successor.clone()]);
        }

        if let Some(mut reverse) = find_path_in(&graph, &pair.successor, &pair.predecessor) {
            debug!(
                "New pair {} -> {} contradicts a chain of {} stored edges",
                pair.predecessor,
                pair.successor,
                reverse.len() - 1
            );
            reverse.push(pair.successor.clone());
            return Some(reverse);
        }
    }

    None
}
