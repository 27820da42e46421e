//! Strongly connected components of a precedence graph (Tarjan).
//!
//! Every cluster of mutually contradicting players becomes one component.
//! Contracting components yields an acyclic graph, which is what the layered
//! sort relies on.
//!
//! The traversal keeps its own frame stack instead of recursing, so graph
//! depth is bounded by heap, not by the thread's call stack. Discovery order
//! and low-link values are the same as the recursive formulation.

use super::graph::{NodeIndex, PrecedenceGraph};

/// Components in completion order (sinks of the condensed graph first).
/// Member order inside a component is pop order and carries no meaning.
pub fn condense(graph: &PrecedenceGraph) -> Vec<Vec<NodeIndex>> {
    let mut state = TarjanState::new(graph.node_count());

    for root in graph.nodes() {
        if state.indices[root].is_none() {
            state.strong_connect(graph, root);
        }
    }

    state.components
}

/// Map each node to the position of its component in `components`.
pub fn component_membership(components: &[Vec<NodeIndex>], node_count: usize) -> Vec<usize> {
    let mut membership = vec![0; node_count];
    for (component_id, members) in components.iter().enumerate() {
        for &node in members {
            membership[node] = component_id;
        }
    }
    membership
}

struct Frame {
    node: NodeIndex,
    next_successor: usize,
}

struct TarjanState {
    next_index: usize,
    indices: Vec<Option<usize>>,
    low_links: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<NodeIndex>,
    components: Vec<Vec<NodeIndex>>,
}

impl TarjanState {
    fn new(node_count: usize) -> Self {
        Self {
            next_index: 0,
            indices: vec![None; node_count],
            low_links: vec![0; node_count],
            on_stack: vec![false; node_count],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn strong_connect(&mut self, graph: &PrecedenceGraph, root: NodeIndex) {
        let mut frames = vec![self.discover(root)];

        while let Some(frame) = frames.last_mut() {
            let node = frame.node;

            if let Some(&successor) = graph.successors(node).get(frame.next_successor) {
                frame.next_successor += 1;
                match self.indices[successor] {
                    None => frames.push(self.discover(successor)),
                    Some(successor_index) if self.on_stack[successor] => {
                        self.low_links[node] = self.low_links[node].min(successor_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // all successors explored: leave `node`, as a recursive call would return
            frames.pop();
            self.close_component_if_root(node);
            if let Some(parent) = frames.last() {
                let parent = parent.node;
                self.low_links[parent] = self.low_links[parent].min(self.low_links[node]);
            }
        }
    }

    fn discover(&mut self, node: NodeIndex) -> Frame {
        self.indices[node] = Some(self.next_index);
        self.low_links[node] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[node] = true;

        Frame {
            node,
            next_successor: 0,
        }
    }

    fn close_component_if_root(&mut self, node: NodeIndex) {
        if Some(self.low_links[node]) != self.indices[node] {
            return;
        }

        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack[member] = false;
            component.push(member);
            if member == node {
                break;
            }
        }
        self.components.push(component);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PrecedencePair;

    fn graph(edges: &[(&str, &str)]) -> PrecedenceGraph {
        let pairs: Vec<PrecedencePair> = edges
            .iter()
            .map(|(p, s)| PrecedencePair::new(*p, *s))
            .collect();
        PrecedenceGraph::from_pairs(&pairs)
    }

    fn sorted_names(graph: &PrecedenceGraph, components: &[Vec<NodeIndex>]) -> Vec<Vec<String>> {
        components
            .iter()
            .map(|component| {
                let mut names = graph.path_names(component);
                names.sort();
                names
            })
            .collect()
    }

    #[test]
    fn test_chain_is_all_singletons_sinks_first() {
        let g = graph(&[("A", "B"), ("B", "C")]);

        let components = condense(&g);

        assert_eq!(sorted_names(&g, &components), vec![vec!["C"], vec!["B"], vec!["A"]]);
    }

    #[test]
    fn test_triangle_collapses_into_one_component() {
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "A")]);

        let components = condense(&g);

        assert_eq!(sorted_names(&g, &components), vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn test_cycle_with_tail() {
        // D feeds into the A <-> B cycle, which feeds into C
        let g = graph(&[("D", "A"), ("A", "B"), ("B", "A"), ("B", "C")]);

        let components = condense(&g);

        assert_eq!(
            sorted_names(&g, &components),
            vec![vec!["C"], vec!["A", "B"], vec!["D"]]
        );
    }

    #[test]
    fn test_self_loop_stays_singleton() {
        let g = graph(&[("A", "A"), ("A", "B")]);

        let components = condense(&g);

        assert_eq!(sorted_names(&g, &components), vec![vec!["B"], vec!["A"]]);
    }

    #[test]
    fn test_low_link_uses_discovery_index_of_on_stack_nodes() {
        // Two cycles sharing B: A -> B -> C -> A and B -> D -> B
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "A"), ("B", "D"), ("D", "B")]);

        let components = condense(&g);

        assert_eq!(sorted_names(&g, &components), vec![vec!["A", "B", "C", "D"]]);
    }

    #[test]
    fn test_membership_covers_every_node_once() {
        let g = graph(&[("A", "B"), ("B", "A"), ("C", "D")]);
        let components = condense(&g);

        let membership = component_membership(&components, g.node_count());

        assert_eq!(membership[0], membership[1]);
        assert_ne!(membership[2], membership[3]);
        let total: usize = components.iter().map(Vec::len).sum();
        assert_eq!(total, g.node_count());
    }

    #[test]
    fn test_long_chain_does_not_exhaust_the_call_stack() {
        let names: Vec<String> = (0..200_000).map(|i| format!("p{i}")).collect();
        let pairs: Vec<PrecedencePair> = names
            .windows(2)
            .map(|w| PrecedencePair::new(w[0].as_str(), w[1].as_str()))
            .collect();
        let g = PrecedenceGraph::from_pairs(&pairs);

        let components = condense(&g);

        assert_eq!(components.len(), 200_000);
    }

    #[test]
    fn test_long_cycle_is_one_component() {
        let mut pairs: Vec<PrecedencePair> = (0..50_000)
            .map(|i| PrecedencePair::new(format!("p{i}"), format!("p{}", i + 1)))
            .collect();
        pairs.push(PrecedencePair::new("p50000", "p0"));
        let g = PrecedenceGraph::from_pairs(&pairs);

        let components = condense(&g);

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 50_001);
    }
}
