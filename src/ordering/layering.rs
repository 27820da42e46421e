use std::collections::{BTreeSet, VecDeque};

use log::debug;

use super::condense::{component_membership, condense};
use super::graph::PrecedenceGraph;
use crate::domain::{PrecedencePair, RankLayer};

/// Infer a layered ranking from accumulated precedence pairs.
///
/// Contradicting players (a strongly connected cluster) are contracted into
/// one unit and end up tied in the same layer, so cyclic input is never
/// rejected and no player is dropped. Layer 0 holds everyone with no
/// unresolved predecessor; each later layer follows all earlier ones.
/// Names inside a layer are sorted.
pub fn rank(pairs: &[PrecedencePair]) -> Vec<RankLayer> {
    let graph = PrecedenceGraph::from_pairs(pairs);
    let components = condense(&graph);
    let condensed = CondensedGraph::build(&graph, &components);

    let layers = condensed.layers(&graph, &components);

    debug!(
        "Ranked {} players ({} distinct edges, {} contradictory clusters) into {} layers",
        graph.node_count(),
        graph.edge_count(),
        components.iter().filter(|c| c.len() > 1).count(),
        layers.len()
    );
    layers
}

struct CondensedGraph {
    successors: Vec<BTreeSet<usize>>,
    in_degree: Vec<usize>,
}

impl CondensedGraph {
    fn build(graph: &PrecedenceGraph, components: &[Vec<usize>]) -> Self {
        let membership = component_membership(components, graph.node_count());
        let mut successors = vec![BTreeSet::new(); components.len()];
        let mut in_degree = vec![0; components.len()];

        for node in graph.nodes() {
            let from = membership[node];
            for &next in graph.successors(node) {
                let to = membership[next];
                // parallel crossings between the same two components count once
                if from != to && successors[from].insert(to) {
                    in_degree[to] += 1;
                }
            }
        }

        Self {
            successors,
            in_degree,
        }
    }

    /// Generational Kahn: every round drains exactly the components that were
    /// ready when it started; components freed during the round wait for the next.
    fn layers(mut self, graph: &PrecedenceGraph, components: &[Vec<usize>]) -> Vec<RankLayer> {
        let mut queue: VecDeque<usize> = (0..components.len())
            .filter(|&component| self.in_degree[component] == 0)
            .collect();
        let mut layers = Vec::new();

        while !queue.is_empty() {
            let round_size = queue.len();
            let mut members = Vec::new();

            for _ in 0..round_size {
                let Some(component) = queue.pop_front() else {
                    break;
                };
                members.extend(graph.path_names(&components[component]));
                self.release_successors(component, &mut queue);
            }

            if !members.is_empty() {
                members.sort();
                layers.push(RankLayer::new(members));
            }
        }

        layers
    }

    fn release_successors(&mut self, component: usize, queue: &mut VecDeque<usize>) {
        for &next in &self.successors[component] {
            self.in_degree[next] -= 1;
            if self.in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn pairs(edges: &[(&str, &str)]) -> Vec<PrecedencePair> {
        edges
            .iter()
            .map(|(p, s)| PrecedencePair::new(*p, *s))
            .collect()
    }

    fn names(layers: &[RankLayer]) -> Vec<Vec<&str>> {
        layers
            .iter()
            .map(|layer| layer.members.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_linear_chain() {
        let layers = rank(&pairs(&[("A", "B"), ("B", "C")]));

        assert_eq!(names(&layers), vec![vec!["A"], vec!["B"], vec!["C"]]);
    }

    #[test]
    fn test_branching_tie() {
        let layers = rank(&pairs(&[("A", "B"), ("A", "C")]));

        assert_eq!(names(&layers), vec![vec!["A"], vec!["B", "C"]]);
        assert!(layers[1].is_tied());
    }

    #[test]
    fn test_disconnected_components() {
        let layers = rank(&pairs(&[("A", "B"), ("C", "D")]));

        assert_eq!(names(&layers), vec![vec!["A", "C"], vec!["B", "D"]]);
    }

    #[test]
    fn test_two_node_cycle_becomes_one_tied_layer() {
        let layers = rank(&pairs(&[("A", "B"), ("B", "A")]));

        assert_eq!(names(&layers), vec![vec!["A", "B"]]);
    }

    #[test]
    fn test_cycle_is_ranked_between_its_neighbours() {
        let layers = rank(&pairs(&[
            ("Top", "A"),
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("C", "Bottom"),
        ]));

        assert_eq!(
            names(&layers),
            vec![vec!["Top"], vec!["A", "B", "C"], vec!["Bottom"]]
        );
    }

    #[test]
    fn test_unrelated_cycle_does_not_disturb_other_players() {
        let layers = rank(&pairs(&[("A", "B"), ("B", "A"), ("X", "Y"), ("Y", "Z")]));

        assert_eq!(names(&layers), vec![vec!["A", "B", "X"], vec!["Y"], vec!["Z"]]);
    }

    #[test]
    fn test_duplicate_pairs_do_not_delay_layers() {
        // two crossings from the {A,B} cluster into C must release C in one step
        let layers = rank(&pairs(&[
            ("A", "B"),
            ("B", "A"),
            ("A", "C"),
            ("B", "C"),
            ("A", "C"),
        ]));

        assert_eq!(names(&layers), vec![vec!["A", "B"], vec!["C"]]);
    }

    #[test]
    fn test_self_loop_is_harmless() {
        let layers = rank(&pairs(&[("A", "A"), ("A", "B")]));

        assert_eq!(names(&layers), vec![vec!["A"], vec!["B"]]);
    }

    #[test]
    fn test_layer_follows_longest_chain() {
        // C is reachable directly from A but must wait for B
        let layers = rank(&pairs(&[("A", "C"), ("A", "B"), ("B", "C")]));

        assert_eq!(names(&layers), vec![vec!["A"], vec!["B"], vec!["C"]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(&[]).is_empty());
    }

    fn edge_strategy() -> impl Strategy<Value = Vec<(u8, u8)>> {
        prop::collection::vec((0u8..12, 0u8..12), 0..40)
    }

    proptest! {
        #[test]
        fn prop_layers_partition_the_players(edges in edge_strategy()) {
            let input: Vec<PrecedencePair> = edges
                .iter()
                .map(|(p, s)| PrecedencePair::new(format!("p{p}"), format!("p{s}")))
                .collect();
            let expected: HashSet<String> = input
                .iter()
                .flat_map(|pair| [pair.predecessor.clone(), pair.successor.clone()])
                .collect();

            let layers = rank(&input);
            let flattened: Vec<String> = layers.iter().flat_map(|l| l.members.clone()).collect();
            let unique: HashSet<String> = flattened.iter().cloned().collect();

            prop_assert_eq!(flattened.len(), unique.len());
            prop_assert_eq!(unique, expected);
            prop_assert!(layers.iter().all(|layer| !layer.is_empty()));
        }

        #[test]
        fn prop_every_acyclic_edge_points_forward(edges in edge_strategy()) {
            // keep only p < s so the input is acyclic
            let input: Vec<PrecedencePair> = edges
                .iter()
                .filter(|(p, s)| p < s)
                .map(|(p, s)| PrecedencePair::new(format!("p{p:02}"), format!("p{s:02}")))
                .collect();

            let layers = rank(&input);
            let position = |name: &str| layers.iter().position(|l| l.contains(name));

            for pair in &input {
                prop_assert!(position(&pair.predecessor) < position(&pair.successor));
            }
        }

        #[test]
        fn prop_total_order_gives_singleton_layers(len in 1usize..15) {
            let order: Vec<String> = (0..=len).map(|i| format!("player{i:02}")).collect();
            let mut input = Vec::new();
            for i in 0..order.len() {
                for j in i + 1..order.len() {
                    input.push(PrecedencePair::new(order[i].clone(), order[j].clone()));
                }
            }

            let layers = rank(&input);

            prop_assert_eq!(layers.len(), order.len());
            for (layer, name) in layers.iter().zip(&order) {
                prop_assert_eq!(&layer.members, &vec![name.clone()]);
            }
        }
    }
}
