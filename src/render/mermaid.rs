use std::collections::HashMap;
use std::fmt::Write as _;

use crate::domain::{PrecedencePair, RankLayer};

/// Mermaid flowchart: one subgraph per rank, one arrow per stored pair.
///
/// Players get ids `n0`, `n1`, ... in order of first mention; the name is
/// only ever emitted as a quoted label, so any text is safe.
pub fn generate_mermaid(pairs: &[PrecedencePair], layers: &[RankLayer]) -> String {
    let mut out = String::new();
    let mut nodes = NodeIds::default();
    out.push_str("graph TD;\n");
    out.push_str("  classDef default fill:#f9f9f9,stroke:#333,stroke-width:1px;\n");

    for (idx, layer) in layers.iter().enumerate() {
        if layer.is_empty() {
            continue;
        }
        write_rank_subgraph(&mut out, &mut nodes, idx + 1, layer);
    }

    for pair in pairs {
        let from = nodes.reference(&pair.predecessor);
        let to = nodes.reference(&pair.successor);
        let _ = writeln!(out, "  {from} --> {to};");
    }

    out
}

fn write_rank_subgraph(out: &mut String, nodes: &mut NodeIds, rank: usize, layer: &RankLayer) {
    let _ = writeln!(out, "  subgraph Rank{rank} [Rank {rank}]");
    out.push_str("    direction LR;\n");
    for member in &layer.members {
        let _ = writeln!(out, "    {};", nodes.reference(member));
    }
    out.push_str("  end\n");
}

#[derive(Default)]
struct NodeIds {
    ids: HashMap<String, usize>,
}

impl NodeIds {
    /// `n3["Big Ben"]` the first time a name is seen, `n3` afterwards
    fn reference(&mut self, name: &str) -> String {
        if let Some(id) = self.ids.get(name) {
            return format!("n{id}");
        }
        let id = self.ids.len();
        self.ids.insert(name.to_string(), id);
        format!("n{id}[\"{}\"]", escape_label(name))
    }
}

fn escape_label(name: &str) -> String {
    name.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_includes_header_and_edges() {
        let pairs = vec![PrecedencePair::new("A", "B"), PrecedencePair::new("B", "C")];

        let result = generate_mermaid(&pairs, &[]);

        assert!(result.starts_with("graph TD;\n"));
        assert!(result.contains("  n0[\"A\"] --> n1[\"B\"];\n"));
        assert!(result.contains("  n1 --> n2[\"C\"];\n"));
        assert!(!result.contains("subgraph"));
    }

    #[test]
    fn test_generates_subgraph_per_rank() {
        let layers = vec![
            RankLayer::new(vec!["A".into()]),
            RankLayer::new(vec!["B".into(), "C".into()]),
        ];

        let result = generate_mermaid(&[PrecedencePair::new("A", "C")], &layers);

        assert!(result.contains("subgraph Rank1 [Rank 1]"));
        assert!(result.contains("subgraph Rank2 [Rank 2]"));
        assert!(result.contains("    n0[\"A\"];\n"));
        assert!(result.contains("    n1[\"B\"];\n    n2[\"C\"];\n"));
        assert!(result.contains("  n0 --> n2;\n"));
        assert_eq!(result.matches("  end\n").count(), 2);
    }

    #[test]
    fn test_similar_names_stay_distinct() {
        let pairs = vec![PrecedencePair::new("Big Ben", "Big_Ben")];

        let result = generate_mermaid(&pairs, &[]);

        assert!(result.contains("  n0[\"Big Ben\"] --> n1[\"Big_Ben\"];\n"));
    }

    #[test]
    fn test_mermaid_syntax_in_names_is_quoted() {
        let layers = vec![RankLayer::new(vec!["end".into(), "a --> b; \"x\"".into()])];

        let result = generate_mermaid(&[], &layers);

        assert!(result.contains("    n0[\"end\"];\n"));
        assert!(result.contains("    n1[\"a --> b; #quot;x#quot;\"];\n"));
        assert_eq!(result.matches("  end\n").count(), 1);
    }
}
