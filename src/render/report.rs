use crate::domain::RankLayer;

const TIED_SUFFIX: &str = " (tied)";

/// Numbered ranking lines: "1 : A", "2 : B, C (tied)".
///
/// Tied players share one rank number and the next layer takes the next one.
pub fn format_ranking(layers: &[RankLayer]) -> Vec<String> {
    layers
        .iter()
        .enumerate()
        .map(|(idx, layer)| format_layer(idx + 1, layer))
        .collect()
}

fn format_layer(rank: usize, layer: &RankLayer) -> String {
    let members = layer.members.join(", ");
    if layer.is_tied() {
        format!("{rank} : {members}{TIED_SUFFIX}")
    } else {
        format!("{rank} : {members}")
    }
}
