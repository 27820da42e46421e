use serde::{Deserialize, Serialize};

use crate::database::aliases::Alias;
use crate::domain::{Observation, RankLayer};
use crate::services::RankingSnapshot;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankEntry {
    pub rank: usize,
    pub players: Vec<String>,
    pub tied: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub ranks: Vec<RankEntry>,
    pub player_count: usize,
    pub pair_count: usize,
}

impl From<RankingSnapshot> for RankingResponse {
    fn from(snapshot: RankingSnapshot) -> Self {
        let ranks = snapshot
            .layers
            .into_iter()
            .enumerate()
            .map(|(idx, layer)| rank_entry(idx + 1, layer))
            .collect();

        Self {
            ranks,
            player_count: snapshot.player_count,
            pair_count: snapshot.pair_count,
        }
    }
}

fn rank_entry(rank: usize, layer: RankLayer) -> RankEntry {
    RankEntry {
        rank,
        tied: layer.is_tied(),
        players: layer.members,
    }
}

#[derive(Serialize)]
pub struct GraphResponse {
    pub mermaid: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContradictionResponse {
    pub consistent: bool,
    pub cycle: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationItem {
    pub id: i64,
    pub ordered_list: String,
    pub observed_at: String,
}

impl From<Observation> for ObservationItem {
    fn from(observation: Observation) -> Self {
        Self {
            id: observation.id,
            ordered_list: observation.ordered_list,
            observed_at: observation.observed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasItem {
    pub alias: String,
    pub target: String,
}

impl From<Alias> for AliasItem {
    fn from(alias: Alias) -> Self {
        Self {
            alias: alias.alias,
            target: alias.target,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRequest {
    pub input: String,
    /// Store the observation even if it contradicts earlier ones
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Deserialize)]
pub struct AliasRequest {
    pub alias: String,
    pub target: String,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct AliasParams {
    pub target: Option<String>,
}

#[derive(Deserialize)]
pub struct SimulationRequest {
    /// Room participants, host first
    pub names: Vec<String>,
}
