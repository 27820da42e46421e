use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// "predecessor ranked ahead of successor" in at least one observation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrecedencePair {
    pub predecessor: String,
    pub successor: String,
}

impl PrecedencePair {
    pub fn new(predecessor: impl Into<String>, successor: impl Into<String>) -> Self {
        Self {
            predecessor: predecessor.into(),
            successor: successor.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.predecessor == self.successor
    }
}

/// Group of players tied at the same inferred rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankLayer {
    pub members: Vec<String>,
}

impl RankLayer {
    pub fn new(members: Vec<String>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// More than one player shares this rank
    pub fn is_tied(&self) -> bool {
        self.members.len() > 1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }
}

/// Pair row as kept by the store, with its observation count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredPair {
    pub predecessor: String,
    pub successor: String,
    pub frequency: i64,
}

impl From<StoredPair> for PrecedencePair {
    fn from(row: StoredPair) -> Self {
        PrecedencePair::new(row.predecessor, row.successor)
    }
}

/// One logged observation (normalized name list)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub id: i64,
    pub ordered_list: String,
    pub observed_at: NaiveDateTime,
}

/// Expected finishing position of one participant in a simulated room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPlacement {
    /// Name as entered
    pub name: String,
    /// Name after alias resolution
    pub resolved: String,
    /// 1-based; tied participants share the number of the first of them
    pub rank: usize,
    pub tied: bool,
    /// The first participant hosts the room and is always placed first
    pub host: bool,
    /// Position in the global ranking, `None` when nothing is known about the player
    pub layer: Option<usize>,
}
