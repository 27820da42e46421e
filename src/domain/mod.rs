pub mod alias;
pub mod models;

pub use alias::AliasTable;
pub use models::{Observation, PrecedencePair, RankLayer, RoomPlacement, StoredPair};
