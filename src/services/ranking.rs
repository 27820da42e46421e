use anyhow::Result;
use log::info;
use serde::Serialize;

use crate::config::settings::AppConfig;
use crate::database::{self, aliases, observations, pairs, players, DbPool};
use crate::domain::{Observation, RankLayer, RoomPlacement};
use crate::ordering::{find_cycle_path, rank, simulate_room, Entrant};
use crate::render::generate_mermaid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSnapshot {
    pub layers: Vec<RankLayer>,
    pub player_count: usize,
    pub pair_count: usize,
}

/// Read side of the store: rankings and diagnostics computed on demand.
pub struct RankingService {
    pool: DbPool,
    config: AppConfig,
}

impl RankingService {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    pub fn snapshot(&self) -> Result<RankingSnapshot> {
        let conn = database::get_connection(&self.pool)?;
        let stored = pairs::list_all(&conn)?;
        let layers = rank(&stored);
        let player_count = layers.iter().map(RankLayer::len).sum();

        info!(
            "Ranking: {} players in {} layers from {} pairs",
            player_count,
            layers.len(),
            stored.len()
        );

        Ok(RankingSnapshot {
            layers,
            player_count,
            pair_count: stored.len(),
        })
    }

    /// One loop of contradicting stored pairs, if any
    pub fn contradiction(&self) -> Result<Option<Vec<String>>> {
        let conn = database::get_connection(&self.pool)?;
        let stored = pairs::list_all(&conn)?;
        Ok(find_cycle_path(&stored))
    }

    pub fn mermaid(&self) -> Result<String> {
        let conn = database::get_connection(&self.pool)?;
        let stored = pairs::list_all(&conn)?;
        let layers = rank(&stored);
        Ok(generate_mermaid(&stored, &layers))
    }

    /// Most recent observations first. `None` uses the configured limit.
    pub fn history(&self, limit: Option<usize>) -> Result<Vec<Observation>> {
        let conn = database::get_connection(&self.pool)?;
        let limit = limit.unwrap_or(self.config.storage.history_limit);
        observations::list_recent(&conn, limit)
    }

    /// Expected order of one room; the first name is the host.
    /// Blank names are skipped and the rest resolved through aliases.
    pub fn simulate(&self, names: &[String]) -> Result<Vec<RoomPlacement>> {
        let conn = database::get_connection(&self.pool)?;
        let alias_table = aliases::load_alias_table(&conn)?;
        let layers = rank(&pairs::list_all(&conn)?);

        let entrants: Vec<Entrant> = names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| Entrant {
                name,
                resolved: alias_table.resolve(name).unwrap_or(name),
            })
            .collect();

        info!(
            "Simulating a room of {} against {} ranked layers",
            entrants.len(),
            layers.len()
        );
        Ok(simulate_room(&entrants, &layers))
    }

    /// Every player name seen so far, sorted
    pub fn known_players(&self) -> Result<Vec<String>> {
        let conn = database::get_connection(&self.pool)?;
        Ok(players::list_all(&conn)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }
}
