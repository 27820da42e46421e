use anyhow::{bail, Result};
use chrono::Utc;
use log::{info, warn};
use rusqlite::TransactionBehavior;
use serde::Serialize;

use crate::config::settings::AppConfig;
use crate::database::{self, aliases, observations, pairs, players, DbPool};
use crate::domain::{Observation, PrecedencePair};
use crate::ordering::{detect_contradiction, extract_from_input, normalize_input};
use crate::ordering::extractor::split_names;

/// Decides whether an observation that contradicts stored data is kept.
///
/// `cycle` is a closed loop of names such as `[B, C, A, B]`.
pub trait ContradictionGate {
    fn confirm(&self, normalized: &str, cycle: &[String]) -> Result<bool>;
}

impl<F> ContradictionGate for F
where
    F: Fn(&str, &[String]) -> Result<bool>,
{
    fn confirm(&self, normalized: &str, cycle: &[String]) -> Result<bool> {
        self(normalized, cycle)
    }
}

/// Keep contradicting observations without asking
pub struct AcceptContradictions;

impl ContradictionGate for AcceptContradictions {
    fn confirm(&self, _normalized: &str, _cycle: &[String]) -> Result<bool> {
        Ok(true)
    }
}

/// Refuse every contradicting observation
pub struct RejectContradictions;

impl ContradictionGate for RejectContradictions {
    fn confirm(&self, _normalized: &str, _cycle: &[String]) -> Result<bool> {
        Ok(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RegistrationOutcome {
    #[serde(rename_all = "camelCase")]
    Registered {
        observation_id: i64,
        normalized: String,
        pair_count: usize,
        /// At least one name was rewritten through an alias
        aliased: bool,
        /// The loop this observation closed, when it was accepted anyway
        contradiction: Option<Vec<String>>,
    },
    /// Fewer than two names after normalization
    NoPairs,
    Rejected { cycle: Vec<String> },
}

pub struct RegistrationService {
    pool: DbPool,
    config: AppConfig,
}

impl RegistrationService {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    pub fn register(
        &self,
        raw: &str,
        gate: &dyn ContradictionGate,
    ) -> Result<RegistrationOutcome> {
        let mut conn = database::get_connection(&self.pool)?;

        let alias_table = aliases::load_alias_table(&conn)?;
        let normalized = normalize_input(raw, &alias_table);
        let new_pairs = extract_from_input(&normalized);
        if new_pairs.is_empty() {
            info!("Observation '{}' yields no pairs", raw.trim());
            return Ok(RegistrationOutcome::NoPairs);
        }
        self.check_observation_size(&normalized)?;

        let existing = pairs::list_all(&conn)?;
        let contradiction = detect_contradiction(&existing, &new_pairs);
        if let Some(cycle) = &contradiction {
            warn!("Observation '{}' contradicts stored order: {}", normalized, cycle.join(" -> "));
            if !gate.confirm(&normalized, cycle)? {
                info!("Observation rejected");
                return Ok(RegistrationOutcome::Rejected {
                    cycle: cycle.clone(),
                });
            }
        }

        // the store may have changed while the gate was deciding
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let current = detect_contradiction(&pairs::list_all(&tx)?, &new_pairs);
        if current != contradiction {
            if let Some(cycle) = current {
                warn!(
                    "Observation '{}' now contradicts stored order: {}",
                    normalized,
                    cycle.join(" -> ")
                );
                return Ok(RegistrationOutcome::Rejected { cycle });
            }
        }
        let contradiction = current;

        players::register_players(&tx, distinct_players(&new_pairs))?;
        let observation =
            observations::insert_observation(&tx, &normalized, Utc::now().naive_utc())?;
        pairs::increment_pairs(&tx, &new_pairs)?;
        tx.commit()?;

        info!(
            "Registered observation {} ({} pairs): {}",
            observation.id,
            new_pairs.len(),
            normalized
        );

        Ok(RegistrationOutcome::Registered {
            observation_id: observation.id,
            aliased: was_aliased(raw, &normalized),
            normalized,
            pair_count: new_pairs.len(),
            contradiction,
        })
    }

    fn check_observation_size(&self, normalized: &str) -> Result<()> {
        let count = split_names(normalized).len();
        let limit = self.config.ranking.max_observation_players;
        if count > limit {
            bail!(
                "Observation lists {} players, more than the limit of {}",
                count,
                limit
            );
        }
        Ok(())
    }

    /// Take back a logged observation. Returns `None` for an unknown id.
    pub fn undo(&self, observation_id: i64) -> Result<Option<Observation>> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        let Some(observation) = observations::find_by_id(&tx, observation_id)? else {
            return Ok(None);
        };
        let logged_pairs = extract_from_input(&observation.ordered_list);
        pairs::decrement_pairs(&tx, &logged_pairs)?;
        observations::delete_observation(&tx, observation_id)?;
        tx.commit()?;

        info!(
            "Undid observation {} ({} pairs): {}",
            observation.id,
            logged_pairs.len(),
            observation.ordered_list
        );
        Ok(Some(observation))
    }

    pub fn clear_all(&self) -> Result<()> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction()?;
        database::clear_all(&tx)?;
        tx.commit()?;
        Ok(())
    }

    /// Returns `false` when the alias is already taken (in any letter case).
    pub fn add_alias(&self, alias: &str, target: &str) -> Result<bool> {
        let (alias, target) = (alias.trim(), target.trim());
        if alias.is_empty() || target.is_empty() {
            bail!("Alias and target name must not be empty");
        }

        let conn = database::get_connection(&self.pool)?;
        if aliases::load_alias_table(&conn)?.resolve(alias).is_some() {
            warn!("Alias '{}' is already registered", alias);
            return Ok(false);
        }
        aliases::add_alias(&conn, alias, target)?;
        info!("Alias '{}' now resolves to '{}'", alias, target);
        Ok(true)
    }

    pub fn remove_alias(&self, alias: &str) -> Result<bool> {
        let conn = database::get_connection(&self.pool)?;
        aliases::remove_alias(&conn, alias.trim())
    }

    pub fn list_aliases(&self, target: Option<&str>) -> Result<Vec<aliases::Alias>> {
        let conn = database::get_connection(&self.pool)?;
        let Some(target) = target else {
            return aliases::list_all(&conn);
        };
        Ok(aliases::list_by_target(&conn, target)?
            .into_iter()
            .map(|alias| aliases::Alias {
                alias,
                target: target.to_string(),
            })
            .collect())
    }
}

fn distinct_players(pairs: &[PrecedencePair]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for pair in pairs {
        for name in [pair.predecessor.as_str(), pair.successor.as_str()] {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

fn was_aliased(raw: &str, normalized: &str) -> bool {
    split_names(raw) != split_names(normalized)
}
