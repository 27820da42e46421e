//! Expected finishing order of a single room, derived from the global ranking.

use std::collections::HashMap;

use crate::domain::{RankLayer, RoomPlacement};

/// A participant as entered and as resolved through the alias table
pub struct Entrant<'a> {
    pub name: &'a str,
    pub resolved: &'a str,
}

/// Order the entrants of one room.
///
/// The first entrant hosts the room and is always placed first. Everyone
/// else follows their global layer; players absent from `layers` go last.
/// Entry order breaks ties, and entrants sharing a layer (or all unknown)
/// share a rank number, with the next rank skipping ahead: 1, 2, 2, 4.
pub fn simulate_room(entrants: &[Entrant<'_>], layers: &[RankLayer]) -> Vec<RoomPlacement> {
    let layer_of: HashMap<&str, usize> = layers
        .iter()
        .enumerate()
        .flat_map(|(idx, layer)| layer.members.iter().map(move |m| (m.as_str(), idx)))
        .collect();

    let mut order: Vec<(usize, Option<usize>)> = entrants
        .iter()
        .enumerate()
        .map(|(idx, entrant)| (idx, layer_of.get(entrant.resolved).copied()))
        .collect();
    order.sort_by_key(|&(idx, layer)| (idx != 0, layer.unwrap_or(usize::MAX), idx));

    let mut placements: Vec<RoomPlacement> = Vec::with_capacity(order.len());
    for (position, &(idx, layer)) in order.iter().enumerate() {
        let entrant = &entrants[idx];
        let shares_previous = position > 0 && {
            let (previous_idx, previous_layer) = order[position - 1];
            previous_idx != 0 && previous_layer == layer
        };

        let rank = if shares_previous {
            if let Some(previous) = placements.last_mut() {
                previous.tied = true;
            }
            placements.last().map_or(position + 1, |previous| previous.rank)
        } else {
            position + 1
        };

        placements.push(RoomPlacement {
            name: entrant.name.to_string(),
            resolved: entrant.resolved.to_string(),
            rank,
            tied: shares_previous,
            host: idx == 0,
            layer,
        });
    }
    placements
}
