use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    aliases::{create_alias, delete_alias, list_aliases},
    observations::{create_observation, delete_observation, list_observations},
    ranking::{get_contradictions, get_players, get_ranking, get_ranking_graph, simulate_room},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ranking", get(get_ranking))
        .route("/api/ranking/graph", get(get_ranking_graph))
        .route("/api/contradictions", get(get_contradictions))
        .route("/api/players", get(get_players))
        .route("/api/simulation", post(simulate_room))
        .route("/api/observations", get(list_observations).post(create_observation))
        .route("/api/observations/:id", delete(delete_observation))
        .route("/api/aliases", get(list_aliases).post(create_alias))
        .route("/api/aliases/:alias", delete(delete_alias))
        .with_state(state)
}
