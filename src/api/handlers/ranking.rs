use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{internal_error, AppState};
use crate::api::models::{ContradictionResponse, GraphResponse, RankingResponse, SimulationRequest};

pub async fn get_ranking(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.ranking().snapshot() {
        Ok(snapshot) => Json(RankingResponse::from(snapshot)).into_response(),
        Err(e) => internal_error(e),
    }
}

pub async fn get_ranking_graph(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.ranking().mermaid() {
        Ok(mermaid) => Json(GraphResponse { mermaid }).into_response(),
        Err(e) => internal_error(e),
    }
}

pub async fn get_contradictions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.ranking().contradiction() {
        Ok(cycle) => Json(ContradictionResponse {
            consistent: cycle.is_none(),
            cycle,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}

pub async fn get_players(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.ranking().known_players() {
        Ok(players) => Json(players).into_response(),
        Err(e) => internal_error(e),
    }
}

pub async fn simulate_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulationRequest>,
) -> impl IntoResponse {
    if request.names.iter().all(|name| name.trim().is_empty()) {
        return (StatusCode::UNPROCESSABLE_ENTITY, "List at least one participant").into_response();
    }

    match state.ranking().simulate(&request.names) {
        Ok(placements) => Json(placements).into_response(),
        Err(e) => internal_error(e),
    }
}
