use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{internal_error, AppState};
use crate::api::models::{HistoryParams, ObservationItem, ObservationRequest};
use crate::ordering::extractor::split_names;
use crate::services::{
    AcceptContradictions, ContradictionGate, RegistrationOutcome, RejectContradictions,
};

pub async fn list_observations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> impl IntoResponse {
    match state.ranking().history(params.limit) {
        Ok(history) => {
            let items: Vec<ObservationItem> = history.into_iter().map(Into::into).collect();
            Json(items).into_response()
        }
        Err(e) => internal_error(e),
    }
}

pub async fn create_observation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ObservationRequest>,
) -> impl IntoResponse {
    let listed = split_names(&request.input).len();
    let limit = state.config.ranking.max_observation_players;
    if listed > limit {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Observation lists {listed} players, the limit is {limit}"),
        )
            .into_response();
    }

    let gate: &dyn ContradictionGate = if request.confirm {
        &AcceptContradictions
    } else {
        &RejectContradictions
    };

    match state.registration().register(&request.input, gate) {
        Ok(outcome @ RegistrationOutcome::Registered { .. }) => {
            (StatusCode::CREATED, Json(outcome)).into_response()
        }
        Ok(outcome @ RegistrationOutcome::Rejected { .. }) => {
            (StatusCode::CONFLICT, Json(outcome)).into_response()
        }
        Ok(outcome @ RegistrationOutcome::NoPairs) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(outcome)).into_response()
        }
        Err(e) => internal_error(e),
    }
}

pub async fn delete_observation(
    State(state): State<Arc<AppState>>,
    Path(observation_id): Path<i64>,
) -> impl IntoResponse {
    match state.registration().undo(observation_id) {
        Ok(Some(observation)) => Json(ObservationItem::from(observation)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("Observation {observation_id} not found"),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}
