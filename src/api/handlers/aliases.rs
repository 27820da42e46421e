use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{internal_error, AppState};
use crate::api::models::{AliasItem, AliasParams, AliasRequest};

pub async fn list_aliases(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AliasParams>,
) -> impl IntoResponse {
    match state.registration().list_aliases(params.target.as_deref()) {
        Ok(aliases) => {
            let items: Vec<AliasItem> = aliases.into_iter().map(Into::into).collect();
            Json(items).into_response()
        }
        Err(e) => internal_error(e),
    }
}

pub async fn create_alias(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AliasRequest>,
) -> impl IntoResponse {
    if request.alias.trim().is_empty() || request.target.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Alias and target name must not be empty",
        )
            .into_response();
    }

    match state.registration().add_alias(&request.alias, &request.target) {
        Ok(true) => StatusCode::CREATED.into_response(),
        Ok(false) => (
            StatusCode::CONFLICT,
            format!("Alias '{}' is already registered", request.alias.trim()),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

pub async fn delete_alias(
    State(state): State<Arc<AppState>>,
    Path(alias): Path<String>,
) -> impl IntoResponse {
    match state.registration().remove_alias(&alias) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, format!("Alias '{alias}' not found")).into_response(),
        Err(e) => internal_error(e),
    }
}
