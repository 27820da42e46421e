use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;

use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::services::{RankingService, RegistrationService};

pub mod aliases;
pub mod observations;
pub mod ranking;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

impl AppState {
    pub fn ranking(&self) -> RankingService {
        RankingService::new(self.pool.clone(), self.config.clone())
    }

    pub fn registration(&self) -> RegistrationService {
        RegistrationService::new(self.pool.clone(), self.config.clone())
    }
}

/// Store failures surface as 500 with the error chain in the body
fn internal_error(err: anyhow::Error) -> Response {
    error!("Request failed: {:#}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Store error: {:#}", err)).into_response()
}
