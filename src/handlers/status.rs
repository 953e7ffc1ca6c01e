// src/handlers/status.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::AppState, db::DataAccessMode};

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// "remote" ou "local"; decidido na inicialização.
    pub mode: DataAccessMode,
    /// Verdadeiro quando o backend remoto é o sistema de registro.
    pub online: bool,
    pub contact_configured: bool,
    pub operator_configured: bool,
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Status",
    responses((status = 200, description = "Servidor no ar", body = String))
)]
pub async fn health() -> &'static str {
    "OK"
}

// GET /api/status
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "Status",
    responses((status = 200, description = "Modo de acesso a dados", body = StatusResponse))
)]
pub async fn status(State(app_state): State<AppState>) -> impl IntoResponse {
    let body = StatusResponse {
        mode: app_state.mode,
        online: app_state.mode == DataAccessMode::Remote,
        contact_configured: app_state.contact_service.is_configured(),
        operator_configured: app_state.operator_token.is_some(),
    };
    (StatusCode::OK, Json(body))
}
