// src/handlers/address.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::address::{Address, StreetQuery},
};

// GET /api/address/cep/{cep}
#[utoipa::path(
    get,
    path = "/api/address/cep/{cep}",
    tag = "Endereços",
    params(("cep" = String, Path, description = "CEP com ou sem máscara")),
    responses(
        (status = 200, description = "Endereço do CEP", body = Address),
        (status = 404, description = "CEP não encontrado ou incompleto")
    )
)]
pub async fn lookup_cep(
    State(app_state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let address = app_state
        .address_lookup
        .lookup_cep(&cep)
        .await
        .ok_or_else(|| AppError::NotFound("CEP".into()))?;

    Ok((StatusCode::OK, Json(address)))
}

// GET /api/address/search
#[utoipa::path(
    get,
    path = "/api/address/search",
    tag = "Endereços",
    params(StreetQuery),
    responses(
        (status = 200, description = "Endereços candidatos (lista vazia se nada for encontrado)", body = Vec<Address>)
    )
)]
pub async fn search_street(
    State(app_state): State<AppState>,
    Query(query): Query<StreetQuery>,
) -> impl IntoResponse {
    let candidates = app_state
        .address_lookup
        .search_street(query.uf.as_deref(), query.city.as_deref(), &query.street)
        .await;

    (StatusCode::OK, Json(candidates))
}
