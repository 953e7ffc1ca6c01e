// src/handlers/donations.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::OperatorSession,
    models::donation::{filter_donations, DonationDetails, DonationQuery, DonationRecord},
};

// GET /api/donations
#[utoipa::path(
    get,
    path = "/api/donations",
    tag = "Doações",
    params(DonationQuery),
    responses(
        (status = 200, description = "Doações, mais recentes primeiro", body = Vec<DonationRecord>)
    )
)]
pub async fn list_donations(
    State(app_state): State<AppState>,
    Query(query): Query<DonationQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Recarrega sempre; a busca filtra a lista recém-carregada.
    let all = app_state.donation_repo.list().await;

    let donations = match query.q.as_deref().map(str::trim) {
        None | Some("") => all,
        Some(q) => filter_donations(&all, q),
    };

    Ok((StatusCode::OK, Json(donations)))
}

// GET /api/donations/{id}
#[utoipa::path(
    get,
    path = "/api/donations/{id}",
    tag = "Doações",
    params(("id" = i64, Path, description = "ID da doação")),
    responses(
        (status = 200, description = "Detalhes da doação", body = DonationRecord),
        (status = 404, description = "Doação não encontrada")
    )
)]
pub async fn get_donation(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let donation = app_state
        .donation_repo
        .find(id)
        .await
        .ok_or_else(|| AppError::NotFound("Doação".into()))?;

    Ok((StatusCode::OK, Json(donation)))
}

// POST /api/donations
#[utoipa::path(
    post,
    path = "/api/donations",
    tag = "Doações",
    request_body = DonationDetails,
    responses(
        (status = 201, description = "Doação cadastrada; devolve a lista atualizada", body = Vec<DonationRecord>),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Operador não autenticado")
    ),
    security(("operator_token" = []))
)]
pub async fn create_donation(
    State(app_state): State<AppState>,
    _operator: OperatorSession,
    Json(mut payload): Json<DonationDetails>,
) -> Result<impl IntoResponse, AppError> {
    payload.apply_input_masks();
    payload.validate()?;

    let donations = app_state.donation_repo.create(payload).await?;

    Ok((StatusCode::CREATED, Json(donations)))
}

// DELETE /api/donations/{id}
#[utoipa::path(
    delete,
    path = "/api/donations/{id}",
    tag = "Doações",
    params(("id" = i64, Path, description = "ID da doação")),
    responses(
        (status = 200, description = "Doação excluída; devolve a lista atualizada", body = Vec<DonationRecord>),
        (status = 401, description = "Operador não autenticado"),
        (status = 409, description = "Nenhum registro foi excluído")
    ),
    security(("operator_token" = []))
)]
pub async fn delete_donation(
    State(app_state): State<AppState>,
    _operator: OperatorSession,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let donations = app_state.donation_repo.delete(id).await?;

    Ok((StatusCode::OK, Json(donations)))
}
