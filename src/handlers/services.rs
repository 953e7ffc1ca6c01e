// src/handlers/services.rs

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
    models::service::{Service, ServiceDetails, ServiceFilter, ServiceQuery},
};

// GET /api/services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Serviços",
    params(ServiceQuery),
    responses(
        (status = 200, description = "Serviços (filtrados por busca e tipo)", body = Vec<Service>),
        (status = 400, description = "Tipo de serviço desconhecido")
    )
)]
pub async fn list_services(
    State(app_state): State<AppState>,
    Query(query): Query<ServiceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ServiceFilter::try_from(query).map_err(AppError::BadRequest)?;

    let services = if filter == ServiceFilter::default() {
        app_state.service_repo.list().await
    } else {
        app_state.service_repo.search(&filter).await
    };

    Ok((StatusCode::OK, Json(services)))
}

// GET /api/services/{id}
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Serviços",
    params(("id" = String, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Detalhes do serviço", body = Service),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state
        .service_repo
        .find(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Serviço".into()))?;

    Ok((StatusCode::OK, Json(service)))
}

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Serviços",
    request_body = ServiceDetails,
    responses(
        (status = 201, description = "Serviço criado; devolve a lista atualizada", body = Vec<Service>),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Operador não autenticado")
    ),
    security(("operator_token" = []))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    _operator: OperatorSession,
    Json(mut payload): Json<ServiceDetails>,
) -> Result<impl IntoResponse, AppError> {
    payload.apply_input_masks();
    payload.validate()?;

    let services = app_state.service_repo.create(payload).await?;

    Ok((StatusCode::CREATED, Json(services)))
}

// PUT /api/services/{id}
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Serviços",
    request_body = ServiceDetails,
    params(("id" = String, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço atualizado; devolve a lista atualizada", body = Vec<Service>),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Operador não autenticado"),
        (status = 409, description = "Nenhum registro foi atualizado")
    ),
    security(("operator_token" = []))
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    _operator: OperatorSession,
    Path(id): Path<String>,
    Json(mut payload): Json<ServiceDetails>,
) -> Result<impl IntoResponse, AppError> {
    payload.apply_input_masks();
    payload.validate()?;

    let services = app_state
        .service_repo
        .update(Service { id, details: payload })
        .await?;

    Ok((StatusCode::OK, Json(services)))
}

// DELETE /api/services/{id}
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Serviços",
    params(("id" = String, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço excluído; devolve a lista atualizada", body = Vec<Service>),
        (status = 401, description = "Operador não autenticado"),
        (status = 409, description = "Nenhum registro foi excluído")
    ),
    security(("operator_token" = []))
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    _operator: OperatorSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state.service_repo.delete(&id).await?;

    Ok((StatusCode::OK, Json(services)))
}
