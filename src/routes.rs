// src/routes.rs

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    // Leitura pública; alterações exigem operador (extrator OperatorSession nos handlers)
    let service_routes = Router::new()
        .route(
            "/api/services",
            get(handlers::services::list_services).post(handlers::services::create_service),
        )
        .route(
            "/api/services/{id}",
            get(handlers::services::get_service)
                .put(handlers::services::update_service)
                .delete(handlers::services::delete_service),
        );

    let donation_routes = Router::new()
        .route(
            "/api/donations",
            get(handlers::donations::list_donations).post(handlers::donations::create_donation),
        )
        .route(
            "/api/donations/{id}",
            get(handlers::donations::get_donation).delete(handlers::donations::delete_donation),
        );

    let address_routes = Router::new()
        .route("/api/address/cep/{cep}", get(handlers::address::lookup_cep))
        .route("/api/address/search", get(handlers::address::search_street));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(handlers::status::health))
        .route("/api/status", get(handlers::status::status))
        .route("/api/contact", post(handlers::contact::send_contact))
        .merge(service_routes)
        .merge(donation_routes)
        .merge(address_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(app_state)
}
