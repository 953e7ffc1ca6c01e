// src/handlers/contact.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::contact::{ContactMessage, ContactReceipt},
};

// POST /api/contact
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contato",
    request_body = ContactMessage,
    responses(
        (status = 200, description = "Mensagem enviada", body = ContactReceipt),
        (status = 400, description = "Dados inválidos"),
        (status = 502, description = "Falha no serviço de envio"),
        (status = 503, description = "Destinatário não configurado")
    )
)]
pub async fn send_contact(
    State(app_state): State<AppState>,
    Json(payload): Json<ContactMessage>,
) -> Result<impl IntoResponse, AppError> {
    app_state.contact_service.send(&payload).await?;

    let receipt = ContactReceipt {
        sent: true,
        message: "Mensagem enviada com sucesso! Entraremos em contato em breve.".into(),
    };
    Ok((StatusCode::OK, Json(receipt)))
}
