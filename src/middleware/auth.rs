// src/middleware/auth.rs

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{common::error::AppError, config::AppState};

// Extrator do operador "logado": só existe se a requisição trouxer
// `Authorization: Bearer <POPINFO_OPERATOR_TOKEN>`.
// Sem token configurado, nenhuma requisição é de operador.
#[derive(Debug, Clone, Copy)]
pub struct OperatorSession;

impl FromRequestParts<AppState> for OperatorSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.operator_token.as_deref() else {
            return Err(AppError::Unauthorized);
        };

        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        match presented {
            Some(token) if token == expected => Ok(OperatorSession),
            Some(_) => {
                tracing::warn!("Token de operador inválido");
                Err(AppError::Unauthorized)
            }
            None => Err(AppError::Unauthorized),
        }
    }
}
