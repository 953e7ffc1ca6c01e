// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Todo erro que sai de um repositório ou serviço carrega uma mensagem legível.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Um ou mais campos são inválidos.")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    // O backend respondeu, mas recusou a operação (constraint, RLS, etc.)
    #[error("Erro no banco de dados remoto: {0}")]
    Backend(String),

    #[error("Falha de comunicação com o serviço remoto: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Resposta inesperada do serviço remoto: {0}")]
    MalformedResponse(String),

    // Sucesso de transporte, mas nenhuma linha afetada.
    #[error("Nenhum registro foi excluído. Verifique se você tem permissão ou se o item já foi removido.")]
    NothingDeleted,

    #[error("Nenhum registro foi atualizado. Verifique se você tem permissão ou se o item ainda existe.")]
    NothingUpdated,

    #[error("A operação afetou {0} registros, mas era esperado exatamente 1.")]
    UnexpectedRowCount(u64),

    #[error("{0} não encontrado(a).")]
    NotFound(String),

    #[error("Erro no armazenamento local: {0}")]
    Storage(String),

    #[error("Erro de serialização JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Acesso restrito a operadores autenticados.")]
    Unauthorized,

    #[error("Serviço não configurado: defina {0}.")]
    NotConfigured(&'static str),

    #[error("Falha no serviço externo: {0}")]
    ExternalService(String),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NothingDeleted
            | AppError::NothingUpdated
            | AppError::UnexpectedRowCount(_) => StatusCode::CONFLICT,
            AppError::Backend(_)
            | AppError::Transport(_)
            | AppError::MalformedResponse(_)
            | AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Storage(_)
            | AppError::Serialization(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": self.to_string(),
                "details": details,
            }));
            return (status, body).into_response();
        }

        if status.is_server_error() {
            tracing::error!("Erro ao processar requisição: {}", self);
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

// Erros do armazenamento local viram AppError::Storage com a descrição original.
macro_rules! storage_error_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for AppError {
                fn from(err: $source) -> Self {
                    AppError::Storage(err.to_string())
                }
            }
        )*
    };
}

storage_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
    std::io::Error,
);
