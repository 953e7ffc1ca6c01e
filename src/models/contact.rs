// src/models/contact.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn validate_optional_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() || phone.chars().count() >= 10 {
        return Ok(());
    }
    let mut err = ValidationError::new("length");
    err.message = Some("Digite um telefone válido".into());
    Err(err)
}

// Mensagem do formulário "Fale conosco".
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactMessage {
    #[validate(length(min = 3, message = "O nome deve ter pelo menos 3 caracteres"))]
    pub nome: String,

    #[validate(email(message = "Digite um e-mail válido"))]
    pub email: String,

    #[validate(custom(function = "validate_optional_phone"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,

    #[validate(length(min = 1, message = "Por favor, selecione um assunto"))]
    pub assunto: String,

    #[validate(length(min = 10, message = "A mensagem deve ter pelo menos 10 caracteres"))]
    pub mensagem: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactReceipt {
    pub sent: bool,
    pub message: String,
}
