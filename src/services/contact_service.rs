// src/services/contact_service.rs

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use validator::Validate;

use crate::{common::error::AppError, models::contact::ContactMessage};

// Corpo aceito pelo endpoint AJAX do FormSubmit
#[derive(Debug, Serialize)]
struct Submission<'a> {
    nome: &'a str,
    email: &'a str,
    telefone: &'a str,
    assunto: &'a str,
    mensagem: &'a str,
    #[serde(rename = "_subject")]
    subject: String,
    #[serde(rename = "_captcha")]
    captcha: &'static str,
}

impl<'a> From<&'a ContactMessage> for Submission<'a> {
    fn from(m: &'a ContactMessage) -> Self {
        Self {
            nome: &m.nome,
            email: &m.email,
            telefone: m.telefone.as_deref().unwrap_or_default(),
            assunto: &m.assunto,
            mensagem: &m.mensagem,
            subject: format!("Contato • {}", m.assunto),
            captcha: "false",
        }
    }
}

#[derive(Clone)]
pub struct ContactService {
    http: Client,
    base_url: String,
    recipient: Option<String>,
}

impl ContactService {
    pub fn new(base_url: &str, recipient: Option<String>) -> Result<Self, AppError> {
        let http = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            recipient,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.recipient.is_some()
    }

    /// Valida e envia a mensagem do formulário de contato.
    pub async fn send(&self, message: &ContactMessage) -> Result<(), AppError> {
        message.validate()?;
        let recipient = self
            .recipient
            .as_deref()
            .ok_or(AppError::NotConfigured("CONTACT_EMAIL"))?;

        let response = self
            .http
            .post(format!("{}/ajax/{}", self.base_url, recipient))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&Submission::from(message))
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::error!("Envio do contato falhou com status {}", response.status());
            return Err(AppError::ExternalService("Erro no envio".into()));
        }

        tracing::info!("📨 Mensagem de contato enviada ({})", message.assunto);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_carries_subject_and_disables_captcha() {
        let message = ContactMessage {
            nome: "João".into(),
            email: "joao@exemplo.com".into(),
            telefone: None,
            assunto: "Parceria".into(),
            mensagem: "Gostaria de cadastrar um serviço.".into(),
        };
        let body = serde_json::to_value(Submission::from(&message)).unwrap();
        assert_eq!(body["_subject"], "Contato • Parceria");
        assert_eq!(body["_captcha"], "false");
        assert_eq!(body["telefone"], "");
        assert_eq!(body["nome"], "João");
    }

    #[tokio::test]
    async fn unconfigured_recipient_is_reported() {
        let service = ContactService::new("http://127.0.0.1:9", None).unwrap();
        let message = ContactMessage {
            nome: "Maria".into(),
            email: "maria@exemplo.com".into(),
            telefone: Some("(11) 91234-5678".into()),
            assunto: "Dúvida".into(),
            mensagem: "Como cadastro uma doação?".into(),
        };
        assert!(matches!(
            service.send(&message).await,
            Err(AppError::NotConfigured("CONTACT_EMAIL"))
        ));
    }
}
