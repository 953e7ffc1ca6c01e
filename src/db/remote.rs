// src/db/remote.rs

// Cliente do backend remoto (tabelas hospedadas expostas via REST).
// Só o contrato CRUD é usado: listar por created_at desc, buscar por id,
// inserir, atualizar por id e excluir por id com contagem de linhas afetadas.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Services,
    Donations,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Services => "services",
            Table::Donations => "donations",
        }
    }
}

#[async_trait]
pub trait RemoteTable: Send + Sync {
    /// Todas as linhas, mais recentes primeiro (created_at desc).
    async fn select_all(&self, table: Table) -> Result<Vec<Value>, AppError>;

    async fn select_by_id(&self, table: Table, id: &str) -> Result<Option<Value>, AppError>;

    /// Insere uma linha; o backend atribui id e created_at.
    async fn insert(&self, table: Table, row: Value) -> Result<(), AppError>;

    /// Devolve quantas linhas foram atualizadas.
    async fn update_by_id(&self, table: Table, id: &str, row: Value) -> Result<u64, AppError>;

    /// Devolve quantas linhas foram excluídas.
    async fn delete_by_id(&self, table: Table, id: &str) -> Result<u64, AppError>;
}

/// Ids do backend são bigint; qualquer outra coisa nem chega a ser consultada.
pub fn is_backend_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) && id.parse::<i64>().is_ok()
}

/// Converte as linhas recebidas no tipo do registro; linhas malformadas são descartadas.
pub fn parse_rows<T: DeserializeOwned>(rows: Vec<Value>, origin: &str) -> Vec<T> {
    let total = rows.len();
    let parsed: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<T>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Linha {} de '{}' descartada (malformada): {}", index, origin, e);
                None
            }
        })
        .collect();

    if parsed.len() < total {
        tracing::warn!(
            "'{}': {} de {} linhas aceitas",
            origin,
            parsed.len(),
            total
        );
    }
    parsed
}

// --- Erro no formato devolvido pelo backend ---
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl BackendErrorBody {
    fn describe(self, status: reqwest::StatusCode) -> String {
        let mut text = self
            .message
            .unwrap_or_else(|| format!("status HTTP {}", status.as_u16()));
        if let Some(code) = self.code {
            text.push_str(&format!(" (código {code})"));
        }
        if let Some(details) = self.details.filter(|d| !d.is_empty()) {
            text.push_str(&format!(": {details}"));
        }
        if let Some(hint) = self.hint.filter(|h| !h.is_empty()) {
            text.push_str(&format!(" Dica: {hint}"));
        }
        text
    }
}

/// Extrai o total do cabeçalho `Content-Range` (`0-0/1`, `*/0`).
pub fn parse_content_range_count(value: &str) -> Option<u64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}

// --- Implementação HTTP ---
#[derive(Clone)]
pub struct PostgrestClient {
    http: Client,
    rest_url: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(project_url: &str, api_key: &str) -> Result<Self, AppError> {
        let http = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: Method, table: Table) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.rest_url, table.as_str()))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<BackendErrorBody>(&body) {
            Ok(parsed) => parsed.describe(status),
            Err(_) if body.is_empty() => format!("status HTTP {}", status.as_u16()),
            Err(_) => body,
        };
        Err(AppError::Backend(message))
    }

    fn affected_rows(response: &Response) -> Result<u64, AppError> {
        response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_count)
            .ok_or_else(|| {
                AppError::MalformedResponse("contagem de linhas ausente (Content-Range)".into())
            })
    }
}

#[async_trait]
impl RemoteTable for PostgrestClient {
    async fn select_all(&self, table: Table) -> Result<Vec<Value>, AppError> {
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        let rows = Self::check(response).await?.json::<Vec<Value>>().await?;
        Ok(rows)
    }

    async fn select_by_id(&self, table: Table, id: &str) -> Result<Option<Value>, AppError> {
        let filter = format!("eq.{id}");
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "*"), ("id", filter.as_str()), ("limit", "1")])
            .send()
            .await?;
        let rows = Self::check(response).await?.json::<Vec<Value>>().await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, table: Table, row: Value) -> Result<(), AppError> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_by_id(&self, table: Table, id: &str, row: Value) -> Result<u64, AppError> {
        let filter = format!("eq.{id}");
        let response = self
            .request(Method::PATCH, table)
            .query(&[("id", filter.as_str())])
            .header("Prefer", "return=minimal,count=exact")
            .json(&row)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Self::affected_rows(&response)
    }

    async fn delete_by_id(&self, table: Table, id: &str) -> Result<u64, AppError> {
        let filter = format!("eq.{id}");
        let response = self
            .request(Method::DELETE, table)
            .query(&[("id", filter.as_str())])
            .header("Prefer", "return=minimal,count=exact")
            .send()
            .await?;
        let response = Self::check(response).await?;
        Self::affected_rows(&response)
    }
}
