// src/services/address_lookup.rs

// Autocompletar de endereço via ViaCEP. Tudo aqui é "melhor esforço":
// falhas são registradas e viram ausência de resultado, nunca erro.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    common::{error::AppError, format::zip_digits},
    models::address::Address,
};

pub const DEFAULT_UF: &str = "SP";
pub const DEFAULT_CITY: &str = "São Paulo";
const MIN_STREET_CHARS: usize = 3;

// Formato da resposta do ViaCEP
#[derive(Debug, Deserialize)]
struct ViaCepAddress {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    // `true` ou `"true"` quando o CEP não existe
    #[serde(default)]
    erro: Option<Value>,
}

impl ViaCepAddress {
    fn not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag == "true",
            _ => false,
        }
    }
}

impl From<ViaCepAddress> for Address {
    fn from(v: ViaCepAddress) -> Self {
        Self {
            zip: v.cep,
            street: v.logradouro,
            neighborhood: v.bairro,
            city: v.localidade,
            state: v.uf,
        }
    }
}

#[derive(Clone)]
pub struct AddressLookup {
    http: Client,
    base_url: Url,
}

impl AddressLookup {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::BadRequest(format!("URL do ViaCEP inválida: {e}")))?;
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("ws")
            .extend(segments)
            .push("json")
            // barra final, como a API documenta
            .push("");
        Some(url)
    }

    async fn fetch(&self, url: Url) -> Option<Value> {
        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Erro ao consultar {}: {}", url, e);
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!("Consulta de endereço respondeu {} para {}", response.status(), url);
            return None;
        }
        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!("Resposta ilegível de {}: {}", url, e);
                None
            }
        }
    }

    /// Endereço de um CEP. Só CEPs com 8 dígitos são consultados.
    pub async fn lookup_cep(&self, cep: &str) -> Option<Address> {
        let digits = zip_digits(cep);
        if digits.len() != 8 {
            return None;
        }

        let body = self.fetch(self.endpoint(&[&digits])?).await?;
        match serde_json::from_value::<ViaCepAddress>(body) {
            Ok(found) if found.not_found() => {
                tracing::info!("CEP {} não encontrado", digits);
                None
            }
            Ok(found) => Some(found.into()),
            Err(e) => {
                tracing::error!("Resposta inesperada para o CEP {}: {}", digits, e);
                None
            }
        }
    }

    /// Candidatos para um trecho de nome de rua (mais de 3 caracteres).
    pub async fn search_street(
        &self,
        uf: Option<&str>,
        city: Option<&str>,
        street: &str,
    ) -> Vec<Address> {
        let street = street.trim();
        if street.chars().count() <= MIN_STREET_CHARS {
            return Vec::new();
        }
        let uf = uf.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_UF);
        let city = city.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_CITY);

        let Some(url) = self.endpoint(&[uf, city, street]) else {
            return Vec::new();
        };
        match self.fetch(url).await {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<ViaCepAddress>(item).ok())
                .filter(|item| !item.not_found())
                .map(Address::from)
                .collect(),
            Some(_) => {
                tracing::warn!("Busca por rua '{}' não devolveu uma lista", street);
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}
