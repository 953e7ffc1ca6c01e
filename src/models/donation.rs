// src/models/donation.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::common::{
    format::{contains_ignore_case, format_phone, format_zip, is_formatted_zip, normalize_hours},
    json_utils::{free_text, optional_free_text, optional_numeric_id},
};
use crate::models::service::validate_hours;

fn validate_cep(zip: &str) -> Result<(), ValidationError> {
    if is_formatted_zip(zip) {
        return Ok(());
    }
    let mut err = ValidationError::new("zip_format");
    err.message = Some("CEP inválido".into());
    Err(err)
}

// --- Campos de uma doação ---
// Formato camelCase do armazenamento local. As colunas snake_case do backend
// (contato_email / contato_telefone) são aceitas como alias na leitura.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationDetails {
    #[validate(length(min = 3, message = "O título deve ter pelo menos 3 caracteres"))]
    #[serde(default, deserialize_with = "free_text")]
    #[schema(example = "Cadeira de rodas adulto")]
    pub titulo: String,

    #[validate(length(min = 10, message = "A descrição deve ter pelo menos 10 caracteres"))]
    #[serde(default, deserialize_with = "free_text")]
    pub descricao: String,

    #[validate(length(min = 1, message = "Informe a categoria"))]
    #[serde(default, deserialize_with = "free_text")]
    pub categoria: String,

    // Texto livre; às vezes chega como número.
    #[validate(length(min = 1, message = "Informe a quantidade"))]
    #[serde(default, deserialize_with = "free_text")]
    #[schema(example = "1 unidade")]
    pub quantidade: String,

    // Legado: local em texto único, mantido só por compatibilidade.
    #[serde(
        default,
        deserialize_with = "optional_free_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub local: Option<String>,

    #[validate(length(min = 3, message = "Endereço obrigatório"))]
    #[serde(default, deserialize_with = "free_text")]
    pub address: String,

    #[validate(length(min = 1, message = "Número obrigatório"))]
    #[serde(default, deserialize_with = "free_text")]
    pub number: String,

    #[serde(
        default,
        deserialize_with = "optional_free_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub complement: Option<String>,

    #[validate(length(min = 1, message = "Bairro obrigatório"))]
    #[serde(default, deserialize_with = "free_text")]
    pub neighborhood: String,

    #[validate(length(min = 1, message = "Cidade obrigatória"))]
    #[serde(default, deserialize_with = "free_text")]
    pub city: String,

    #[validate(custom(function = "validate_cep"))]
    #[serde(default, deserialize_with = "free_text")]
    #[schema(example = "04009-000")]
    pub zip: String,

    #[validate(custom(function = "validate_hours"))]
    #[serde(default, deserialize_with = "free_text")]
    #[schema(example = "09:00 às 18:00")]
    pub hours: String,

    #[validate(email(message = "Informe um e-mail válido"))]
    #[serde(default, alias = "contato_email", deserialize_with = "free_text")]
    pub contato_email: String,

    #[validate(length(min = 10, message = "Informe um telefone válido"))]
    #[serde(default, alias = "contato_telefone", deserialize_with = "free_text")]
    #[schema(example = "(11) 90000-0000")]
    pub contato_telefone: String,
}

impl DonationDetails {
    /// Aplica as máscaras do formulário antes da validação.
    pub fn apply_input_masks(&mut self) {
        if !self.contato_telefone.is_empty() {
            self.contato_telefone = format_phone(&self.contato_telefone);
        }
        self.zip = format_zip(&self.zip);
        self.hours = normalize_hours(&self.hours);
    }

    /// Busca OR entre os campos; `needle` já em minúsculas.
    pub fn mentions(&self, needle: &str) -> bool {
        contains_ignore_case(&self.titulo, needle)
            || contains_ignore_case(&self.descricao, needle)
            || contains_ignore_case(&self.categoria, needle)
            || self
                .local
                .as_deref()
                .is_some_and(|local| contains_ignore_case(local, needle))
            || contains_ignore_case(&self.address, needle)
            || contains_ignore_case(&self.neighborhood, needle)
            || contains_ignore_case(&self.city, needle)
    }
}

// --- Doação com identidade numérica ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DonationRecord {
    #[schema(example = 1737400000000_i64)]
    pub id: i64,

    #[serde(flatten)]
    pub details: DonationDetails,
}

// --- Doação como pode estar gravada localmente (versões antigas sem id) ---
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StoredDonation {
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub id: Option<i64>,

    #[serde(flatten)]
    pub details: DonationDetails,
}

// --- Linha enviada ao backend no insert (nomes de coluna snake_case) ---
#[derive(Debug, Serialize)]
pub struct DonationInsertRow<'a> {
    pub titulo: &'a str,
    pub descricao: &'a str,
    pub categoria: &'a str,
    pub quantidade: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<&'a str>,
    pub address: &'a str,
    pub number: &'a str,
    pub complement: Option<&'a str>,
    pub neighborhood: &'a str,
    pub city: &'a str,
    pub zip: &'a str,
    pub hours: &'a str,
    pub contato_email: &'a str,
    pub contato_telefone: &'a str,
}

impl<'a> From<&'a DonationDetails> for DonationInsertRow<'a> {
    fn from(d: &'a DonationDetails) -> Self {
        Self {
            titulo: &d.titulo,
            descricao: &d.descricao,
            categoria: &d.categoria,
            quantidade: &d.quantidade,
            local: d.local.as_deref(),
            address: &d.address,
            number: &d.number,
            complement: d.complement.as_deref(),
            neighborhood: &d.neighborhood,
            city: &d.city,
            zip: &d.zip,
            hours: &d.hours,
            contato_email: &d.contato_email,
            contato_telefone: &d.contato_telefone,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DonationQuery {
    /// Busca por título, descrição, categoria ou local.
    pub q: Option<String>,
}

/// Filtro em memória: vazio devolve a lista inteira na mesma ordem.
pub fn filter_donations(donations: &[DonationRecord], query: &str) -> Vec<DonationRecord> {
    if query.is_empty() {
        return donations.to_vec();
    }
    let needle = query.to_lowercase();
    donations
        .iter()
        .filter(|d| d.details.mentions(&needle))
        .cloned()
        .collect()
}
