// src/models/service.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::common::{
    format::{
        contains_ignore_case, format_phone, format_zip, is_formatted_phone, is_formatted_zip,
        normalize_hours, OpeningHours,
    },
    json_utils::{free_text, optional_free_text, string_or_number, text_list},
};

// --- Tipos de equipamento da rede socioassistencial ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum ServiceType {
    #[serde(rename = "CAPS")]
    Caps,
    #[serde(rename = "CRAS")]
    Cras,
    #[serde(rename = "CREAS")]
    Creas,
    #[serde(rename = "C.A / CTA", alias = "C.A/CTA")]
    CentroAcolhida,
    #[serde(rename = "Saúde")]
    Saude,
    #[serde(rename = "Alimentação")]
    Alimentacao,
    #[serde(rename = "Trabalho")]
    Trabalho,
    #[default]
    #[serde(rename = "Outro")]
    Outro,
}

impl ServiceType {
    pub const ALL: [ServiceType; 8] = [
        ServiceType::Caps,
        ServiceType::Cras,
        ServiceType::Creas,
        ServiceType::CentroAcolhida,
        ServiceType::Saude,
        ServiceType::Alimentacao,
        ServiceType::Trabalho,
        ServiceType::Outro,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Caps => "CAPS",
            ServiceType::Cras => "CRAS",
            ServiceType::Creas => "CREAS",
            ServiceType::CentroAcolhida => "C.A / CTA",
            ServiceType::Saude => "Saúde",
            ServiceType::Alimentacao => "Alimentação",
            ServiceType::Trabalho => "Trabalho",
            ServiceType::Outro => "Outro",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label == "C.A/CTA" {
            return Some(ServiceType::CentroAcolhida);
        }
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

fn validate_service_phone(phone: &str) -> Result<(), ValidationError> {
    if is_formatted_phone(phone) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone_format");
    err.message = Some("Telefone deve ser no formato (xx) xxxxx-xxxx ou (xx) xxxx-xxxx".into());
    Err(err)
}

fn validate_optional_zip(zip: &str) -> Result<(), ValidationError> {
    if zip.is_empty() || is_formatted_zip(zip) {
        return Ok(());
    }
    let mut err = ValidationError::new("zip_format");
    err.message = Some("CEP deve ser no formato xxxxx-xxx".into());
    Err(err)
}

pub(crate) fn validate_hours(hours: &str) -> Result<(), ValidationError> {
    if hours.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Horário obrigatório".into());
        return Err(err);
    }
    if OpeningHours::parse(hours).is_incomplete_range() {
        let mut err = ValidationError::new("incomplete_schedule");
        err.message =
            Some("Por favor, informe tanto o horário de abertura quanto o de fechamento".into());
        return Err(err);
    }
    Ok(())
}

// --- Campos de um serviço (tudo menos a identidade) ---
// É o corpo enviado ao backend no insert/update e o payload dos formulários.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ServiceDetails {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[serde(default, deserialize_with = "free_text")]
    #[schema(example = "CRAS Sé")]
    pub name: String,

    #[serde(rename = "type")]
    pub service_type: ServiceType,

    #[serde(default, deserialize_with = "free_text")]
    #[schema(example = "Rua Maria Paula")]
    pub address: String,

    #[serde(default, deserialize_with = "free_text")]
    pub number: String,

    #[serde(
        default,
        deserialize_with = "optional_free_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub complement: Option<String>,

    #[serde(default, deserialize_with = "free_text")]
    pub neighborhood: String,

    #[serde(default, deserialize_with = "free_text")]
    pub city: String,

    #[validate(custom(function = "validate_optional_zip"))]
    #[serde(default, deserialize_with = "free_text")]
    #[schema(example = "01001-000")]
    pub zip: String,

    #[validate(custom(function = "validate_service_phone"))]
    #[serde(default, deserialize_with = "free_text")]
    #[schema(example = "(11) 3333-4444")]
    pub phone: String,

    #[serde(default, deserialize_with = "free_text")]
    pub email: String,

    #[validate(custom(function = "validate_hours"))]
    #[serde(default, deserialize_with = "free_text")]
    #[schema(example = "08:00 às 17:00")]
    pub hours: String,

    #[serde(default, deserialize_with = "free_text")]
    pub description: String,

    #[serde(default, deserialize_with = "text_list")]
    pub services_offered: Vec<String>,
}

impl ServiceDetails {
    /// Aplica as máscaras do formulário antes da validação.
    pub fn apply_input_masks(&mut self) {
        if !self.phone.is_empty() {
            self.phone = format_phone(&self.phone);
        }
        if !self.zip.is_empty() {
            self.zip = format_zip(&self.zip);
        }
        self.hours = normalize_hours(&self.hours);
    }
}

// --- Serviço com identidade ---
// O id vem do backend (muitas vezes numérico) ou do relógio quando criado localmente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    #[serde(deserialize_with = "string_or_number")]
    #[schema(example = "1737400000000")]
    pub id: String,

    #[serde(flatten)]
    pub details: ServiceDetails,
}

// --- Filtro da listagem pública ---
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceQuery {
    /// Busca por nome, bairro ou serviço oferecido.
    pub q: Option<String>,

    /// Tipo do equipamento; "Todos" ou ausente não filtra.
    #[serde(rename = "type")]
    pub service_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFilter {
    pub query: String,
    pub service_type: Option<ServiceType>,
}

impl ServiceFilter {
    pub fn matches(&self, service: &Service) -> bool {
        let details = &service.details;
        let q = self.query.trim().to_lowercase();

        let matches_search = q.is_empty()
            || contains_ignore_case(&details.name, &q)
            || contains_ignore_case(&details.neighborhood, &q)
            || details
                .services_offered
                .iter()
                .any(|s| contains_ignore_case(s, &q));

        let matches_type = self
            .service_type
            .is_none_or(|wanted| details.service_type == wanted);

        matches_search && matches_type
    }
}

impl TryFrom<ServiceQuery> for ServiceFilter {
    type Error = String;

    fn try_from(query: ServiceQuery) -> Result<Self, Self::Error> {
        let service_type = match query.service_type.as_deref().map(str::trim) {
            None | Some("") | Some("Todos") => None,
            Some(label) => Some(
                ServiceType::from_label(label)
                    .ok_or_else(|| format!("tipo de serviço desconhecido: {label}"))?,
            ),
        };

        Ok(Self {
            query: query.q.unwrap_or_default(),
            service_type,
        })
    }
}
