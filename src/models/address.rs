// src/models/address.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// Endereço estruturado devolvido pela consulta de CEP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    #[schema(example = "01001-000")]
    pub zip: String,
    #[schema(example = "Praça da Sé")]
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    #[schema(example = "SP")]
    pub state: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StreetQuery {
    /// Parte do nome da rua (mais de 3 caracteres).
    pub street: String,
    /// Cidade; padrão "São Paulo".
    pub city: Option<String>,
    /// UF; padrão "SP".
    pub uf: Option<String>,
}
