// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::db;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PopInfo API",
        description = "Serviços da rede socioassistencial e doações"
    ),
    paths(
        // --- Status ---
        handlers::status::health,
        handlers::status::status,

        // --- Serviços ---
        handlers::services::list_services,
        handlers::services::get_service,
        handlers::services::create_service,
        handlers::services::update_service,
        handlers::services::delete_service,

        // --- Doações ---
        handlers::donations::list_donations,
        handlers::donations::get_donation,
        handlers::donations::create_donation,
        handlers::donations::delete_donation,

        // --- Endereços ---
        handlers::address::lookup_cep,
        handlers::address::search_street,

        // --- Contato ---
        handlers::contact::send_contact,
    ),
    components(
        schemas(
            db::DataAccessMode,
            handlers::status::StatusResponse,

            models::service::ServiceType,
            models::service::ServiceDetails,
            models::service::Service,

            models::donation::DonationDetails,
            models::donation::DonationRecord,

            models::address::Address,

            models::contact::ContactMessage,
            models::contact::ContactReceipt,
        )
    ),
    tags(
        (name = "Status", description = "Saúde do servidor e modo de acesso a dados"),
        (name = "Serviços", description = "Equipamentos da rede socioassistencial"),
        (name = "Doações", description = "Ofertas de doação"),
        (name = "Endereços", description = "Autocompletar de endereço por CEP ou rua"),
        (name = "Contato", description = "Formulário Fale Conosco")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "operator_token",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/services",
            "/api/services/{id}",
            "/api/donations",
            "/api/donations/{id}",
            "/api/address/cep/{cep}",
            "/api/address/search",
            "/api/contact",
            "/api/status",
        ] {
            assert!(doc.paths.get_path_item(path).is_some(), "faltou {path}");
        }
        let schemes = doc.components.unwrap().security_schemes;
        assert!(schemes.contains_key("operator_token"));
    }
}
