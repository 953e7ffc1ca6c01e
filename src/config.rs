// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use crate::{
    db::{
        DataAccessMode, DataSource, DonationRepository, LocalStore, PostgrestClient,
        ServiceRepository,
    },
    services::{address_lookup::AddressLookup, contact_service::ContactService},
};

pub mod backend;
pub use backend::BackendConfig;

const DEFAULT_DATA_DIR: &str = "popinfo_data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_VIACEP_URL: &str = "https://viacep.com.br";
const DEFAULT_FORMSUBMIT_URL: &str = "https://formsubmit.co";

// --- Configuração lida uma vez na inicialização ---
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: BackendConfig,
    pub data_dir: PathBuf,
    pub bind_addr: String,
    pub operator_token: Option<String>,
    pub contact_email: Option<String>,
    pub viacep_url: String,
    pub formsubmit_url: String,
}

impl Settings {
    /// Lê das variáveis de ambiente (o `.env` já deve ter sido carregado).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte de chaves; valores vazios contam como ausentes.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            backend: BackendConfig::new(
                get("SUPABASE_URL").or_else(|| get("VITE_SUPABASE_URL")),
                get("SUPABASE_ANON_KEY").or_else(|| get("VITE_SUPABASE_ANON_KEY")),
            ),
            data_dir: PathBuf::from(get_or("POPINFO_DATA_DIR", DEFAULT_DATA_DIR)),
            bind_addr: get_or("POPINFO_BIND_ADDR", DEFAULT_BIND_ADDR),
            operator_token: get("POPINFO_OPERATOR_TOKEN"),
            contact_email: get("CONTACT_EMAIL"),
            viacep_url: get_or("VIACEP_URL", DEFAULT_VIACEP_URL),
            formsubmit_url: get_or("FORMSUBMIT_URL", DEFAULT_FORMSUBMIT_URL),
        }
    }
}

// O estado compartilhado, montado uma vez e clonado para cada handler
#[derive(Clone)]
pub struct AppState {
    pub mode: DataAccessMode,
    pub service_repo: ServiceRepository,
    pub donation_repo: DonationRepository,
    pub address_lookup: AddressLookup,
    pub contact_service: ContactService,
    pub operator_token: Option<String>,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // O modo é decidido aqui e não é reavaliado depois.
        let source = match settings.backend.credentials() {
            Some((url, key)) => DataSource::Remote(Arc::new(PostgrestClient::new(url, key)?)),
            None => DataSource::Local(LocalStore::open(&settings.data_dir)?),
        };
        Self::with_source(settings, source).await
    }

    /// Monta o estado sobre uma fonte de dados já resolvida.
    pub async fn with_source(settings: &Settings, source: DataSource) -> anyhow::Result<Self> {
        let mode = source.mode();
        tracing::info!("✅ Modo de acesso a dados: {:?}", mode);

        // --- Monta o gráfico de dependências ---
        let service_repo = ServiceRepository::new(source.clone());
        let donation_repo = DonationRepository::new(source);
        let address_lookup = AddressLookup::new(&settings.viacep_url)?;
        let contact_service =
            ContactService::new(&settings.formsubmit_url, settings.contact_email.clone())?;

        if settings.operator_token.is_none() {
            tracing::warn!("⚠️ POPINFO_OPERATOR_TOKEN ausente: alterações estão desabilitadas");
        }

        // Carrega a lista inicial de doações (base da busca).
        let initial = donation_repo.list().await;
        tracing::info!("📋 {} doações carregadas", initial.len());

        Ok(Self {
            mode,
            service_repo,
            donation_repo,
            address_lookup,
            contact_service,
            operator_token: settings.operator_token.clone(),
        })
    }
}
