// src/config/backend.rs

// Validação da configuração do backend remoto. Qualquer falha escolhe o modo
// local com um aviso no log; nunca é erro, a aplicação precisa funcionar offline.

use url::Url;

use crate::db::DataAccessMode;

pub const URL_PLACEHOLDER: &str = "YOUR_SUPABASE_URL";
pub const KEY_PLACEHOLDER: &str = "YOUR_SUPABASE_ANON_KEY";
const HOST_SUFFIX: &str = ".supabase.co";
const TOKEN_PREFIX: &str = "ey";

#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

impl BackendConfig {
    pub fn new(url: Option<String>, anon_key: Option<String>) -> Self {
        Self { url, anon_key }
    }

    /// URL e chave, se a configuração passar em todas as verificações.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let (Some(url), Some(key)) = (self.url.as_deref(), self.anon_key.as_deref()) else {
            tracing::warn!("⚠️ Backend remoto não configurado; usando armazenamento local");
            return None;
        };

        if url == URL_PLACEHOLDER || key == KEY_PLACEHOLDER {
            tracing::warn!("⚠️ Configuração do backend ainda com valores de exemplo; usando armazenamento local");
            return None;
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("⚠️ URL do backend inválida ({}); usando armazenamento local", e);
                return None;
            }
        };

        if parsed.scheme() != "https" {
            tracing::warn!(
                "⚠️ URL do backend precisa usar https (recebido '{}'); usando armazenamento local",
                parsed.scheme()
            );
            return None;
        }

        if !parsed.host_str().is_some_and(|host| host.ends_with(HOST_SUFFIX)) {
            tracing::warn!(
                "⚠️ Host do backend deve terminar em '{}'; usando armazenamento local",
                HOST_SUFFIX
            );
            return None;
        }

        if !key.starts_with(TOKEN_PREFIX) {
            tracing::warn!("⚠️ Chave do backend com formato inesperado; usando armazenamento local");
            return None;
        }

        Some((url, key))
    }

    pub fn resolve_mode(&self) -> DataAccessMode {
        match self.credentials() {
            Some(_) => DataAccessMode::Remote,
            None => DataAccessMode::Local,
        }
    }
}
