// src/db/service_repo.rs

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    common::error::AppError,
    db::{
        expect_single_row,
        local_store::{LocalStore, SERVICES_KEY},
        local_timestamp_id,
        remote::{is_backend_id, parse_rows, RemoteTable, Table},
        DataAccessMode, DataSource,
    },
    models::service::{Service, ServiceDetails, ServiceFilter},
};

#[derive(Clone)]
pub struct ServiceRepository {
    source: DataSource,
    // Serializa leitura-modificação-escrita no armazenamento local.
    write_lock: Arc<Mutex<()>>,
}

impl ServiceRepository {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn mode(&self) -> DataAccessMode {
        self.source.mode()
    }

    /// Lista completa. Remoto: mais recentes primeiro. Falha remota vira lista vazia.
    pub async fn list(&self) -> Vec<Service> {
        match &self.source {
            DataSource::Remote(remote) => match remote.select_all(Table::Services).await {
                Ok(rows) => parse_rows(rows, Table::Services.as_str()),
                Err(e) => {
                    tracing::error!("Erro ao buscar serviços: {}", e);
                    Vec::new()
                }
            },
            DataSource::Local(store) => load_local(store),
        }
    }

    /// Busca pelo id no modo atual. Ausência não é erro.
    pub async fn find(&self, id: &str) -> Result<Option<Service>, AppError> {
        match &self.source {
            DataSource::Remote(_) if !is_backend_id(id) => Ok(None),
            DataSource::Remote(remote) => {
                let row = remote
                    .select_by_id(Table::Services, id)
                    .await
                    .inspect_err(|e| tracing::error!("Erro ao buscar serviço {}: {}", id, e))?;
                Ok(row.and_then(|row| parse_rows(vec![row], Table::Services.as_str()).pop()))
            }
            DataSource::Local(store) => Ok(load_local(store).into_iter().find(|s| s.id == id)),
        }
    }

    pub async fn search(&self, filter: &ServiceFilter) -> Vec<Service> {
        self.list()
            .await
            .into_iter()
            .filter(|service| filter.matches(service))
            .collect()
    }

    /// Cria o serviço e devolve a lista atualizada.
    pub async fn create(&self, details: ServiceDetails) -> Result<Vec<Service>, AppError> {
        match &self.source {
            DataSource::Remote(remote) => {
                // O corpo não tem `id`: a identidade é sempre do backend.
                let row = serde_json::to_value(&details)?;
                remote
                    .insert(Table::Services, row)
                    .await
                    .inspect_err(|e| tracing::error!("Erro ao criar serviço: {}", e))?;
                tracing::info!("✅ Serviço '{}' criado no backend", details.name);
                Ok(self.list().await)
            }
            DataSource::Local(store) => {
                let _guard = self.write_lock.lock().await;
                let mut services = load_local(store);
                let id = local_timestamp_id(|candidate| {
                    let candidate = candidate.to_string();
                    services.iter().any(|s| s.id == candidate)
                })
                .to_string();
                tracing::info!("✅ Serviço '{}' criado localmente (id {})", details.name, id);
                services.push(Service { id, details });
                store.save_collection(SERVICES_KEY, &services);
                Ok(services)
            }
        }
    }

    /// Substitui os campos do serviço com o mesmo id.
    pub async fn update(&self, service: Service) -> Result<Vec<Service>, AppError> {
        match &self.source {
            DataSource::Remote(_) if !is_backend_id(&service.id) => {
                Err(AppError::NothingUpdated)
            }
            DataSource::Remote(remote) => {
                let row = serde_json::to_value(&service.details)?;
                let count = remote
                    .update_by_id(Table::Services, &service.id, row)
                    .await
                    .inspect_err(|e| tracing::error!("Erro ao atualizar serviço: {}", e))?;
                expect_single_row(count, AppError::NothingUpdated)?;
                Ok(self.list().await)
            }
            DataSource::Local(store) => {
                let _guard = self.write_lock.lock().await;
                let mut services = load_local(store);
                let slot = services
                    .iter_mut()
                    .find(|s| s.id == service.id)
                    .ok_or(AppError::NothingUpdated)?;
                *slot = service;
                store.save_collection(SERVICES_KEY, &services);
                Ok(services)
            }
        }
    }

    /// Exclusão física. No backend exige exatamente uma linha afetada.
    pub async fn delete(&self, id: &str) -> Result<Vec<Service>, AppError> {
        match &self.source {
            DataSource::Remote(_) if !is_backend_id(id) => Err(AppError::NothingDeleted),
            DataSource::Remote(remote) => {
                let count = remote
                    .delete_by_id(Table::Services, id)
                    .await
                    .inspect_err(|e| tracing::error!("Erro ao excluir serviço {}: {}", id, e))?;
                expect_single_row(count, AppError::NothingDeleted)
                    .inspect_err(|e| tracing::warn!("Exclusão do serviço {}: {}", id, e))?;
                tracing::info!("🗑️ Serviço {} excluído", id);
                Ok(self.list().await)
            }
            DataSource::Local(store) => {
                let _guard = self.write_lock.lock().await;
                let mut services = load_local(store);
                services.retain(|s| s.id != id);
                store.save_collection(SERVICES_KEY, &services);
                Ok(services)
            }
        }
    }
}

fn load_local(store: &LocalStore) -> Vec<Service> {
    parse_rows(store.load_collection(SERVICES_KEY), SERVICES_KEY)
}
