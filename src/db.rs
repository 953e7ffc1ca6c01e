// src/db.rs

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::common::error::AppError;

pub mod local_store;
pub use local_store::LocalStore;
pub mod remote;
pub use remote::{PostgrestClient, RemoteTable, Table};
pub mod memory_table;
pub use memory_table::InMemoryTable;
pub mod migration;
pub mod service_repo;
pub use service_repo::ServiceRepository;
pub mod donation_repo;
pub use donation_repo::DonationRepository;

// Modo de acesso decidido uma única vez na inicialização.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataAccessMode {
    Remote,
    Local,
}

// Estratégia injetada nos repositórios; nenhum repositório reavalia a configuração.
#[derive(Clone)]
pub enum DataSource {
    Remote(Arc<dyn RemoteTable>),
    Local(LocalStore),
}

impl DataSource {
    pub fn mode(&self) -> DataAccessMode {
        match self {
            DataSource::Remote(_) => DataAccessMode::Remote,
            DataSource::Local(_) => DataAccessMode::Local,
        }
    }
}

/// Id local derivado do relógio (ms), incrementado até não colidir.
pub(crate) fn local_timestamp_id(is_taken: impl Fn(i64) -> bool) -> i64 {
    let mut id = chrono::Utc::now().timestamp_millis();
    while is_taken(id) {
        id += 1;
    }
    id
}

/// Exclusão/atualização remota precisa afetar exatamente uma linha.
pub(crate) fn expect_single_row(count: u64, on_zero: AppError) -> Result<(), AppError> {
    match count {
        1 => Ok(()),
        0 => Err(on_zero),
        n => Err(AppError::UnexpectedRowCount(n)),
    }
}
