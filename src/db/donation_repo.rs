// src/db/donation_repo.rs

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    common::error::AppError,
    db::{
        expect_single_row,
        local_store::{LocalStore, DONATIONS_KEY},
        local_timestamp_id,
        migration::{migrate_donations, DONATION_CONTACT_EMAIL},
        remote::{parse_rows, RemoteTable, Table},
        DataAccessMode, DataSource,
    },
    models::donation::{
        filter_donations, DonationDetails, DonationInsertRow, DonationRecord, StoredDonation,
    },
};

#[derive(Clone)]
pub struct DonationRepository {
    source: DataSource,
    // Última lista obtida; base da busca em memória.
    current: Arc<RwLock<Vec<DonationRecord>>>,
    write_lock: Arc<Mutex<()>>,
}

impl DonationRepository {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            current: Arc::new(RwLock::new(Vec::new())),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn mode(&self) -> DataAccessMode {
        self.source.mode()
    }

    /// Recarrega a lista (mais recentes primeiro). Falha remota: lista vazia,
    /// também para a busca.
    pub async fn list(&self) -> Vec<DonationRecord> {
        let donations = match &self.source {
            DataSource::Remote(remote) => match remote.select_all(Table::Donations).await {
                Ok(rows) => from_remote_rows(rows),
                Err(e) => {
                    tracing::error!("Erro ao buscar doações: {}", e);
                    Vec::new()
                }
            },
            DataSource::Local(store) => {
                let _guard = self.write_lock.lock().await;
                load_local(store)
            }
        };
        self.replace_current(donations).await
    }

    /// Filtra a lista atual; consulta vazia devolve a lista inteira.
    pub async fn search(&self, query: &str) -> Vec<DonationRecord> {
        filter_donations(&self.current.read().await, query)
    }

    /// Procura na lista atual; se não achar, recarrega uma vez.
    pub async fn find(&self, id: i64) -> Option<DonationRecord> {
        if let Some(found) = self.current.read().await.iter().find(|d| d.id == id) {
            return Some(found.clone());
        }
        self.list().await.into_iter().find(|d| d.id == id)
    }

    /// Cria a doação e devolve a lista atualizada.
    pub async fn create(&self, details: DonationDetails) -> Result<Vec<DonationRecord>, AppError> {
        match &self.source {
            DataSource::Remote(remote) => {
                let row = serde_json::to_value(DonationInsertRow::from(&details))?;
                remote
                    .insert(Table::Donations, row)
                    .await
                    .inspect_err(|e| tracing::error!("Erro ao adicionar doação: {}", e))?;
                tracing::info!("✅ Doação '{}' cadastrada no backend", details.titulo);
                Ok(self.list().await)
            }
            DataSource::Local(store) => {
                let _guard = self.write_lock.lock().await;
                let mut donations = load_local(store);
                let id = local_timestamp_id(|candidate| donations.iter().any(|d| d.id == candidate));
                tracing::info!("✅ Doação '{}' cadastrada localmente (id {})", details.titulo, id);
                donations.insert(0, DonationRecord { id, details });
                store.save_collection(DONATIONS_KEY, &donations);
                Ok(self.replace_current(donations).await)
            }
        }
    }

    /// Exclusão por id. No backend exige exatamente uma linha afetada.
    pub async fn delete(&self, id: i64) -> Result<Vec<DonationRecord>, AppError> {
        match &self.source {
            DataSource::Remote(remote) => {
                let count = remote
                    .delete_by_id(Table::Donations, &id.to_string())
                    .await
                    .inspect_err(|e| tracing::error!("Erro ao excluir doação {}: {}", id, e))?;
                expect_single_row(count, AppError::NothingDeleted)
                    .inspect_err(|e| tracing::warn!("Exclusão da doação {}: {}", id, e))?;
                tracing::info!("🗑️ Doação {} excluída", id);
                Ok(self.list().await)
            }
            DataSource::Local(store) => {
                let _guard = self.write_lock.lock().await;
                let mut donations = load_local(store);
                donations.retain(|d| d.id != id);
                store.save_collection(DONATIONS_KEY, &donations);
                Ok(self.replace_current(donations).await)
            }
        }
    }

    async fn replace_current(&self, donations: Vec<DonationRecord>) -> Vec<DonationRecord> {
        *self.current.write().await = donations.clone();
        donations
    }
}

// Linhas do backend: endereço ausente cai para o `local` legado.
fn from_remote_rows(rows: Vec<serde_json::Value>) -> Vec<DonationRecord> {
    parse_rows::<DonationRecord>(rows, Table::Donations.as_str())
        .into_iter()
        .map(|mut record| {
            if record.details.address.is_empty() {
                if let Some(local) = &record.details.local {
                    record.details.address = local.clone();
                }
            }
            record
        })
        .collect()
}

// Leitura local: migra, regrava se algo mudou e semeia exemplos no primeiro uso.
// Chamar com `write_lock` adquirido.
fn load_local(store: &LocalStore) -> Vec<DonationRecord> {
    let never_written = matches!(store.get_item(DONATIONS_KEY), Ok(None));
    if never_written {
        let samples = sample_donations();
        store.save_collection(DONATIONS_KEY, &samples);
        tracing::info!("🌱 {} doações de exemplo criadas", samples.len());
        return samples;
    }

    let stored: Vec<StoredDonation> = parse_rows(store.load_collection(DONATIONS_KEY), DONATIONS_KEY);
    let outcome = migrate_donations(stored, chrono::Utc::now().timestamp_millis());
    if outcome.dirty {
        store.save_collection(DONATIONS_KEY, &outcome.donations);
        tracing::info!("🔧 Doações locais migradas para o formato atual");
    }
    outcome.donations
}

/// Conteúdo de exemplo do primeiro uso no modo local.
pub fn sample_donations() -> Vec<DonationRecord> {
    vec![
        DonationRecord {
            id: 1,
            details: DonationDetails {
                titulo: "Cadeira de rodas adulto".into(),
                descricao: "Cadeira de rodas em bom estado, ideal para adultos. Entrega combinada."
                    .into(),
                categoria: "Cadeira de rodas".into(),
                quantidade: "1 unidade".into(),
                local: Some("Vila Mariana, São Paulo".into()),
                address: "Rua Domingos de Morais".into(),
                number: "2000".into(),
                complement: None,
                neighborhood: "Vila Mariana".into(),
                city: "São Paulo".into(),
                zip: "04009-000".into(),
                hours: "09:00 às 18:00".into(),
                contato_email: DONATION_CONTACT_EMAIL.into(),
                contato_telefone: "(11) 90000-0000".into(),
            },
        },
        DonationRecord {
            id: 2,
            details: DonationDetails {
                titulo: "Muletas tamanho M".into(),
                descricao: "Par de muletas com regulagem, tamanho M. Retirada no local.".into(),
                categoria: "Muletas".into(),
                quantidade: "2 unidades".into(),
                local: Some("Centro, São Paulo".into()),
                address: "Praça da Sé".into(),
                number: "10".into(),
                complement: None,
                neighborhood: "Centro".into(),
                city: "São Paulo".into(),
                zip: "01001-000".into(),
                hours: "10:00 às 16:00".into(),
                contato_email: DONATION_CONTACT_EMAIL.into(),
                contato_telefone: "(11) 98888-8888".into(),
            },
        },
    ]
}
