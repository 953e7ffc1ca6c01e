// src/db/local_store.rs

// Armazenamento local chave-valor: cada chave guarda um texto JSON,
// como o localStorage do navegador. É o sistema de registro no modo local.

use std::{path::Path, sync::Arc};

use redb::{Database, ReadableTable, TableDefinition, TableError};
use serde::Serialize;
use serde_json::Value;

use crate::common::error::AppError;

pub const SERVICES_KEY: &str = "popinfo_user_services";
pub const DONATIONS_KEY: &str = "popinfo_doacoes";

const DB_FILE: &str = "popinfo.redb";
const ENTRIES: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// Abre (ou cria) o arquivo do armazenamento dentro de `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(DB_FILE);
        let db = Database::create(&path)?;
        tracing::info!("📦 Armazenamento local aberto em {}", path.display());
        Ok(Self { db: Arc::new(db) })
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(ENTRIES) {
            Ok(table) => table,
            // Nada foi gravado ainda
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ENTRIES)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<(), AppError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ENTRIES)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Lê o array JSON guardado em `key`. Falhas de leitura ou JSON corrompido
    /// são registradas e tratadas como coleção vazia.
    pub fn load_collection(&self, key: &str) -> Vec<Value> {
        let raw = match self.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!("Erro ao ler '{}' do armazenamento local: {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                tracing::warn!(
                    "Conteúdo de '{}' não é uma lista (tipo {}); ignorando",
                    key,
                    json_kind(&other)
                );
                Vec::new()
            }
            Err(e) => {
                tracing::error!("JSON corrompido em '{}': {}", key, e);
                Vec::new()
            }
        }
    }

    /// Grava a coleção inteira em `key`. Falhas são registradas e ignoradas.
    pub fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Erro ao serializar '{}': {}", key, e);
                return;
            }
        };

        if let Err(e) = self.set_item(key, &json) {
            tracing::error!("Erro ao salvar '{}' no armazenamento local: {}", key, e);
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "booleano",
        Value::Number(_) => "número",
        Value::String(_) => "texto",
        Value::Array(_) => "lista",
        Value::Object(_) => "objeto",
    }
}
