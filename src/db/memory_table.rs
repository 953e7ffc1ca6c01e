// src/db/memory_table.rs

// Backend remoto em memória, com o mesmo contrato do PostgrestClient.
// Usado nos testes e para rodar a API sem rede.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::{
    common::error::AppError,
    db::remote::{RemoteTable, Table},
};

#[derive(Default)]
pub struct InMemoryTable {
    // Linhas mais recentes primeiro, como no `order=created_at.desc`.
    rows: Mutex<HashMap<Table, Vec<Value>>>,
    next_id: AtomicI64,
    failing: AtomicBool,
    deny_deletes: AtomicBool,
}

impl InMemoryTable {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    /// Pré-carrega linhas já com id (ordem dada = ordem devolvida).
    pub async fn seed(&self, table: Table, rows: Vec<Value>) {
        self.rows.lock().await.insert(table, rows);
    }

    pub async fn rows(&self, table: Table) -> Vec<Value> {
        self.rows
            .lock()
            .await
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    /// Toda chamada passa a falhar como falha de backend.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Exclusões respondem com sucesso e contagem 0 (ex.: política de acesso).
    pub fn set_deny_deletes(&self, deny: bool) {
        self.deny_deletes.store(deny, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Backend("backend indisponível".into()));
        }
        Ok(())
    }
}

fn id_matches(row: &Value, id: &str) -> bool {
    match row.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

#[async_trait]
impl RemoteTable for InMemoryTable {
    async fn select_all(&self, table: Table) -> Result<Vec<Value>, AppError> {
        self.check()?;
        Ok(self.rows(table).await)
    }

    async fn select_by_id(&self, table: Table, id: &str) -> Result<Option<Value>, AppError> {
        self.check()?;
        let rows = self.rows.lock().await;
        Ok(rows
            .get(&table)
            .and_then(|list| list.iter().find(|row| id_matches(row, id)).cloned()))
    }

    async fn insert(&self, table: Table, row: Value) -> Result<(), AppError> {
        self.check()?;
        let Value::Object(mut fields) = row else {
            return Err(AppError::Backend("linha deve ser um objeto JSON".into()));
        };
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        fields.insert("id".into(), Value::from(id));
        fields.insert(
            "created_at".into(),
            Value::from(chrono::Utc::now().to_rfc3339()),
        );
        self.rows
            .lock()
            .await
            .entry(table)
            .or_default()
            .insert(0, Value::Object(fields));
        Ok(())
    }

    async fn update_by_id(&self, table: Table, id: &str, row: Value) -> Result<u64, AppError> {
        self.check()?;
        let Value::Object(patch) = row else {
            return Err(AppError::Backend("linha deve ser um objeto JSON".into()));
        };
        let mut rows = self.rows.lock().await;
        let mut count = 0;
        for existing in rows.entry(table).or_default().iter_mut() {
            if !id_matches(existing, id) {
                continue;
            }
            if let Value::Object(fields) = existing {
                merge(fields, &patch);
                count += 1;
            }
        }
        Ok(count)
    }

    async fn delete_by_id(&self, table: Table, id: &str) -> Result<u64, AppError> {
        self.check()?;
        if self.deny_deletes.load(Ordering::SeqCst) {
            return Ok(0);
        }
        let mut rows = self.rows.lock().await;
        let list = rows.entry(table).or_default();
        let before = list.len();
        list.retain(|row| !id_matches(row, id));
        Ok((before - list.len()) as u64)
    }
}

// PATCH não troca a identidade da linha.
fn merge(fields: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        fields.insert(key.clone(), value.clone());
    }
}
