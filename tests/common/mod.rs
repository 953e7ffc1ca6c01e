// tests/common/mod.rs

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use popinfo::{
    config::Settings,
    db::{DataSource, InMemoryTable, LocalStore},
    models::{
        donation::DonationDetails,
        service::{ServiceDetails, ServiceType},
    },
};
use tempfile::TempDir;

pub const OPERATOR_TOKEN: &str = "token-de-teste";

/// Sobe o router numa porta livre e devolve o endereço.
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

pub fn settings(pairs: &[(&str, &str)]) -> Settings {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(move |key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
}

pub fn local_source() -> (TempDir, DataSource) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStore::open(dir.path()).expect("open store");
    (dir, DataSource::Local(store))
}

pub fn remote_source() -> (Arc<InMemoryTable>, DataSource) {
    let table = Arc::new(InMemoryTable::new());
    (table.clone(), DataSource::Remote(table))
}

pub fn service(name: &str, service_type: ServiceType, neighborhood: &str) -> ServiceDetails {
    ServiceDetails {
        name: name.into(),
        service_type,
        address: "Rua Frederico Alvarenga".into(),
        number: "259".into(),
        complement: None,
        neighborhood: neighborhood.into(),
        city: "São Paulo".into(),
        zip: "01020-030".into(),
        phone: "(11) 3241-6554".into(),
        email: "contato@exemplo.org".into(),
        hours: "08:00 às 17:00".into(),
        description: "Atendimento à população".into(),
        services_offered: vec!["Acolhimento".into(), "Cadastro Único".into()],
    }
}

pub fn donation(titulo: &str) -> DonationDetails {
    DonationDetails {
        titulo: titulo.into(),
        descricao: "Em bom estado, retirada combinada.".into(),
        categoria: "Mobilidade".into(),
        quantidade: "1 unidade".into(),
        local: None,
        address: "Rua da Mooca".into(),
        number: "100".into(),
        complement: Some("Casa 2".into()),
        neighborhood: "Mooca".into(),
        city: "São Paulo".into(),
        zip: "03104-000".into(),
        hours: "09:00 às 18:00".into(),
        contato_email: "doador@exemplo.com".into(),
        contato_telefone: "(11) 97777-6666".into(),
    }
}
