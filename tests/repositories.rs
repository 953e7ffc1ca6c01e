// tests/repositories.rs

mod common;

use popinfo::{
    common::error::AppError,
    db::{
        local_store::{DONATIONS_KEY, SERVICES_KEY},
        DataAccessMode, DataSource, DonationRepository, LocalStore, ServiceRepository, Table,
    },
    models::service::{Service, ServiceFilter, ServiceType},
};
use serde_json::json;

use common::{donation, local_source, remote_source, service};

// --- Serviços: modo local ---

#[tokio::test]
async fn local_services_create_update_delete() {
    let (_dir, source) = local_source();
    let repo = ServiceRepository::new(source);
    assert_eq!(repo.mode(), DataAccessMode::Local);
    assert!(repo.list().await.is_empty());

    let listed = repo
        .create(service("CRAS Sé", ServiceType::Cras, "Sé"))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    let created = listed[0].clone();
    assert_eq!(created.details.name, "CRAS Sé");
    assert!(!created.id.is_empty());

    // Inserção local anexa ao fim
    let listed = repo
        .create(service("CAPS Lapa", ServiceType::Caps, "Lapa"))
        .await
        .unwrap();
    assert_eq!(listed[1].details.name, "CAPS Lapa");
    assert_ne!(listed[0].id, listed[1].id);

    let mut changed = created.clone();
    changed.details.hours = "24 horas".into();
    let listed = repo.update(changed.clone()).await.unwrap();
    assert_eq!(listed[0], changed);
    assert_eq!(repo.find(&created.id).await.unwrap(), Some(changed));

    let listed = repo.delete(&created.id).await.unwrap();
    assert!(listed.iter().all(|s| s.id != created.id));
    assert!(repo.list().await.iter().all(|s| s.id != created.id));
    assert_eq!(repo.find(&created.id).await.unwrap(), None);

    // Exclusão local de id inexistente não falha
    assert_eq!(repo.delete("nao-existe").await.unwrap().len(), 1);
}

#[tokio::test]
async fn local_update_of_unknown_id_is_reported() {
    let (_dir, source) = local_source();
    let repo = ServiceRepository::new(source);
    let ghost = Service {
        id: "123".into(),
        details: service("Fantasma", ServiceType::Outro, "Centro"),
    };
    assert!(matches!(repo.update(ghost).await, Err(AppError::NothingUpdated)));
}

#[tokio::test]
async fn local_services_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let repo = ServiceRepository::new(DataSource::Local(LocalStore::open(dir.path()).unwrap()));
        repo.create(service("Bom Prato", ServiceType::Alimentacao, "Centro"))
            .await
            .unwrap();
    }
    let repo = ServiceRepository::new(DataSource::Local(LocalStore::open(dir.path()).unwrap()));
    let listed = repo.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].details.service_type, ServiceType::Alimentacao);
}

#[tokio::test]
async fn search_combines_text_and_type() {
    let (_dir, source) = local_source();
    let repo = ServiceRepository::new(source);
    repo.create(service("CAPS Adulto", ServiceType::Caps, "Sé")).await.unwrap();
    repo.create(service("CRAS Mooca", ServiceType::Cras, "Mooca")).await.unwrap();

    let by_text = |q: &str, t: Option<ServiceType>| ServiceFilter {
        query: q.into(),
        service_type: t,
    };
    assert_eq!(repo.search(&by_text("caps", None)).await.len(), 1);
    assert_eq!(
        repo.search(&by_text("caps", None)).await,
        repo.search(&by_text("CAPS", None)).await
    );
    assert_eq!(repo.search(&by_text("mooca", None)).await.len(), 1);
    assert_eq!(repo.search(&by_text("cadastro", None)).await.len(), 2);
    assert_eq!(
        repo.search(&by_text("", Some(ServiceType::Cras))).await[0].details.name,
        "CRAS Mooca"
    );
    assert!(repo.search(&by_text("caps", Some(ServiceType::Cras))).await.is_empty());
    assert_eq!(repo.search(&ServiceFilter::default()).await, repo.list().await);
}

// --- Serviços: modo remoto ---

#[tokio::test]
async fn remote_services_let_the_backend_assign_ids() {
    let (table, source) = remote_source();
    let repo = ServiceRepository::new(source);
    assert_eq!(repo.mode(), DataAccessMode::Remote);

    repo.create(service("CREAS Sé", ServiceType::Creas, "Sé")).await.unwrap();
    let listed = repo
        .create(service("UBS Lapa", ServiceType::Saude, "Lapa"))
        .await
        .unwrap();

    // Mais recentes primeiro
    assert_eq!(listed[0].details.name, "UBS Lapa");
    assert_eq!(listed[0].id, "2");
    assert_eq!(listed[1].id, "1");

    let raw = table.rows(Table::Services).await;
    assert_eq!(raw[0]["type"], "Saúde");

    let found = repo.find("1").await.unwrap().unwrap();
    assert_eq!(found.details.name, "CREAS Sé");
    assert_eq!(repo.find("99").await.unwrap(), None);
}

#[tokio::test]
async fn remote_update_and_delete_check_affected_rows() {
    let (table, source) = remote_source();
    let repo = ServiceRepository::new(source);
    let listed = repo
        .create(service("CRAS Sé", ServiceType::Cras, "Sé"))
        .await
        .unwrap();
    let mut target = listed[0].clone();

    target.details.phone = "(11) 3333-4444".into();
    let listed = repo.update(target.clone()).await.unwrap();
    assert_eq!(listed[0].details.phone, "(11) 3333-4444");

    let ghost = Service {
        id: "404".into(),
        ..target.clone()
    };
    assert!(matches!(repo.update(ghost).await, Err(AppError::NothingUpdated)));

    assert!(matches!(repo.delete("404").await, Err(AppError::NothingDeleted)));

    table.set_deny_deletes(true);
    let err = repo.delete(&target.id).await.unwrap_err();
    assert!(matches!(err, AppError::NothingDeleted));
    assert!(err.to_string().contains("Verifique se você tem permissão"));
    assert_eq!(repo.list().await.len(), 1);

    table.set_deny_deletes(false);
    let listed = repo.delete(&target.id).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn remote_failures_list_empty_but_reject_mutations() {
    let (table, source) = remote_source();
    let repo = ServiceRepository::new(source);
    repo.create(service("CRAS Sé", ServiceType::Cras, "Sé")).await.unwrap();

    table.set_failing(true);
    assert!(repo.list().await.is_empty());
    let err = repo
        .create(service("Outro", ServiceType::Outro, "Centro"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Backend(_)));
    assert!(!err.to_string().is_empty());
    assert!(repo.find("1").await.is_err());
}

#[tokio::test]
async fn remote_ids_the_backend_cannot_parse_are_not_found() {
    let (table, source) = remote_source();
    let repo = ServiceRepository::new(source);
    // Nenhuma chamada chega ao backend
    table.set_failing(true);

    assert_eq!(repo.find("abc").await.unwrap(), None);
    let ghost = Service {
        id: "abc".into(),
        details: service("Fantasma", ServiceType::Outro, "Centro"),
    };
    assert!(matches!(repo.update(ghost).await, Err(AppError::NothingUpdated)));
    assert!(matches!(repo.delete("abc").await, Err(AppError::NothingDeleted)));
    assert!(matches!(repo.find("1").await, Err(AppError::Backend(_))));
}

#[tokio::test]
async fn malformed_remote_rows_are_dropped() {
    let (table, source) = remote_source();
    table
        .seed(
            Table::Services,
            vec![
                json!({"id": 10, "name": "Válido", "type": "CAPS"}),
                json!({"id": 11, "name": "Tipo estranho", "type": "Lazer"}),
                json!({"name": "Sem id", "type": "CRAS"}),
            ],
        )
        .await;
    let repo = ServiceRepository::new(source);
    let listed = repo.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "10");
}

// --- Doações: modo local ---

#[tokio::test]
async fn first_local_read_seeds_two_samples_once() {
    let (_dir, source) = local_source();
    let repo = DonationRepository::new(source);

    let first = repo.list().await;
    assert_eq!(first.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(first[0].details.titulo, "Cadeira de rodas adulto");

    repo.delete(1).await.unwrap();
    repo.delete(2).await.unwrap();
    // Esvaziar a lista não traz os exemplos de volta
    assert!(repo.list().await.is_empty());
}

#[tokio::test]
async fn local_donations_are_prepended_and_searchable() {
    let (_dir, source) = local_source();
    let repo = DonationRepository::new(source);
    repo.list().await;

    let listed = repo.create(donation("Andador articulado")).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].details.titulo, "Andador articulado");
    let new_id = listed[0].id;
    assert!(new_id > 2);

    assert_eq!(repo.search("").await, repo.list().await);
    assert_eq!(repo.search("ANDADOR").await, repo.search("andador").await);
    assert_eq!(repo.search("andador").await.len(), 1);
    // Campos de endereço também entram na busca
    assert_eq!(repo.search("mooca").await.len(), 1);
    assert_eq!(repo.search("vila mariana").await[0].id, 1);

    assert_eq!(repo.find(new_id).await.unwrap().details.titulo, "Andador articulado");

    let listed = repo.delete(new_id).await.unwrap();
    assert!(listed.iter().all(|d| d.id != new_id));
    assert!(repo.find(new_id).await.is_none());
}

#[tokio::test]
async fn legacy_local_donations_are_migrated_and_written_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    store
        .set_item(
            DONATIONS_KEY,
            &json!([
                {
                    "titulo": "Cadeira de banho",
                    "descricao": "Cadeira de banho dobrável",
                    "categoria": "Higiene",
                    "quantidade": 1,
                    "local": "Centro, São Paulo",
                    "contatoEmail": "teste@email.com",
                    "contatoTelefone": "(11) 95555-4444"
                }
            ])
            .to_string(),
        )
        .unwrap();

    let repo = DonationRepository::new(DataSource::Local(store.clone()));
    let listed = repo.list().await;
    assert_eq!(listed.len(), 1);
    let migrated = &listed[0];
    assert!(migrated.id > 0);
    assert_eq!(migrated.details.address, "Centro, São Paulo");
    assert_eq!(migrated.details.city, "São Paulo");
    assert_eq!(migrated.details.hours, "08:00 às 17:00");
    assert_eq!(migrated.details.contato_email, "doacoes@email.com");
    assert_eq!(migrated.details.quantidade, "1");

    // Gravado de volta: a próxima leitura devolve exatamente o mesmo conteúdo
    let persisted = store.get_item(DONATIONS_KEY).unwrap().unwrap();
    assert!(persisted.contains("doacoes@email.com"));
    assert_eq!(repo.list().await, listed);
    assert_eq!(store.get_item(DONATIONS_KEY).unwrap().unwrap(), persisted);
}

#[tokio::test]
async fn corrupt_local_data_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    store.set_item(DONATIONS_KEY, "[{quebrado").unwrap();
    store.set_item(SERVICES_KEY, "não é json").unwrap();

    assert!(DonationRepository::new(DataSource::Local(store.clone())).list().await.is_empty());
    assert!(ServiceRepository::new(DataSource::Local(store)).list().await.is_empty());
}

// --- Doações: modo remoto ---

#[tokio::test]
async fn remote_donations_use_backend_column_names() {
    let (table, source) = remote_source();
    let repo = DonationRepository::new(source);
    assert!(repo.list().await.is_empty());

    let listed = repo.create(donation("Cama hospitalar")).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].details.contato_email, "doador@exemplo.com");

    let raw = &table.rows(Table::Donations).await[0];
    assert_eq!(raw["contato_email"], "doador@exemplo.com");
    assert_eq!(raw["contato_telefone"], "(11) 97777-6666");
    assert!(raw.get("contatoEmail").is_none());

    assert_eq!(repo.search("cama").await.len(), 1);
    let id = listed[0].id;
    assert!(repo.delete(id).await.unwrap().is_empty());
    assert!(matches!(repo.delete(id).await, Err(AppError::NothingDeleted)));
}

#[tokio::test]
async fn remote_list_failure_empties_search_too() {
    let (table, source) = remote_source();
    let repo = DonationRepository::new(source);
    repo.create(donation("Cadeira de rodas infantil")).await.unwrap();
    assert_eq!(repo.search("").await, repo.list().await);

    table.set_failing(true);
    let listed = repo.list().await;
    assert!(listed.is_empty());
    assert_eq!(repo.search("").await, listed);
    assert!(repo.search("infantil").await.is_empty());
    assert!(repo.create(donation("Outra")).await.is_err());

    // Backend de volta: a busca acompanha a nova lista
    table.set_failing(false);
    assert_eq!(repo.list().await.len(), 1);
    assert_eq!(repo.search("infantil").await.len(), 1);
}

// --- Ida e volta completa: criar e listar preserva todos os campos ---

async fn assert_created_donation_round_trips(repo: DonationRepository) {
    let mut sent = donation("Colchão casal");
    sent.local = Some("Mooca, São Paulo".into());

    let listed = repo.create(sent.clone()).await.unwrap();
    assert_eq!(listed[0].details, sent);

    let reread = repo.list().await;
    let created = reread.iter().find(|d| d.id == listed[0].id).unwrap();
    assert_eq!(created.details, sent);
}

#[tokio::test]
async fn created_donation_keeps_every_field_in_local_mode() {
    let (_dir, source) = local_source();
    assert_created_donation_round_trips(DonationRepository::new(source)).await;
}

#[tokio::test]
async fn created_donation_keeps_every_field_in_remote_mode() {
    let (table, source) = remote_source();
    assert_created_donation_round_trips(DonationRepository::new(source)).await;
    assert_eq!(table.rows(Table::Donations).await[0]["local"], "Mooca, São Paulo");
}

async fn assert_created_service_round_trips(repo: ServiceRepository) {
    let mut sent = service(
        "Centro de Acolhida Bela Vista",
        ServiceType::CentroAcolhida,
        "Bela Vista",
    );
    sent.complement = Some("Fundos".into());

    let listed = repo.create(sent.clone()).await.unwrap();
    let created = listed.iter().find(|s| s.details.name == sent.name).unwrap();
    assert_eq!(created.details, sent);
    let reread = repo.find(&created.id).await.unwrap().unwrap();
    assert_eq!(reread.details, sent);
}

#[tokio::test]
async fn created_service_keeps_every_field_in_both_modes() {
    let (_dir, source) = local_source();
    assert_created_service_round_trips(ServiceRepository::new(source)).await;
    let (_table, source) = remote_source();
    assert_created_service_round_trips(ServiceRepository::new(source)).await;
}
