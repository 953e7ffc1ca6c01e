// src/db/migration.rs

// Normalização das doações gravadas localmente por versões antigas.
// Função pura: recebe o que foi lido e devolve o formato atual + se algo mudou.

use crate::models::donation::{DonationDetails, DonationRecord, StoredDonation};

pub const DEFAULT_DONATION_HOURS: &str = "08:00 às 17:00";
pub const DEFAULT_CITY: &str = "São Paulo";
pub const DONATION_CONTACT_EMAIL: &str = "doacoes@email.com";
pub const RETIRED_CONTACT_EMAILS: [&str; 2] = ["doacoes@popinfo.dev", "teste@email.com"];

#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    pub donations: Vec<DonationRecord>,
    /// Algum registro mudou e o array precisa ser regravado (uma vez).
    pub dirty: bool,
}

pub fn migrate_donations(stored: Vec<StoredDonation>, now_millis: i64) -> MigrationOutcome {
    let mut dirty = false;

    let donations = stored
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let (migrated, changed) = migrate_one(record, now_millis + index as i64);
            dirty |= changed;
            migrated
        })
        .collect();

    MigrationOutcome { donations, dirty }
}

fn migrate_one(record: StoredDonation, fallback_id: i64) -> (DonationRecord, bool) {
    let mut changed = false;

    // 1. Identidade
    let id = match record.id {
        Some(id) if id != 0 => id,
        _ => {
            changed = true;
            fallback_id
        }
    };

    let mut details = record.details;

    // 2. E-mails de contato aposentados
    if RETIRED_CONTACT_EMAILS.contains(&details.contato_email.as_str()) {
        details.contato_email = DONATION_CONTACT_EMAIL.to_string();
        changed = true;
    }

    // 3. Endereço estruturado a partir do `local` legado
    if details.address.is_empty() {
        let before = details.clone();
        backfill_address(&mut details);
        changed |= details != before;
    }

    (DonationRecord { id, details }, changed)
}

fn backfill_address(details: &mut DonationDetails) {
    details.address = details.local.clone().unwrap_or_default();
    details.number = String::new();
    details.neighborhood = String::new();
    details.city = DEFAULT_CITY.to_string();
    details.zip = String::new();
    details.hours = DEFAULT_DONATION_HOURS.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_737_400_000_000;

    fn stored(value: serde_json::Value) -> StoredDonation {
        serde_json::from_value(value).unwrap()
    }

    fn reparse(records: &[DonationRecord]) -> Vec<StoredDonation> {
        let text = serde_json::to_string(records).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn legacy_local_is_backfilled_into_structured_address() {
        let outcome = migrate_donations(
            vec![stored(json!({
                "id": 5,
                "titulo": "Andador",
                "local": "Centro, São Paulo",
                "contatoEmail": "x@y.com"
            }))],
            NOW,
        );
        assert!(outcome.dirty);
        let d = &outcome.donations[0].details;
        assert_eq!(d.address, "Centro, São Paulo");
        assert_eq!(d.city, "São Paulo");
        assert_eq!(d.hours, DEFAULT_DONATION_HOURS);
        assert_eq!(d.neighborhood, "");
        assert_eq!(d.local.as_deref(), Some("Centro, São Paulo"));
        assert_eq!(outcome.donations[0].id, 5);
    }

    #[test]
    fn retired_contact_emails_are_rewritten() {
        for retired in RETIRED_CONTACT_EMAILS {
            let outcome = migrate_donations(
                vec![stored(json!({
                    "id": 1,
                    "address": "Rua A",
                    "contatoEmail": retired
                }))],
                NOW,
            );
            assert!(outcome.dirty);
            assert_eq!(outcome.donations[0].details.contato_email, "doacoes@email.com");
        }
    }

    #[test]
    fn missing_ids_get_distinct_time_based_ids() {
        let outcome = migrate_donations(
            vec![
                stored(json!({"address": "Rua A"})),
                stored(json!({"id": 0, "address": "Rua B"})),
                stored(json!({"id": 77, "address": "Rua C"})),
            ],
            NOW,
        );
        let ids: Vec<i64> = outcome.donations.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![NOW, NOW + 1, 77]);
        assert!(outcome.dirty);
    }

    #[test]
    fn current_records_are_left_alone() {
        let outcome = migrate_donations(
            vec![stored(json!({
                "id": 3,
                "titulo": "Muletas",
                "address": "Praça da Sé",
                "city": "São Paulo",
                "contatoEmail": "doacoes@email.com"
            }))],
            NOW,
        );
        assert!(!outcome.dirty);
    }

    #[test]
    fn second_pass_is_byte_identical_and_clean() {
        let legacy = vec![
            stored(json!({"titulo": "Sem id", "local": "Mooca", "contatoEmail": "teste@email.com"})),
            stored(json!({"id": 2, "titulo": "Sem local nem endereço"})),
            stored(json!({"id": 3, "address": "Rua C", "contatoEmail": "doacoes@popinfo.dev"})),
        ];
        let first = migrate_donations(legacy, NOW);
        assert!(first.dirty);

        let second = migrate_donations(reparse(&first.donations), NOW + 10_000);
        assert!(!second.dirty);
        assert_eq!(
            serde_json::to_string(&second.donations).unwrap(),
            serde_json::to_string(&first.donations).unwrap()
        );
    }
}
