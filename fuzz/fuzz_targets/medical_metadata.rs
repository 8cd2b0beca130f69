#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use medical_metadata::{ContractError, MedicalMetadataContract, MedicalMetadataContractClient};
use soroban_sdk::{Env, String};

const RECORD_IDS: [&str; 3] = ["rec-1", "rec-2", "rec-3"];
const HOSPITALS: [&str; 4] = ["HOSP-A", "HOSP-B", "HOSP-C", "HOSP D"];

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Create { record: u8, hospital: u8, hash_len: u8 },
    Read { record: u8 },
    SoftDelete { record: u8 },
    Grant { record: u8, hospital: u8 },
    ReadForHospital { record: u8, hospital: u8 },
}

fn pick<'a>(items: &[&'a str], n: u8) -> &'a str {
    items[n as usize % items.len()]
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    let contract_id = env.register(MedicalMetadataContract, ());
    let client = MedicalMetadataContractClient::new(&env, &contract_id);
    client.init_ledger();

    for action in actions {
        match action {
            FuzzAction::Create {
                record,
                hospital,
                hash_len,
            } => {
                // Lengths past the 256-byte bound exercise the validation path.
                let hash = "f".repeat(hash_len as usize * 2);
                let _ = client.try_create_metadata(
                    &String::from_str(&env, pick(&RECORD_IDS, record)),
                    &String::from_str(&env, "pat-fuzz"),
                    &String::from_str(&env, pick(&HOSPITALS, hospital)),
                    &String::from_str(&env, "https://off/fuzz"),
                    &String::from_str(&env, &hash),
                    &String::from_str(&env, "fuzz"),
                );
            }
            FuzzAction::Read { record } => {
                let id = String::from_str(&env, pick(&RECORD_IDS, record));
                if let Ok(Ok(found)) = client.try_read_metadata(&id) {
                    assert!(!found.is_deleted);
                    assert_eq!(found.access_list.get(0), Some(found.hospital_id.clone()));
                }
            }
            FuzzAction::SoftDelete { record } => {
                let id = String::from_str(&env, pick(&RECORD_IDS, record));
                let existed = client.metadata_exists(&id);
                let _ = client.try_soft_delete(&id);
                // Deletion never removes a key.
                assert_eq!(client.metadata_exists(&id), existed);
            }
            FuzzAction::Grant { record, hospital } => {
                let id = String::from_str(&env, pick(&RECORD_IDS, record));
                let _ = client.try_grant_access(&id, &String::from_str(&env, pick(&HOSPITALS, hospital)));
            }
            FuzzAction::ReadForHospital { record, hospital } => {
                let id = String::from_str(&env, pick(&RECORD_IDS, record));
                let requester = String::from_str(&env, pick(&HOSPITALS, hospital));
                match client.try_read_for_hospital(&id, &requester) {
                    Ok(Ok(found)) => assert!(found.access_list.iter().any(|h| h == requester)),
                    Err(Ok(ContractError::AccessDenied)) => {
                        assert!(!client.has_access(&id, &requester))
                    }
                    _ => {}
                }
            }
        }
    }
});
