use soroban_sdk::{symbol_short, Env, String};

/// Event published when the ledger bootstrap hook runs.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub timestamp: u64,
}

/// Event published when a metadata record is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetadataCreatedEvent {
    pub record_id: String,
    pub hospital_id: String,
    pub data_hash: String,
    pub timestamp: u64,
}

/// Event published when a metadata record is soft-deleted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetadataDeletedEvent {
    pub record_id: String,
    pub timestamp: u64,
}

/// Event published when a hospital is appended to a record's access list.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub record_id: String,
    pub hospital_id: String,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a metadata record is created.
/// Topics carry the record id and origin hospital so indexers can follow either.
pub fn publish_metadata_created(
    env: &Env,
    record_id: String,
    hospital_id: String,
    data_hash: String,
    timestamp: u64,
) {
    let topics = (
        symbol_short!("MD_NEW"),
        record_id.clone(),
        hospital_id.clone(),
    );
    let data = MetadataCreatedEvent {
        record_id,
        hospital_id,
        data_hash,
        timestamp,
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a metadata record is soft-deleted.
pub fn publish_metadata_deleted(env: &Env, record_id: String) {
    let topics = (symbol_short!("MD_DEL"), record_id.clone());
    let data = MetadataDeletedEvent {
        record_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_granted(env: &Env, record_id: String, hospital_id: String) {
    let topics = (
        symbol_short!("MD_GRANT"),
        record_id.clone(),
        hospital_id.clone(),
    );
    let data = AccessGrantedEvent {
        record_id,
        hospital_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
