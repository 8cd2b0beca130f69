use soroban_sdk::{Bytes, Env, String};

use crate::errors::ContractError;
use crate::record::DataKey;

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Key-value view of the ledger scoped to the current transaction.
///
/// The contract reads and writes whole serialized records through this trait
/// and nothing else. There is no `delete`: keys written here are never removed.
pub trait WorldState {
    /// Returns the bytes stored under `key`, or `None` when the key was never written.
    fn get_state(&self, key: &String) -> Result<Option<Bytes>, ContractError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put_state(&self, key: &String, value: &Bytes) -> Result<(), ContractError>;
}

/// `WorldState` backed by the contract's persistent storage.
///
/// Host storage failures trap the whole invocation, which the platform
/// rejects exactly like a returned `ContractError::StorageError`.
pub struct PersistentWorldState {
    env: Env,
}

impl PersistentWorldState {
    pub fn new(env: &Env) -> Self {
        Self { env: env.clone() }
    }

    /// Extends the time-to-live (TTL) for a metadata key.
    /// Records must outlive their own soft deletion for the audit trail to hold.
    fn extend_ttl(&self, key: &DataKey) {
        self.env
            .storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

impl WorldState for PersistentWorldState {
    fn get_state(&self, key: &String) -> Result<Option<Bytes>, ContractError> {
        let key = DataKey::Metadata(key.clone());
        Ok(self.env.storage().persistent().get(&key))
    }

    fn put_state(&self, key: &String, value: &Bytes) -> Result<(), ContractError> {
        let key = DataKey::Metadata(key.clone());
        self.env.storage().persistent().set(&key, value);
        self.extend_ttl(&key);
        Ok(())
    }
}
