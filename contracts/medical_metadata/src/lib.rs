#![no_std]

pub mod codec;
pub mod context;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod record;
pub mod validation;
pub mod world_state;

use soroban_sdk::{contract, contractimpl, Env, String};

pub use context::{LedgerContext, TransactionContext};
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use ledger::NewMetadata;
pub use record::{DataKey, MetadataRecord};
pub use world_state::{PersistentWorldState, WorldState};

const CONTRACT_VERSION: u32 = 1;

/// Ledger of pseudonymized medical-record metadata.
///
/// Each entry point is one transaction: it builds a fresh [`LedgerContext`]
/// for the invocation and hands it to the matching [`ledger`] operation.
#[contract]
pub struct MedicalMetadataContract;

#[contractimpl]
impl MedicalMetadataContract {
    /// Bootstrap hook called by the platform on deployment. Writes nothing.
    pub fn init_ledger(env: Env) {
        ledger::init(&LedgerContext::new(&env));
    }

    /// Anchor metadata for a new off-chain record.
    /// The creating hospital becomes the first entry of the access list.
    pub fn create_metadata(
        env: Env,
        record_id: String,
        patient_uid: String,
        hospital_id: String,
        off_chain_loc: String,
        data_hash: String,
        description: String,
    ) -> Result<(), ContractError> {
        let input = NewMetadata {
            record_id,
            patient_uid,
            hospital_id,
            off_chain_loc,
            data_hash,
            description,
        };
        ledger::create(&LedgerContext::new(&env), input)?;
        Ok(())
    }

    /// Get a metadata record. Soft-deleted records are reported as `Deleted`.
    pub fn read_metadata(env: Env, record_id: String) -> Result<MetadataRecord, ContractError> {
        ledger::read(&LedgerContext::new(&env), &record_id)
    }

    /// Check whether a record id has ever been used, including deleted records.
    pub fn metadata_exists(env: Env, record_id: String) -> Result<bool, ContractError> {
        ledger::exists(&LedgerContext::new(&env), &record_id)
    }

    /// Mark a record deleted (right to erasure). The stored entry is kept for audit.
    pub fn soft_delete(env: Env, record_id: String) -> Result<(), ContractError> {
        ledger::soft_delete(&LedgerContext::new(&env), &record_id)
    }

    /// Add a hospital to a record's access list. Granting twice is a no-op.
    pub fn grant_access(
        env: Env,
        record_id: String,
        target_hospital_id: String,
    ) -> Result<(), ContractError> {
        ledger::grant_access(&LedgerContext::new(&env), &record_id, target_hospital_id)?;
        Ok(())
    }

    /// Get a metadata record on behalf of a hospital on its access list.
    pub fn read_for_hospital(
        env: Env,
        record_id: String,
        requester_hospital_id: String,
    ) -> Result<MetadataRecord, ContractError> {
        ledger::read_for_hospital(
            &LedgerContext::new(&env),
            &record_id,
            &requester_hospital_id,
        )
    }

    /// Check whether a hospital may read a record.
    pub fn has_access(
        env: Env,
        record_id: String,
        hospital_id: String,
    ) -> Result<bool, ContractError> {
        ledger::has_access(&LedgerContext::new(&env), &record_id, &hospital_id)
    }

    /// Check an off-chain payload digest against the anchored one.
    pub fn verify_integrity(
        env: Env,
        record_id: String,
        data_hash: String,
    ) -> Result<bool, ContractError> {
        ledger::verify_integrity(&LedgerContext::new(&env), &record_id, &data_hash)
    }

    /// Get the retained copy of a record regardless of soft deletion.
    pub fn audit_metadata(env: Env, record_id: String) -> Result<MetadataRecord, ContractError> {
        ledger::audit(&LedgerContext::new(&env), &record_id)
    }

    /// Contract version
    pub fn version() -> u32 {
        CONTRACT_VERSION
    }
}


#[cfg(test)]
mod test_ledger;
