use soroban_sdk::{contracttype, vec, Env, String, Vec};

/// Storage keys owned by the contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Serialized `MetadataRecord` bytes keyed by record id
    Metadata(String),
}

/// Pseudonymized metadata for one off-chain medical record.
///
/// Only a pointer (`off_chain_loc`) and an integrity digest (`data_hash`) of
/// the clinical payload live on the ledger; the payload itself never does.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetadataRecord {
    pub record_id: String,
    /// Pseudonymized patient identifier
    pub patient_uid: String,
    /// Origin hospital, always the first entry of `access_list`
    pub hospital_id: String,
    pub off_chain_loc: String,
    pub data_hash: String,
    pub description: String,
    /// Ledger time of creation, in seconds
    pub timestamp: u64,
    /// Soft-delete flag, never reset once set
    pub is_deleted: bool,
    /// Hospitals allowed to read the record, in grant order
    pub access_list: Vec<String>,
}

impl MetadataRecord {
    /// Builds a fresh, active record whose access list holds only the creator.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        env: &Env,
        record_id: String,
        patient_uid: String,
        hospital_id: String,
        off_chain_loc: String,
        data_hash: String,
        description: String,
        timestamp: u64,
    ) -> Self {
        Self {
            record_id,
            patient_uid,
            access_list: vec![env, hospital_id.clone()],
            hospital_id,
            off_chain_loc,
            data_hash,
            description,
            timestamp,
            is_deleted: false,
        }
    }

    pub fn has_access(&self, hospital_id: &String) -> bool {
        self.access_list.iter().any(|h| h == *hospital_id)
    }

    /// Appends `hospital_id` unless it is already present.
    /// Returns `true` when the list changed.
    pub fn grant(&mut self, hospital_id: String) -> bool {
        if self.has_access(&hospital_id) {
            return false;
        }
        self.access_list.push_back(hospital_id);
        true
    }
}
