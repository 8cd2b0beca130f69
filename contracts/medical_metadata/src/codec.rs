//! Wire format of a stored record.
//!
//! Records are persisted as the XDR encoding of a `StoredRecord` `ScVal`,
//! which for a `#[contracttype]` struct is a map keyed by field-name symbols.
//! The stored names are the camelCase ones of the record format (`recordId`,
//! `accessList`, ...), independent of the Rust field names of
//! [`MetadataRecord`]. The bytes stay decodable as long as those names and
//! their types are unchanged.

use soroban_sdk::xdr::{FromXdr, ToXdr};
use soroban_sdk::{contracttype, Bytes, Env, String, Vec};

use crate::errors::ContractError;
use crate::record::MetadataRecord;

#[allow(non_snake_case)]
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
struct StoredRecord {
    recordId: String,
    patientUid: String,
    hospitalId: String,
    offChainLoc: String,
    dataHash: String,
    description: String,
    timestamp: u64,
    isDeleted: bool,
    accessList: Vec<String>,
}

impl From<&MetadataRecord> for StoredRecord {
    fn from(record: &MetadataRecord) -> Self {
        Self {
            recordId: record.record_id.clone(),
            patientUid: record.patient_uid.clone(),
            hospitalId: record.hospital_id.clone(),
            offChainLoc: record.off_chain_loc.clone(),
            dataHash: record.data_hash.clone(),
            description: record.description.clone(),
            timestamp: record.timestamp,
            isDeleted: record.is_deleted,
            accessList: record.access_list.clone(),
        }
    }
}

impl From<StoredRecord> for MetadataRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            record_id: stored.recordId,
            patient_uid: stored.patientUid,
            hospital_id: stored.hospitalId,
            off_chain_loc: stored.offChainLoc,
            data_hash: stored.dataHash,
            description: stored.description,
            timestamp: stored.timestamp,
            is_deleted: stored.isDeleted,
            access_list: stored.accessList,
        }
    }
}

pub fn encode(env: &Env, record: &MetadataRecord) -> Bytes {
    StoredRecord::from(record).to_xdr(env)
}

pub fn decode(env: &Env, bytes: &Bytes) -> Result<MetadataRecord, ContractError> {
    StoredRecord::from_xdr(env, bytes)
        .map(MetadataRecord::from)
        .map_err(|_| ContractError::SerializationError)
}
