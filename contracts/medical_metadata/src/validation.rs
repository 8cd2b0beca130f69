use soroban_sdk::String;

use crate::ContractError;

const MAX_RECORD_ID_LEN: u32 = 128;
const MAX_PATIENT_UID_LEN: u32 = 128;
const MAX_HOSPITAL_ID_LEN: u32 = 64;
const MAX_LOCATION_LEN: u32 = 512;
const MAX_HASH_LEN: u32 = 256;
const MAX_DESCRIPTION_LEN: u32 = 256;

fn validate_len(value: &String, min: u32, max: u32) -> Result<(), ContractError> {
    if !(min..=max).contains(&value.len()) {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Validate a record id (the world-state key).
pub fn validate_record_id(record_id: &String) -> Result<(), ContractError> {
    validate_len(record_id, 1, MAX_RECORD_ID_LEN)
}

pub fn validate_patient_uid(patient_uid: &String) -> Result<(), ContractError> {
    validate_len(patient_uid, 1, MAX_PATIENT_UID_LEN)
}

/// Validate a hospital identifier.
/// Hospital ids are compared byte for byte on the access list, so whitespace
/// and control bytes are refused to keep look-alike ids from coexisting.
pub fn validate_hospital_id(hospital_id: &String) -> Result<(), ContractError> {
    validate_len(hospital_id, 1, MAX_HOSPITAL_ID_LEN)?;

    let len = hospital_id.len() as usize;
    let mut buf = [0u8; MAX_HOSPITAL_ID_LEN as usize];
    hospital_id.copy_into_slice(&mut buf[..len]);

    // Space, control bytes and DEL; non-ASCII UTF-8 passes through.
    if buf[..len].iter().any(|&b| b <= b' ' || b == 0x7f) {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_location(off_chain_loc: &String) -> Result<(), ContractError> {
    validate_len(off_chain_loc, 1, MAX_LOCATION_LEN)
}

pub fn validate_data_hash(data_hash: &String) -> Result<(), ContractError> {
    validate_len(data_hash, 1, MAX_HASH_LEN)
}

/// Descriptions are free text and may be empty.
pub fn validate_description(description: &String) -> Result<(), ContractError> {
    validate_len(description, 0, MAX_DESCRIPTION_LEN)
}
