//! Record lifecycle rules.
//!
//! Each operation reads at most one key and writes at most one key of the
//! world state. A record moves `absent -> active -> deleted`; `deleted` is
//! terminal, and nothing here ever removes a key. Every write happens last,
//! after all checks, so a failed operation leaves the stored value untouched.

use soroban_sdk::{log, Env, String};

use crate::codec;
use crate::context::TransactionContext;
use crate::errors::{log_error, ContractError};
use crate::events;
use crate::record::MetadataRecord;
use crate::validation;
use crate::world_state::WorldState;

/// Caller-supplied fields of a new record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewMetadata {
    pub record_id: String,
    pub patient_uid: String,
    pub hospital_id: String,
    pub off_chain_loc: String,
    pub data_hash: String,
    pub description: String,
}

impl NewMetadata {
    fn validate(&self) -> Result<(), ContractError> {
        validation::validate_record_id(&self.record_id)?;
        validation::validate_patient_uid(&self.patient_uid)?;
        validation::validate_hospital_id(&self.hospital_id)?;
        validation::validate_location(&self.off_chain_loc)?;
        validation::validate_data_hash(&self.data_hash)?;
        validation::validate_description(&self.description)?;
        Ok(())
    }
}

fn fail<T>(env: &Env, error: ContractError, record_id: &String) -> Result<T, ContractError> {
    log_error(env, error, record_id);
    Err(error)
}

/// Logs any error on its way out so every rejection leaves a diagnostic line.
fn logged<T, C: TransactionContext>(
    ctx: &C,
    record_id: &String,
    result: Result<T, ContractError>,
) -> Result<T, ContractError> {
    result.or_else(|err| fail(ctx.env(), err, record_id))
}

/// Reads and decodes the stored record without applying the deletion filter.
fn load<C: TransactionContext>(
    ctx: &C,
    record_id: &String,
) -> Result<MetadataRecord, ContractError> {
    validation::validate_record_id(record_id)?;
    let bytes = ctx
        .world_state()
        .get_state(record_id)?
        .ok_or(ContractError::NotFound)?;
    codec::decode(ctx.env(), &bytes)
}

/// Loads a record that is currently visible to normal reads.
fn load_active<C: TransactionContext>(
    ctx: &C,
    record_id: &String,
) -> Result<MetadataRecord, ContractError> {
    let record = load(ctx, record_id)?;
    if record.is_deleted {
        return Err(ContractError::Deleted);
    }
    Ok(record)
}

fn store<C: TransactionContext>(ctx: &C, record: &MetadataRecord) -> Result<(), ContractError> {
    let bytes = codec::encode(ctx.env(), record);
    ctx.world_state().put_state(&record.record_id, &bytes)
}

/// Bootstrap hook. Touches no state.
pub fn init<C: TransactionContext>(ctx: &C) {
    log!(ctx.env(), "medical metadata ledger initialized", ctx.sequence());
    events::publish_initialized(ctx.env());
}

/// Returns whether any value is stored under `record_id`, deleted or not.
pub fn exists<C: TransactionContext>(ctx: &C, record_id: &String) -> Result<bool, ContractError> {
    logged(ctx, record_id, {
        validation::validate_record_id(record_id)
            .and_then(|_| ctx.world_state().get_state(record_id))
            .map(|bytes| bytes.is_some())
    })
}

/// Creates a record owned by `input.hospital_id` and returns the stored copy.
pub fn create<C: TransactionContext>(
    ctx: &C,
    input: NewMetadata,
) -> Result<MetadataRecord, ContractError> {
    if let Err(err) = input.validate() {
        return fail(ctx.env(), err, &input.record_id);
    }
    if exists(ctx, &input.record_id)? {
        return fail(ctx.env(), ContractError::AlreadyExists, &input.record_id);
    }

    let record = MetadataRecord::new(
        ctx.env(),
        input.record_id,
        input.patient_uid,
        input.hospital_id,
        input.off_chain_loc,
        input.data_hash,
        input.description,
        ctx.timestamp(),
    );
    logged(ctx, &record.record_id, store(ctx, &record))?;

    log!(
        ctx.env(),
        "metadata created",
        record.record_id.clone(),
        record.hospital_id.clone()
    );
    events::publish_metadata_created(
        ctx.env(),
        record.record_id.clone(),
        record.hospital_id.clone(),
        record.data_hash.clone(),
        record.timestamp,
    );
    Ok(record)
}

/// Returns the record unless it is absent or soft-deleted.
pub fn read<C: TransactionContext>(
    ctx: &C,
    record_id: &String,
) -> Result<MetadataRecord, ContractError> {
    logged(ctx, record_id, load_active(ctx, record_id))
}

/// Returns the stored record even after soft deletion, for audit.
pub fn audit<C: TransactionContext>(
    ctx: &C,
    record_id: &String,
) -> Result<MetadataRecord, ContractError> {
    logged(ctx, record_id, load(ctx, record_id))
}

/// Marks an active record deleted and overwrites it under the same key.
/// Deleting twice is an error, so each record has exactly one deletion.
pub fn soft_delete<C: TransactionContext>(
    ctx: &C,
    record_id: &String,
) -> Result<(), ContractError> {
    let mut record = read(ctx, record_id)?;
    record.is_deleted = true;
    logged(ctx, record_id, store(ctx, &record))?;

    log!(ctx.env(), "metadata soft-deleted", record_id.clone());
    events::publish_metadata_deleted(ctx.env(), record_id.clone());
    Ok(())
}

/// Appends `hospital_id` to the record's access list if it is missing.
///
/// Returns `true` when the list was written and `false` for the no-op
/// branch, where the hospital already had access and nothing is stored.
pub fn grant_access<C: TransactionContext>(
    ctx: &C,
    record_id: &String,
    hospital_id: String,
) -> Result<bool, ContractError> {
    if let Err(err) = validation::validate_hospital_id(&hospital_id) {
        return fail(ctx.env(), err, record_id);
    }
    let mut record = read(ctx, record_id)?;
    if !record.grant(hospital_id.clone()) {
        return Ok(false);
    }
    logged(ctx, record_id, store(ctx, &record))?;

    log!(
        ctx.env(),
        "metadata access granted",
        record_id.clone(),
        hospital_id.clone()
    );
    events::publish_access_granted(ctx.env(), record_id.clone(), hospital_id);
    Ok(true)
}

/// Returns whether `hospital_id` is on the access list of an active record.
pub fn has_access<C: TransactionContext>(
    ctx: &C,
    record_id: &String,
    hospital_id: &String,
) -> Result<bool, ContractError> {
    if let Err(err) = validation::validate_hospital_id(hospital_id) {
        return fail(ctx.env(), err, record_id);
    }
    Ok(read(ctx, record_id)?.has_access(hospital_id))
}

/// Reads an active record on behalf of `requester`, who must be on its access list.
pub fn read_for_hospital<C: TransactionContext>(
    ctx: &C,
    record_id: &String,
    requester: &String,
) -> Result<MetadataRecord, ContractError> {
    if let Err(err) = validation::validate_hospital_id(requester) {
        return fail(ctx.env(), err, record_id);
    }
    let record = read(ctx, record_id)?;
    if !record.has_access(requester) {
        return fail(ctx.env(), ContractError::AccessDenied, record_id);
    }
    Ok(record)
}

/// Compares a digest of the off-chain payload against the stored `data_hash`.
pub fn verify_integrity<C: TransactionContext>(
    ctx: &C,
    record_id: &String,
    data_hash: &String,
) -> Result<bool, ContractError> {
    if let Err(err) = validation::validate_data_hash(data_hash) {
        return fail(ctx.env(), err, record_id);
    }
    Ok(read(ctx, record_id)?.data_hash == *data_hash)
}
