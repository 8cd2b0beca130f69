use soroban_sdk::{contracterror, contracttype, log, Env, String};

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: malformed or out-of-bounds input
    Validation = 1,
    /// Authorization errors: requester is not on the access list
    Authorization = 2,
    /// Not found errors: the record is absent or no longer visible
    NotFound = 3,
    /// State conflict errors: duplicate record ids
    StateConflict = 4,
    /// Storage errors: world state or encoding failures
    Storage = 5,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: caller mistakes, nothing to investigate
    Low = 1,
    /// Medium severity: denied or conflicting requests
    Medium = 2,
    /// High severity: the world state could not be read or written
    High = 3,
    /// Critical severity: stored bytes no longer decode
    Critical = 4,
}

/// Every failure is fatal to the current transaction. Nothing is persisted
/// when an operation returns one of these.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    InvalidInput = 1,
    AlreadyExists = 2,
    NotFound = 3,
    Deleted = 4,
    SerializationError = 5,
    StorageError = 6,
    AccessDenied = 7,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidInput => ErrorCategory::Validation,
            ContractError::AccessDenied => ErrorCategory::Authorization,
            ContractError::NotFound | ContractError::Deleted => ErrorCategory::NotFound,
            ContractError::AlreadyExists => ErrorCategory::StateConflict,
            ContractError::SerializationError | ContractError::StorageError => {
                ErrorCategory::Storage
            }
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::InvalidInput | ContractError::NotFound | ContractError::Deleted => {
                ErrorSeverity::Low
            }
            ContractError::AlreadyExists | ContractError::AccessDenied => ErrorSeverity::Medium,
            ContractError::StorageError => ErrorSeverity::High,
            ContractError::SerializationError => ErrorSeverity::Critical,
        }
    }

    /// Returns whether resubmitting the same transaction may succeed.
    /// Only storage failures are transient; the contract itself never retries.
    pub fn retryable(&self) -> bool {
        matches!(self, ContractError::StorageError)
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::AlreadyExists => "Metadata with this record id already exists",
            ContractError::NotFound => "Metadata record not found",
            ContractError::Deleted => "Metadata record has been deleted",
            ContractError::SerializationError => "Stored metadata record could not be decoded",
            ContractError::StorageError => "World state operation failed",
            ContractError::AccessDenied => "Requester is not on the record's access list",
        }
    }
}

/// Emits a diagnostic log line for an error about to be returned.
/// Logging never touches storage, so a rejected transaction leaves no trace in the world state.
pub fn log_error(env: &Env, error: ContractError, record_id: &String) {
    log!(
        env,
        "metadata error",
        error as u32,
        String::from_str(env, error.message()),
        record_id.clone()
    );
}
