#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

//! Ledger operations against an in-memory world state with injectable failures.

use core::cell::{Cell, RefCell};

use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{vec, Bytes, Env, Map, String};

use crate::context::TransactionContext;
use crate::errors::ContractError;
use crate::ledger::{self, NewMetadata};
use crate::world_state::WorldState;
use crate::MedicalMetadataContract;

const NOW: u64 = 1_700_000_000;

struct MemoryWorldState {
    entries: RefCell<Map<String, Bytes>>,
    fail_get: Cell<bool>,
    fail_put: Cell<bool>,
    gets: Cell<u32>,
    puts: Cell<u32>,
}

impl MemoryWorldState {
    fn new(env: &Env) -> Self {
        Self {
            entries: RefCell::new(Map::new(env)),
            fail_get: Cell::new(false),
            fail_put: Cell::new(false),
            gets: Cell::new(0),
            puts: Cell::new(0),
        }
    }

    fn raw(&self, key: &String) -> Option<Bytes> {
        self.entries.borrow().get(key.clone())
    }
}

impl WorldState for MemoryWorldState {
    fn get_state(&self, key: &String) -> Result<Option<Bytes>, ContractError> {
        if self.fail_get.get() {
            return Err(ContractError::StorageError);
        }
        self.gets.set(self.gets.get() + 1);
        Ok(self.raw(key))
    }

    fn put_state(&self, key: &String, value: &Bytes) -> Result<(), ContractError> {
        if self.fail_put.get() {
            return Err(ContractError::StorageError);
        }
        self.entries.borrow_mut().set(key.clone(), value.clone());
        self.puts.set(self.puts.get() + 1);
        Ok(())
    }
}

struct FakeContext {
    env: Env,
    state: MemoryWorldState,
}

impl TransactionContext for FakeContext {
    type State = MemoryWorldState;

    fn env(&self) -> &Env {
        &self.env
    }

    fn world_state(&self) -> &MemoryWorldState {
        &self.state
    }

    fn timestamp(&self) -> u64 {
        NOW
    }
}

/// Runs `f` inside a contract frame so logs and events have an owner.
fn with_fake<T>(f: impl FnOnce(&FakeContext) -> T) -> T {
    let env = Env::default();
    let contract_id = env.register(MedicalMetadataContract, ());
    let ctx = FakeContext {
        state: MemoryWorldState::new(&env),
        env: env.clone(),
    };
    env.as_contract(&contract_id, || f(&ctx))
}

fn s(ctx: &FakeContext, value: &str) -> String {
    String::from_str(&ctx.env, value)
}

fn rec1(ctx: &FakeContext) -> NewMetadata {
    NewMetadata {
        record_id: s(ctx, "rec1"),
        patient_uid: s(ctx, "pat-abc"),
        hospital_id: s(ctx, "HOSP-A"),
        off_chain_loc: s(ctx, "https://off/1"),
        data_hash: s(ctx, "sha256:deadbeef"),
        description: s(ctx, "Checkup"),
    }
}

#[test]
fn test_create_stores_exactly_one_key() {
    with_fake(|ctx| {
        let created = ledger::create(ctx, rec1(ctx)).unwrap();

        assert_eq!(ctx.state.puts.get(), 1);
        assert_eq!(ctx.state.entries.borrow().len(), 1);
        assert_eq!(created.timestamp, NOW);
        assert_eq!(created.access_list, vec![&ctx.env, s(ctx, "HOSP-A")]);
        assert!(!created.is_deleted);

        let read = ledger::read(ctx, &s(ctx, "rec1")).unwrap();
        assert_eq!(read, created);
    });
}

#[test]
fn test_exists_never_writes() {
    with_fake(|ctx| {
        assert_eq!(ledger::exists(ctx, &s(ctx, "rec1")), Ok(false));
        ledger::create(ctx, rec1(ctx)).unwrap();
        assert_eq!(ledger::exists(ctx, &s(ctx, "rec1")), Ok(true));

        assert_eq!(ctx.state.puts.get(), 1);
    });
}

#[test]
fn test_duplicate_create_leaves_value_untouched() {
    with_fake(|ctx| {
        ledger::create(ctx, rec1(ctx)).unwrap();
        let before = ctx.state.raw(&s(ctx, "rec1")).unwrap();

        let mut again = rec1(ctx);
        again.hospital_id = s(ctx, "HOSP-Z");
        assert_eq!(
            ledger::create(ctx, again),
            Err(ContractError::AlreadyExists)
        );

        assert_eq!(ctx.state.puts.get(), 1);
        assert_eq!(ctx.state.raw(&s(ctx, "rec1")), Some(before));
    });
}

#[test]
fn test_soft_delete_overwrites_without_removing() {
    with_fake(|ctx| {
        ledger::create(ctx, rec1(ctx)).unwrap();
        ledger::soft_delete(ctx, &s(ctx, "rec1")).unwrap();

        assert_eq!(ctx.state.puts.get(), 2);
        assert_eq!(ctx.state.entries.borrow().len(), 1);
        assert_eq!(
            ledger::read(ctx, &s(ctx, "rec1")),
            Err(ContractError::Deleted)
        );
        assert_eq!(ledger::exists(ctx, &s(ctx, "rec1")), Ok(true));

        let stored = ledger::audit(ctx, &s(ctx, "rec1")).unwrap();
        assert!(stored.is_deleted);
        assert_eq!(stored.patient_uid, s(ctx, "pat-abc"));
    });
}

#[test]
fn test_soft_delete_is_not_repeatable() {
    with_fake(|ctx| {
        assert_eq!(
            ledger::soft_delete(ctx, &s(ctx, "rec1")),
            Err(ContractError::NotFound)
        );

        ledger::create(ctx, rec1(ctx)).unwrap();
        ledger::soft_delete(ctx, &s(ctx, "rec1")).unwrap();
        assert_eq!(
            ledger::soft_delete(ctx, &s(ctx, "rec1")),
            Err(ContractError::Deleted)
        );
        assert_eq!(ctx.state.puts.get(), 2);
    });
}

#[test]
fn test_repeated_grant_performs_no_second_write() {
    with_fake(|ctx| {
        ledger::create(ctx, rec1(ctx)).unwrap();

        assert_eq!(
            ledger::grant_access(ctx, &s(ctx, "rec1"), s(ctx, "HOSP-B")),
            Ok(true)
        );
        let after_first = ctx.state.raw(&s(ctx, "rec1"));
        assert_eq!(
            ledger::grant_access(ctx, &s(ctx, "rec1"), s(ctx, "HOSP-B")),
            Ok(false)
        );

        assert_eq!(ctx.state.puts.get(), 2);
        assert_eq!(ctx.state.raw(&s(ctx, "rec1")), after_first);
        assert_eq!(
            ledger::read(ctx, &s(ctx, "rec1")).unwrap().access_list,
            vec![&ctx.env, s(ctx, "HOSP-A"), s(ctx, "HOSP-B")]
        );
    });
}

#[test]
fn test_read_failure_is_storage_error() {
    with_fake(|ctx| {
        ledger::create(ctx, rec1(ctx)).unwrap();
        ctx.state.fail_get.set(true);

        assert_eq!(
            ledger::exists(ctx, &s(ctx, "rec1")),
            Err(ContractError::StorageError)
        );
        assert_eq!(
            ledger::read(ctx, &s(ctx, "rec1")),
            Err(ContractError::StorageError)
        );
        assert_eq!(
            ledger::create(ctx, rec1(ctx)),
            Err(ContractError::StorageError)
        );
        assert_eq!(
            ledger::grant_access(ctx, &s(ctx, "rec1"), s(ctx, "HOSP-B")),
            Err(ContractError::StorageError)
        );
        assert_eq!(ctx.state.puts.get(), 1);
    });
}

#[test]
fn test_write_failure_leaves_previous_state() {
    with_fake(|ctx| {
        ctx.state.fail_put.set(true);
        assert_eq!(
            ledger::create(ctx, rec1(ctx)),
            Err(ContractError::StorageError)
        );
        assert_eq!(ctx.state.raw(&s(ctx, "rec1")), None);

        ctx.state.fail_put.set(false);
        ledger::create(ctx, rec1(ctx)).unwrap();
        ctx.state.fail_put.set(true);

        assert_eq!(
            ledger::grant_access(ctx, &s(ctx, "rec1"), s(ctx, "HOSP-B")),
            Err(ContractError::StorageError)
        );
        assert_eq!(
            ledger::soft_delete(ctx, &s(ctx, "rec1")),
            Err(ContractError::StorageError)
        );

        let record = ledger::read(ctx, &s(ctx, "rec1")).unwrap();
        assert!(!record.is_deleted);
        assert_eq!(record.access_list, vec![&ctx.env, s(ctx, "HOSP-A")]);
    });
}

#[test]
fn test_undecodable_value_is_serialization_error() {
    with_fake(|ctx| {
        let junk = s(ctx, "plain text").to_xdr(&ctx.env);
        ctx.state.put_state(&s(ctx, "rec1"), &junk).unwrap();

        assert_eq!(ledger::exists(ctx, &s(ctx, "rec1")), Ok(true));
        assert_eq!(
            ledger::read(ctx, &s(ctx, "rec1")),
            Err(ContractError::SerializationError)
        );
        assert_eq!(
            ledger::audit(ctx, &s(ctx, "rec1")),
            Err(ContractError::SerializationError)
        );
        assert_eq!(
            ledger::grant_access(ctx, &s(ctx, "rec1"), s(ctx, "HOSP-B")),
            Err(ContractError::SerializationError)
        );
        assert_eq!(ctx.state.raw(&s(ctx, "rec1")), Some(junk));
    });
}

#[test]
fn test_validation_happens_before_storage_access() {
    with_fake(|ctx| {
        let mut input = rec1(ctx);
        input.record_id = s(ctx, "");

        assert_eq!(ledger::create(ctx, input), Err(ContractError::InvalidInput));
        assert_eq!(
            ledger::grant_access(ctx, &s(ctx, "rec1"), s(ctx, "")),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            ledger::read_for_hospital(ctx, &s(ctx, "rec1"), &s(ctx, "bad id")),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(ctx.state.gets.get(), 0);
        assert_eq!(ctx.state.puts.get(), 0);
    });
}

#[test]
fn test_read_for_hospital_checks_access_list() {
    with_fake(|ctx| {
        ledger::create(ctx, rec1(ctx)).unwrap();
        let rec = s(ctx, "rec1");

        assert_eq!(
            ledger::read_for_hospital(ctx, &rec, &s(ctx, "HOSP-B")),
            Err(ContractError::AccessDenied)
        );
        assert_eq!(ledger::has_access(ctx, &rec, &s(ctx, "HOSP-B")), Ok(false));

        ledger::grant_access(ctx, &rec, s(ctx, "HOSP-B")).unwrap();

        let record = ledger::read_for_hospital(ctx, &rec, &s(ctx, "HOSP-B")).unwrap();
        assert_eq!(record.hospital_id, s(ctx, "HOSP-A"));
        assert_eq!(ledger::has_access(ctx, &rec, &s(ctx, "HOSP-B")), Ok(true));

        ledger::soft_delete(ctx, &rec).unwrap();
        assert_eq!(
            ledger::read_for_hospital(ctx, &rec, &s(ctx, "HOSP-A")),
            Err(ContractError::Deleted)
        );
    });
}

#[test]
fn test_verify_integrity_matches_stored_digest_only() {
    with_fake(|ctx| {
        ledger::create(ctx, rec1(ctx)).unwrap();
        let rec = s(ctx, "rec1");

        assert_eq!(
            ledger::verify_integrity(ctx, &rec, &s(ctx, "sha256:deadbeef")),
            Ok(true)
        );
        assert_eq!(
            ledger::verify_integrity(ctx, &rec, &s(ctx, "sha256:DEADBEEF")),
            Ok(false)
        );
        assert_eq!(
            ledger::verify_integrity(ctx, &s(ctx, "rec2"), &s(ctx, "sha256:deadbeef")),
            Err(ContractError::NotFound)
        );
    });
}
