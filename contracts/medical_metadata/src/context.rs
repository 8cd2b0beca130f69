use soroban_sdk::Env;

use crate::world_state::{PersistentWorldState, WorldState};

/// Per-invocation capabilities handed to every ledger operation.
///
/// Operations never reach for storage or the clock on their own; they only
/// see what the context exposes, so the same logic runs against the real
/// ledger or an in-memory fake.
pub trait TransactionContext {
    type State: WorldState;

    fn env(&self) -> &Env;

    fn world_state(&self) -> &Self::State;

    /// Deterministic transaction time, in seconds since the epoch.
    fn timestamp(&self) -> u64 {
        self.env().ledger().timestamp()
    }

    /// Sequence number of the ledger the transaction executes in.
    fn sequence(&self) -> u32 {
        self.env().ledger().sequence()
    }
}

/// Context of a live contract invocation.
pub struct LedgerContext {
    env: Env,
    state: PersistentWorldState,
}

impl LedgerContext {
    pub fn new(env: &Env) -> Self {
        Self {
            env: env.clone(),
            state: PersistentWorldState::new(env),
        }
    }
}

impl TransactionContext for LedgerContext {
    type State = PersistentWorldState;

    fn env(&self) -> &Env {
        &self.env
    }

    fn world_state(&self) -> &PersistentWorldState {
        &self.state
    }
}
