//! Repository trait for per-account login history.
//!
//! This module defines the storage interface for the bounded, per-account
//! log of scored login attempts that the engine reads as context.

use async_trait::async_trait;

use crate::{
    Error,
    attempt::{AccountId, AttemptRecord},
    history::AccountHistory,
};

/// Repository for per-account login history.
///
/// Implementations hold records most recent first and retain at most the
/// capacity the caller passes on append, evicting the oldest beyond it; the
/// scoring service passes its configured `history_capacity`, so that option
/// is the single retention knob. The service also serializes the
/// read-then-append sequence per account, so implementations do not need
/// cross-call transactional guarantees beyond making each single operation
/// atomic.
///
/// An account must be registered before it can be scored; a registered
/// account with no attempts yet yields an empty history, which is not an
/// error. An id the store has never seen yields
/// [`AccountError::UnknownAccount`](crate::error::AccountError), so callers
/// can distinguish "new employee, first login" from "identifier nobody
/// issued".
#[async_trait]
pub trait LoginHistoryRepository: Send + Sync + 'static {
    /// Load the history for a registered account, most recent record first.
    ///
    /// Returns an empty history for a registered account with no attempts,
    /// and `AccountError::UnknownAccount` for an unregistered id.
    async fn load_history(&self, account: &AccountId) -> Result<AccountHistory, Error>;

    /// Append a record as the account's most recent attempt, retaining at
    /// most `capacity` records and evicting the oldest beyond it.
    ///
    /// Returns `AccountError::UnknownAccount` for an unregistered id.
    async fn append_record(
        &self,
        account: &AccountId,
        record: AttemptRecord,
        capacity: usize,
    ) -> Result<(), Error>;

    /// Register an account id so scoring can begin with an empty history.
    /// Registering an already-known id is a no-op.
    async fn register_account(&self, account: &AccountId) -> Result<(), Error>;

    /// Whether the store knows this account id.
    async fn account_exists(&self, account: &AccountId) -> Result<bool, Error>;
}
