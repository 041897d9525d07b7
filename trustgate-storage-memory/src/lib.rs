//! In-memory implementation of the trustgate history store.
//!
//! This backend keeps every account's bounded login history in process
//! memory. It is the reference [`LoginHistoryRepository`] implementation,
//! suitable for tests and single-process deployments; all state is lost on
//! restart.
//!
//! Each map operation is atomic, and the scoring service serializes the
//! read-then-append sequence per account, so no further locking is needed
//! here.

use async_trait::async_trait;
use dashmap::DashMap;
use trustgate_core::{
    AccountHistory, AccountId, AttemptRecord, Error, LoginHistoryRepository,
    error::AccountError, history::DEFAULT_HISTORY_CAPACITY,
};

/// In-memory repository for per-account login history.
///
/// Retention is governed by the capacity the scoring service passes on each
/// append; a freshly registered account starts at the default until its
/// first append.
#[derive(Default)]
pub struct MemoryHistoryRepository {
    histories: DashMap<AccountId, AccountHistory>,
}

impl MemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.histories.len()
    }
}

#[async_trait]
impl LoginHistoryRepository for MemoryHistoryRepository {
    async fn load_history(&self, account: &AccountId) -> Result<AccountHistory, Error> {
        self.histories
            .get(account)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AccountError::UnknownAccount(account.to_string()).into())
    }

    async fn append_record(
        &self,
        account: &AccountId,
        record: AttemptRecord,
        capacity: usize,
    ) -> Result<(), Error> {
        let mut entry = self
            .histories
            .get_mut(account)
            .ok_or_else(|| Error::from(AccountError::UnknownAccount(account.to_string())))?;
        let history = entry.value_mut();
        history.set_capacity(capacity);
        history.push(record);
        Ok(())
    }

    async fn register_account(&self, account: &AccountId) -> Result<(), Error> {
        self.histories
            .entry(account.clone())
            .or_insert_with(|| {
                tracing::debug!(account = %account, "registered account");
                AccountHistory::new(DEFAULT_HISTORY_CAPACITY)
            });
        Ok(())
    }

    async fn account_exists(&self, account: &AccountId) -> Result<bool, Error> {
        Ok(self.histories.contains_key(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trustgate_core::Action;

    fn record(score: u8) -> AttemptRecord {
        AttemptRecord {
            timestamp: Utc::now(),
            score,
            latitude: None,
            longitude: None,
            city: None,
            country: None,
            ip_address: None,
            outcome: Action::Allow,
            consecutive_low_trust: 0,
        }
    }

    #[tokio::test]
    async fn test_unregistered_account_is_unknown() {
        let repo = MemoryHistoryRepository::default();
        let account = AccountId::new("emp_1");

        assert!(!repo.account_exists(&account).await.unwrap());
        let err = repo.load_history(&account).await.unwrap_err();
        assert!(err.is_unknown_account());

        let err = repo
            .append_record(&account, record(90), 10)
            .await
            .unwrap_err();
        assert!(err.is_unknown_account());
    }

    #[tokio::test]
    async fn test_registered_account_starts_empty() {
        let repo = MemoryHistoryRepository::default();
        let account = AccountId::new("emp_1");

        repo.register_account(&account).await.unwrap();
        assert!(repo.account_exists(&account).await.unwrap());

        let history = repo.load_history(&account).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let repo = MemoryHistoryRepository::default();
        let account = AccountId::new("emp_1");

        repo.register_account(&account).await.unwrap();
        repo.append_record(&account, record(90), 10).await.unwrap();
        repo.register_account(&account).await.unwrap();

        // Re-registering must not wipe existing history.
        assert_eq!(repo.load_history(&account).await.unwrap().len(), 1);
        assert_eq!(repo.account_count(), 1);
    }

    #[tokio::test]
    async fn test_append_is_most_recent_first_and_capped() {
        let repo = MemoryHistoryRepository::new();
        let account = AccountId::new("emp_1");
        repo.register_account(&account).await.unwrap();

        for score in [60, 70, 80, 90] {
            repo.append_record(&account, record(score), 3).await.unwrap();
        }

        let history = repo.load_history(&account).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest().unwrap().score, 90);
    }

    #[tokio::test]
    async fn test_accounts_are_independent() {
        let repo = MemoryHistoryRepository::default();
        let first = AccountId::new("emp_1");
        let second = AccountId::new("emp_2");
        repo.register_account(&first).await.unwrap();
        repo.register_account(&second).await.unwrap();

        repo.append_record(&first, record(40), 10).await.unwrap();

        assert_eq!(repo.load_history(&first).await.unwrap().len(), 1);
        assert!(repo.load_history(&second).await.unwrap().is_empty());
    }
}
