//! Scoring service: the boundary component for trust decisions.
//!
//! [`ScoringService`] accepts an account id plus one attempt's metadata,
//! invokes the engine against the account's history, maps the assessment to
//! an action, records the outcome, and returns the combined result.
//!
//! # Concurrency
//!
//! Requests for different accounts proceed in parallel. The read-then-append
//! sequence for a single account is serialized through a per-account mutex,
//! so the rolling consecutive-low-trust counter and record eviction never see
//! lost updates. The engine itself is pure and never suspends; only the
//! history-store round trips await, and each is bounded by the configured
//! timeout.
//!
//! # Example
//!
//! ```rust,ignore
//! use trustgate_core::{AccountId, LoginAttempt, ScoringService, TrustConfig};
//!
//! let service = ScoringService::new(repository, TrustConfig::default())?;
//!
//! let outcome = service
//!     .score_attempt(&AccountId::new("emp_1042"), &attempt)
//!     .await?;
//! match outcome.action {
//!     Action::Allow => { /* proceed */ }
//!     Action::Challenge => { /* send verification email */ }
//!     Action::Block => { /* refuse the login */ }
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    Error,
    attempt::{AccountId, Action, AttemptRecord, LoginAttempt},
    config::TrustConfig,
    engine::TrustEngine,
    error::{StorageError, ValidationError},
    history::AccountHistory,
    policy::DecisionPolicy,
    repositories::LoginHistoryRepository,
};

/// The caller-visible result of scoring one attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreOutcome {
    /// Trust score in [0, 100].
    pub score: u8,
    /// The action the caller must take.
    pub action: Action,
    pub is_suspicious: bool,
    pub require_email_verification: bool,
    /// Reasons from triggered checks, concatenated in evaluation order.
    pub reason: Option<String>,
}

/// Service for scoring login attempts against account history.
///
/// # Thread Safety
///
/// The service is thread-safe and intended to be shared across tasks behind
/// an `Arc`. Mutations to one account's history are serialized internally.
pub struct ScoringService<R: LoginHistoryRepository> {
    repository: Arc<R>,
    config: TrustConfig,
    engine: TrustEngine,
    policy: DecisionPolicy,
    account_locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl<R: LoginHistoryRepository> ScoringService<R> {
    /// Create a new scoring service.
    ///
    /// # Arguments
    ///
    /// * `repository` - The history store adapter
    /// * `config` - Scoring and decision tunables; validated here
    pub fn new(repository: Arc<R>, config: TrustConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            repository,
            engine: TrustEngine::new(config.clone()),
            policy: DecisionPolicy::new(config.clone()),
            config,
            account_locks: DashMap::new(),
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Score one login attempt and record its outcome.
    ///
    /// Performs exactly one history mutation per successful call; error paths
    /// before the append leave the history untouched.
    ///
    /// # Errors
    ///
    /// * [`ValidationError::InvalidField`] - blank account id
    /// * [`AccountError::UnknownAccount`](crate::error::AccountError) - id the
    ///   store has never seen, unless `auto_register_accounts` is set
    /// * [`StorageError`] - history store failure or timeout ("history
    ///   unavailable"); the caller chooses fail-open or fail-closed
    pub async fn score_attempt(
        &self,
        account: &AccountId,
        attempt: &LoginAttempt,
    ) -> Result<ScoreOutcome, Error> {
        if account.as_str().trim().is_empty() {
            return Err(ValidationError::InvalidField(
                "account id must not be empty".to_string(),
            )
            .into());
        }

        // Serialize read-assess-append per account; other accounts are
        // unaffected.
        let lock = self.account_lock(account);
        let outcome = {
            let _guard = lock.lock().await;
            self.score_attempt_locked(account, attempt).await
        };

        // Release our handle, then drop the entry if nothing else holds it:
        // the table tracks in-flight accounts rather than every id ever
        // scored. A concurrent holder keeps the count above one and the
        // entry stays; it cleans up after itself the same way.
        drop(lock);
        self.account_locks
            .remove_if(account, |_, entry| Arc::strong_count(entry) == 1);

        outcome
    }

    async fn score_attempt_locked(
        &self,
        account: &AccountId,
        attempt: &LoginAttempt,
    ) -> Result<ScoreOutcome, Error> {
        let history = self.load_or_register(account).await?;

        let assessment = self.engine.assess(attempt, &history);
        let action = self.policy.decide(&assessment);

        let consecutive_low_trust = if assessment.score < self.config.low_threshold {
            history.consecutive_low_trust() + 1
        } else {
            0
        };

        let record = AttemptRecord {
            timestamp: attempt.timestamp,
            score: assessment.score,
            latitude: attempt.latitude,
            longitude: attempt.longitude,
            city: attempt.city.clone(),
            country: attempt.country.clone(),
            ip_address: attempt.ip_address.clone(),
            outcome: action,
            consecutive_low_trust,
        };
        self.with_timeout(self.repository.append_record(
            account,
            record,
            self.config.history_capacity,
        ))
        .await?;

        tracing::info!(
            account = %account,
            score = assessment.score,
            action = %action,
            suspicious = assessment.is_suspicious,
            "scored login attempt"
        );

        Ok(ScoreOutcome {
            score: assessment.score,
            action,
            is_suspicious: assessment.is_suspicious,
            require_email_verification: assessment.require_email_verification,
            reason: assessment.reason,
        })
    }

    /// Load the account's history, registering the account first when the
    /// caller has opted into treating unknown ids as fresh accounts.
    async fn load_or_register(&self, account: &AccountId) -> Result<AccountHistory, Error> {
        match self
            .with_timeout(self.repository.load_history(account))
            .await
        {
            Ok(history) => Ok(history),
            Err(err) if err.is_unknown_account() && self.config.auto_register_accounts => {
                tracing::debug!(account = %account, "auto-registering unknown account");
                self.with_timeout(self.repository.register_account(account))
                    .await?;
                Ok(AccountHistory::new(self.config.history_capacity))
            }
            Err(err) => Err(err),
        }
    }

    /// Bound a history-store round trip by the configured timeout. Exceeding
    /// it is surfaced as a storage timeout, distinct from any scoring result.
    async fn with_timeout<T, F>(&self, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        match tokio::time::timeout(self.config.history_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("history store round trip timed out");
                Err(StorageError::Timeout.into())
            }
        }
    }

    fn account_lock(&self, account: &AccountId) -> Arc<Mutex<()>> {
        self.account_locks
            .entry(account.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
