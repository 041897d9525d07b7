//! # Trustgate
//!
//! Trustgate assigns a numeric trust score (0–100) to a login attempt and
//! decides whether to allow it, challenge it with secondary verification, or
//! block it. The score combines independent risk signals — impossible-travel
//! velocity, new locations, time-of-day patterns, and sustained low-trust
//! pressure — against the account's bounded login history.
//!
//! The crate is the convenience facade over the trustgate ecosystem:
//!
//! - [`trustgate_core`] holds the pure engine, decision policy, and scoring
//!   service
//! - storage crates implement [`LoginHistoryRepository`] (the `memory`
//!   feature ships the in-memory reference backend)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::Utc;
//! use trustgate::{AccountId, LoginAttempt, Trustgate};
//! use trustgate_storage_memory::MemoryHistoryRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trustgate::Error> {
//!     let trustgate = Trustgate::builder(Arc::new(MemoryHistoryRepository::default())).build()?;
//!
//!     let account = AccountId::new("emp_1042");
//!     trustgate.register_account(&account).await?;
//!
//!     let attempt = LoginAttempt::new(Utc::now())
//!         .with_ip_address("203.0.113.7")
//!         .with_coordinates(40.7128, -74.0060)
//!         .with_location("New York", "US")
//!         .with_timezone("America/New_York");
//!
//!     let outcome = trustgate.score_attempt(&account, &attempt).await?;
//!     println!("score={} action={}", outcome.score, outcome.action);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

mod builder;

pub use builder::TrustgateBuilder;
pub use trustgate_core::{
    AccountHistory, AccountId, Action, AttemptRecord, DecisionPolicy, Error, LoginAttempt,
    LoginHistoryRepository, ScoreOutcome, ScoreWeights, ScoringService, TrustAssessment,
    TrustConfig, TrustEngine, error,
};

#[cfg(feature = "memory")]
pub use trustgate_storage_memory::MemoryHistoryRepository;

/// The main entry point for scoring login attempts.
///
/// `Trustgate` wraps the core [`ScoringService`] together with the injected
/// history store. It is cheap to share behind an `Arc` and safe to use from
/// many tasks concurrently.
pub struct Trustgate<R: LoginHistoryRepository> {
    service: ScoringService<R>,
    repository: Arc<R>,
}

impl<R: LoginHistoryRepository> Trustgate<R> {
    /// Start building a `Trustgate` over the given history store.
    pub fn builder(repository: Arc<R>) -> TrustgateBuilder<R> {
        TrustgateBuilder::new(repository)
    }

    /// Create a `Trustgate` with the default configuration.
    pub fn new(repository: Arc<R>) -> Result<Self, Error> {
        Self::with_config(repository, TrustConfig::default())
    }

    /// Create a `Trustgate` with an explicit configuration.
    pub fn with_config(repository: Arc<R>, config: TrustConfig) -> Result<Self, Error> {
        Ok(Self {
            service: ScoringService::new(Arc::clone(&repository), config)?,
            repository,
        })
    }

    /// Score one login attempt for an account and record its outcome.
    ///
    /// See [`ScoringService::score_attempt`] for the error contract.
    pub async fn score_attempt(
        &self,
        account: &AccountId,
        attempt: &LoginAttempt,
    ) -> Result<ScoreOutcome, Error> {
        self.service.score_attempt(account, attempt).await
    }

    /// Register an account id so scoring can begin with an empty history.
    pub async fn register_account(&self, account: &AccountId) -> Result<(), Error> {
        self.repository.register_account(account).await
    }

    /// Load an account's bounded login history, most recent record first.
    pub async fn login_history(&self, account: &AccountId) -> Result<AccountHistory, Error> {
        self.repository.load_history(account).await
    }

    /// The active configuration.
    pub fn config(&self) -> &TrustConfig {
        self.service.config()
    }
}
