//! Core functionality for the trustgate login trust-scoring ecosystem
//!
//! This crate contains the trust-scoring and decision engine: the pure
//! algorithm that turns one login attempt's metadata plus the account's
//! bounded history into a trust score and an action, and the service that
//! orchestrates it against a pluggable history store.
//!
//! See [`TrustEngine`] for the scoring checks, [`DecisionPolicy`] for
//! threshold-driven action selection, and [`ScoringService`] for the
//! boundary component callers integrate with. Storage backends implement
//! [`LoginHistoryRepository`].
//!
//! The crate is designed to be used as a dependency by storage and transport
//! adapters and is not intended to perform any I/O of its own.

pub mod attempt;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod history;
pub mod policy;
pub mod repositories;
pub mod services;

pub use attempt::{AccountId, Action, AttemptRecord, LoginAttempt};
pub use config::{ScoreWeights, TrustConfig};
pub use engine::{TrustAssessment, TrustEngine};
pub use error::Error;
pub use history::AccountHistory;
pub use policy::DecisionPolicy;
pub use repositories::LoginHistoryRepository;
pub use services::{ScoreOutcome, ScoringService};
