//! Service layer orchestrating the engine, policy, and history store
//!
//! Services own the side effects: repositories are injected as `Arc<R>` and
//! everything else (engine, policy, configuration) is pure.

pub mod scoring;

pub use scoring::{ScoreOutcome, ScoringService};
