//! Repository traits for the history store boundary
//!
//! The scoring service talks to persistence exclusively through these traits,
//! so storage backends can be swapped without touching the engine or policy.

pub mod history;

pub use history::LoginHistoryRepository;
