//! Ready-to-use Axum routes for the trustgate scoring service.
//!
//! This crate exposes the protocol contract between the capturing agent and
//! the scoring service as an HTTP boundary: the agent POSTs its metadata
//! record for an account, and receives the trust score, flags, and reason.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trustgate::Trustgate;
//! use trustgate_storage_memory::MemoryHistoryRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let trustgate = Arc::new(
//!         Trustgate::builder(Arc::new(MemoryHistoryRepository::default())).build()?,
//!     );
//!     let app = trustgate_axum::create_router(trustgate);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod routes;
pub mod types;

pub use error::ApiError;
pub use routes::{ApiState, create_router};
pub use types::{ScoreAttemptRequest, TrustScoreResponse};
