//! Builder pattern for constructing Trustgate instances
//!
//! The builder layers configuration tweaks over [`TrustConfig::default`] and
//! validates the result once, at build time.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trustgate::Trustgate;
//! use trustgate_storage_memory::MemoryHistoryRepository;
//!
//! # fn main() -> Result<(), trustgate::Error> {
//! let trustgate = Trustgate::builder(Arc::new(MemoryHistoryRepository::default()))
//!     .history_capacity(25)
//!     .thresholds(40, 50, 70)
//!     .auto_register_accounts(true)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use trustgate_core::{Error, LoginHistoryRepository, TrustConfig};

use crate::Trustgate;

/// Builder for [`Trustgate`] instances.
pub struct TrustgateBuilder<R: LoginHistoryRepository> {
    repository: Arc<R>,
    config: TrustConfig,
}

impl<R: LoginHistoryRepository> TrustgateBuilder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            config: TrustConfig::default(),
        }
    }

    /// Replace the entire configuration.
    pub fn with_config(mut self, config: TrustConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of attempt records retained per account.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Set the three score thresholds: low (low-trust classification),
    /// medium lower (block boundary), medium upper (allow boundary).
    pub fn thresholds(mut self, low: u8, medium_lower: u8, medium_upper: u8) -> Self {
        self.config.low_threshold = low;
        self.config.medium_lower = medium_lower;
        self.config.medium_upper = medium_upper;
        self
    }

    /// Implied-speed thresholds in km/h for the geographic-velocity check.
    pub fn travel_speeds(mut self, plausible_fast_kmh: f64, impossible_kmh: f64) -> Self {
        self.config.plausible_fast_travel_kmh = plausible_fast_kmh;
        self.config.impossible_travel_kmh = impossible_kmh;
        self
    }

    /// Number of consecutive low-trust attempts that escalates to suspicious.
    pub fn consecutive_low_trust_limit(mut self, limit: u32) -> Self {
        self.config.consecutive_low_trust_limit = limit;
        self
    }

    /// Treat unknown account ids as fresh accounts instead of surfacing an
    /// error.
    pub fn auto_register_accounts(mut self, enabled: bool) -> Self {
        self.config.auto_register_accounts = enabled;
        self
    }

    /// Budget for each history-store round trip.
    pub fn history_timeout(mut self, timeout: Duration) -> Self {
        self.config.history_timeout = timeout;
        self
    }

    /// Validate the configuration and build the instance.
    pub fn build(self) -> Result<Trustgate<R>, Error> {
        Trustgate::with_config(self.repository, self.config)
    }
}
