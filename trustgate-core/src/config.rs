//! Configuration for the scoring engine, decision policy, and scoring service
//!
//! All tunables live in [`TrustConfig`] and are passed explicitly into the
//! service at construction; there is no ambient or global configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ValidationError};
use crate::history::DEFAULT_HISTORY_CAPACITY;

/// Penalty weights for the individual trust checks.
///
/// Scoring starts from a baseline of 100 and subtracts the weight of every
/// triggered check, clamping the result to [0, 100]. The defaults are chosen
/// so that an account with no history scores at least 85 in the worst case
/// (deep-night attempt), comfortably above the generous-floor guarantee for
/// fresh accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Implied speed above the impossible-travel threshold.
    pub impossible_travel: f64,
    /// Implied speed above the plausible-fast threshold but still physically
    /// possible.
    pub fast_travel: f64,
    /// City/country never seen in the account's visible history.
    pub new_location_first: f64,
    /// City/country differing from the most recent login but seen before.
    pub new_location_repeat: f64,
    /// Local time outside business hours, but not deep night.
    pub off_hours: f64,
    /// Local time in the 00:00–04:59 window.
    pub deep_night: f64,
    /// Consecutive low-trust attempts reached the configured limit.
    pub repeated_low_trust: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            impossible_travel: 60.0,
            fast_travel: 15.0,
            new_location_first: 15.0,
            new_location_repeat: 8.0,
            off_hours: 5.0,
            deep_night: 15.0,
            repeated_low_trust: 25.0,
        }
    }
}

/// Configuration for trust scoring and decisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Number of attempt records retained per account.
    pub history_capacity: usize,
    /// Scores below this are "low trust": they feed the consecutive-low-trust
    /// counter, and (being below `medium_lower`) are blocked.
    pub low_threshold: u8,
    /// Lower bound of the challenge band. Scores below it are blocked.
    pub medium_lower: u8,
    /// Scores at or above this are allowed unconditionally (absent a
    /// suspicious flag).
    pub medium_upper: u8,
    /// Implied speed (km/h) beyond real-world travel; flags the attempt as
    /// suspicious.
    pub impossible_travel_kmh: f64,
    /// Implied speed (km/h) that is fast but plausible (high-speed rail,
    /// short-haul flight); penalized without flagging.
    pub plausible_fast_travel_kmh: f64,
    /// Number of consecutive low-trust attempts (counting the current one)
    /// that escalates to suspicious.
    pub consecutive_low_trust_limit: u32,
    /// Treat an unknown account id as a fresh account and register it on
    /// first contact. Off by default: unknown accounts are surfaced as
    /// errors unless the caller explicitly opts in.
    pub auto_register_accounts: bool,
    /// Budget for each history-store round trip. Exceeding it is reported as
    /// a storage timeout, distinct from any scoring result.
    pub history_timeout: Duration,
    /// Penalty weights for the individual checks.
    pub weights: ScoreWeights,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            low_threshold: 50,
            medium_lower: 50,
            medium_upper: 70,
            impossible_travel_kmh: 900.0,
            plausible_fast_travel_kmh: 200.0,
            consecutive_low_trust_limit: 3,
            auto_register_accounts: false,
            history_timeout: Duration::from_secs(2),
            weights: ScoreWeights::default(),
        }
    }
}

impl TrustConfig {
    /// Validate threshold ordering and basic sanity of the tunables.
    pub fn validate(&self) -> Result<(), Error> {
        if self.low_threshold > self.medium_lower {
            return Err(ValidationError::InvalidConfig(format!(
                "low_threshold ({}) must not exceed medium_lower ({})",
                self.low_threshold, self.medium_lower
            ))
            .into());
        }
        if self.medium_lower > self.medium_upper {
            return Err(ValidationError::InvalidConfig(format!(
                "medium_lower ({}) must not exceed medium_upper ({})",
                self.medium_lower, self.medium_upper
            ))
            .into());
        }
        if self.history_capacity == 0 {
            return Err(
                ValidationError::InvalidConfig("history_capacity must be at least 1".into()).into(),
            );
        }
        if self.consecutive_low_trust_limit == 0 {
            return Err(ValidationError::InvalidConfig(
                "consecutive_low_trust_limit must be at least 1".into(),
            )
            .into());
        }
        if self.plausible_fast_travel_kmh > self.impossible_travel_kmh {
            return Err(ValidationError::InvalidConfig(format!(
                "plausible_fast_travel_kmh ({}) must not exceed impossible_travel_kmh ({})",
                self.plausible_fast_travel_kmh, self.impossible_travel_kmh
            ))
            .into());
        }
        Ok(())
    }
}
