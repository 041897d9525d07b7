//! Trust-scoring engine
//!
//! [`TrustEngine::assess`] turns one [`LoginAttempt`] plus the account's
//! [`AccountHistory`] into a [`TrustAssessment`]. It is a pure function of its
//! inputs: deterministic, read-only with respect to history, and free of I/O.
//!
//! Scoring starts from a baseline of 100 and applies independent subtractive
//! checks in a fixed order:
//!
//! 1. Geographic velocity (haversine distance / elapsed time)
//! 2. New location relative to the visible history
//! 3. Local time of day
//! 4. Consecutive low-trust pressure
//!
//! A check whose required signals are absent on either side contributes
//! exactly zero; absence of data never inflates trust. The final score is
//! clamped to [0, 100]. Once a check sets the suspicious flag it stays set,
//! but later checks still run and their reasons are still collected.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::attempt::LoginAttempt;
use crate::config::TrustConfig;
use crate::geo;
use crate::history::AccountHistory;

/// First hour of the local business day.
const BUSINESS_HOURS_START: u32 = 8;
/// First local hour after the business day.
const BUSINESS_HOURS_END: u32 = 18;
/// Local hours strictly below this are deep night.
const DEEP_NIGHT_END: u32 = 5;

/// Distances below this are treated as "did not move" when the elapsed time
/// between two attempts is not positive.
const STATIONARY_KM: f64 = 1.0;

pub const REASON_IMPOSSIBLE_TRAVEL: &str = "impossible travel velocity";
pub const REASON_REPEATED_LOW_TRUST: &str = "repeated low-trust attempts";
pub const REASON_NEW_LOCATION: &str = "login from new location";
pub const REASON_OFF_HOURS: &str = "off-hours login";
pub const REASON_DEEP_NIGHT: &str = "deep-night login";

/// The engine's verdict for a single attempt. Ephemeral; only the derived
/// [`AttemptRecord`](crate::AttemptRecord) is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustAssessment {
    /// Trust score in [0, 100]; higher is more trustworthy.
    pub score: u8,
    /// Set by the impossible-travel and repeated-low-trust checks. Forces the
    /// decision to block regardless of the numeric score.
    pub is_suspicious: bool,
    /// Reasons from all triggered checks, concatenated in evaluation order.
    pub reason: Option<String>,
    /// Set when the score lands in the challenge band and the attempt is not
    /// suspicious.
    pub require_email_verification: bool,
}

impl TrustAssessment {
    /// The first triggered check's reason, for callers that want a single
    /// string.
    pub fn primary_reason(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .and_then(|r| r.split("; ").next())
    }
}

/// Pure trust-scoring engine.
pub struct TrustEngine {
    config: TrustConfig,
}

impl TrustEngine {
    pub fn new(config: TrustConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Score one attempt against the account's history.
    pub fn assess(&self, attempt: &LoginAttempt, history: &AccountHistory) -> TrustAssessment {
        let weights = &self.config.weights;
        let mut score = 100.0_f64;
        let mut suspicious = false;
        let mut reasons: Vec<&'static str> = Vec::new();

        // 1. Geographic velocity
        let impossible_travel = self.implied_speed(attempt, history).is_some_and(|speed| {
            if speed > self.config.impossible_travel_kmh {
                score -= weights.impossible_travel;
                suspicious = true;
                reasons.push(REASON_IMPOSSIBLE_TRAVEL);
                true
            } else {
                if speed > self.config.plausible_fast_travel_kmh {
                    score -= weights.fast_travel;
                }
                false
            }
        });

        // 2. New location, unless the velocity check already explains it
        if !impossible_travel {
            if let (Some(city), Some(country)) =
                (attempt.city.as_deref(), attempt.country.as_deref())
            {
                let latest_known = history
                    .latest()
                    .filter(|r| r.city.is_some() && r.country.is_some());
                if let Some(latest) = latest_known {
                    if !latest.location_matches(city, country) {
                        let seen_before =
                            history.iter().any(|r| r.location_matches(city, country));
                        score -= if seen_before {
                            weights.new_location_repeat
                        } else {
                            weights.new_location_first
                        };
                        reasons.push(REASON_NEW_LOCATION);
                    }
                }
            }
        }

        // 3. Time of day; never suspicious on its own
        let local_hour = local_hour(attempt);
        if local_hour < DEEP_NIGHT_END {
            score -= weights.deep_night;
            reasons.push(REASON_DEEP_NIGHT);
        } else if !(BUSINESS_HOURS_START..BUSINESS_HOURS_END).contains(&local_hour) {
            score -= weights.off_hours;
            reasons.push(REASON_OFF_HOURS);
        }

        // 4. Consecutive low-trust pressure. The current attempt counts
        // toward the limit, so the Nth sub-threshold attempt escalates even
        // when its own signals look clean.
        if history.consecutive_low_trust() + 1 >= self.config.consecutive_low_trust_limit {
            score -= weights.repeated_low_trust;
            suspicious = true;
            reasons.push(REASON_REPEATED_LOW_TRUST);
        }

        let score = score.clamp(0.0, 100.0).round() as u8;
        let require_email_verification = !suspicious
            && score >= self.config.medium_lower
            && score < self.config.medium_upper;
        let reason = if reasons.is_empty() {
            None
        } else {
            Some(reasons.join("; "))
        };

        tracing::debug!(
            score,
            suspicious,
            require_email_verification,
            history_len = history.len(),
            "assessed login attempt"
        );

        TrustAssessment {
            score,
            is_suspicious: suspicious,
            reason,
            require_email_verification,
        }
    }

    /// Implied travel speed between the current attempt and the most recent
    /// history record with known coordinates. `None` when either side lacks
    /// coordinates, or when the attempt is effectively stationary.
    ///
    /// A non-positive elapsed time combined with real distance has no finite
    /// speed; it is reported as faster than any configured threshold.
    fn implied_speed(&self, attempt: &LoginAttempt, history: &AccountHistory) -> Option<f64> {
        let (cur_lat, cur_lon) = attempt.coordinates()?;
        let (record, (prev_lat, prev_lon)) = history
            .iter()
            .find_map(|r| r.coordinates().map(|c| (r, c)))?;

        let distance_km = geo::haversine_km(prev_lat, prev_lon, cur_lat, cur_lon);
        let elapsed_seconds =
            (attempt.timestamp - record.timestamp).num_milliseconds() as f64 / 1000.0;

        match geo::implied_speed_kmh(distance_km, elapsed_seconds) {
            Some(speed) => Some(speed),
            None if distance_km > STATIONARY_KM => Some(f64::INFINITY),
            None => None,
        }
    }
}

/// The attempt's local hour, resolved through its IANA timezone when present
/// and valid, else UTC.
fn local_hour(attempt: &LoginAttempt) -> u32 {
    match attempt
        .timezone
        .as_deref()
        .and_then(|name| name.parse::<chrono_tz::Tz>().ok())
    {
        Some(tz) => attempt.timestamp.with_timezone(&tz).hour(),
        None => attempt.timestamp.hour(),
    }
}
