//! Login attempt metadata and per-attempt records
//!
//! This module contains the types that flow through a single scoring request:
//!
//! | Type            | Lifetime  | Description                                             |
//! | --------------- | --------- | ------------------------------------------------------- |
//! | [`AccountId`]   | stable    | Opaque identifier for the account being scored.         |
//! | [`LoginAttempt`]| ephemeral | Metadata captured by the browser agent for one attempt. |
//! | [`AttemptRecord`]| persisted| The per-attempt record appended to the account history. |
//! | [`Action`]      | ephemeral | The decision returned to the caller.                    |
//!
//! Every field on [`LoginAttempt`] other than the timestamp is optional: the
//! capturing agent may be denied geolocation, sit behind a proxy, or omit any
//! signal entirely. The engine treats missing signals as neutral.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unique, stable identifier for a specific account.
///
/// This value should be treated as opaque. It is assigned by the integrating
/// application (user id, email, employee number) and is only used to key the
/// account's login history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: &str) -> Self {
        AccountId(id.to_string())
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The action the caller must take for a scored login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Proceed with the login normally.
    Allow,
    /// Require a secondary verification step (e.g. an email code) first.
    Challenge,
    /// Refuse the login regardless of the numeric score.
    Block,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Allow => write!(f, "allow"),
            Action::Challenge => write!(f, "challenge"),
            Action::Block => write!(f, "block"),
        }
    }
}

/// Metadata captured by the browser agent for a single login attempt.
///
/// The timestamp is always present; callers that cannot produce a timestamp
/// must fail the request rather than guess one, since time feeds two
/// independent checks. Everything else degrades to neutral scoring when
/// absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
    /// UTC instant at which the attempt was made.
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub user_agent: Option<String>,
    /// IANA timezone name reported by the agent (e.g. "America/New_York").
    pub timezone: Option<String>,
    pub screen_resolution: Option<String>,
}

impl LoginAttempt {
    /// Create an attempt carrying only a timestamp. All optional signals are
    /// absent; use the `with_*` methods to attach them.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            ip_address: None,
            latitude: None,
            longitude: None,
            city: None,
            country: None,
            region: None,
            user_agent: None,
            timezone: None,
            screen_resolution: None,
        }
    }

    pub fn with_ip_address(mut self, ip_address: &str) -> Self {
        self.ip_address = Some(ip_address.to_string());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_location(mut self, city: &str, country: &str) -> Self {
        self.city = Some(city.to_string());
        self.country = Some(country.to_string());
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = Some(timezone.to_string());
        self
    }

    /// Both coordinates, if the attempt carries a usable geolocation.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// The persisted record of one scored attempt, appended to the account's
/// bounded history after every decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub timestamp: DateTime<Utc>,
    /// The resolved trust score for the attempt, in [0, 100].
    pub score: u8,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub ip_address: Option<String>,
    /// The action that was taken for this attempt.
    pub outcome: Action,
    /// Rolling count, including this record, of consecutive attempts scoring
    /// below the configured low-trust threshold. Reset to zero by any attempt
    /// at or above it.
    pub consecutive_low_trust: u32,
}

impl AttemptRecord {
    /// Both coordinates, if the record was stored with a known geolocation.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Whether this record's city and country match the given pair
    /// (case-insensitive). Records without a stored location match nothing.
    pub fn location_matches(&self, city: &str, country: &str) -> bool {
        match (self.city.as_deref(), self.country.as_deref()) {
            (Some(c), Some(co)) => {
                c.eq_ignore_ascii_case(city) && co.eq_ignore_ascii_case(country)
            }
            _ => false,
        }
    }
}
