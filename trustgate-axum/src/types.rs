use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trustgate_core::{Action, LoginAttempt, ScoreOutcome};

/// The metadata record forwarded by the capturing agent, as a camelCase JSON
/// body. Only the timestamp is required; a request without a parseable
/// timestamp is rejected rather than scored against a guessed time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAttemptRequest {
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub screen_resolution: Option<String>,
}

impl From<ScoreAttemptRequest> for LoginAttempt {
    fn from(request: ScoreAttemptRequest) -> Self {
        LoginAttempt {
            timestamp: request.timestamp,
            ip_address: request.ip_address,
            latitude: request.latitude,
            longitude: request.longitude,
            city: request.city,
            country: request.country,
            region: request.region,
            user_agent: request.user_agent,
            timezone: request.timezone,
            screen_resolution: request.screen_resolution,
        }
    }
}

/// The scoring result returned to the caller.
///
/// The flags encode the decided action: allow → both flags false, challenge →
/// `require_email_verification`, block → `is_suspicious` (the caller must
/// refuse the login regardless of the score value).
#[derive(Debug, Clone, Serialize)]
pub struct TrustScoreResponse {
    pub trust_score: u8,
    pub is_suspicious: bool,
    pub require_email_verification: bool,
    pub reason: Option<String>,
}

impl From<ScoreOutcome> for TrustScoreResponse {
    fn from(outcome: ScoreOutcome) -> Self {
        // Flags are derived from the action, not the raw assessment: a score
        // below the block boundary must not reach the caller looking like an
        // allow.
        Self {
            trust_score: outcome.score,
            is_suspicious: outcome.action == Action::Block,
            require_email_verification: outcome.action == Action::Challenge,
            reason: outcome.reason,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
