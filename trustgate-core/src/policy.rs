//! Threshold-driven action selection
//!
//! Maps a [`TrustAssessment`] to the action the caller must take. The
//! suspicious flag always wins; otherwise the numeric score is compared
//! against the configured bands.

use crate::attempt::Action;
use crate::config::TrustConfig;
use crate::engine::TrustAssessment;

/// Maps assessments to actions using the configured thresholds.
pub struct DecisionPolicy {
    config: TrustConfig,
}

impl DecisionPolicy {
    pub fn new(config: TrustConfig) -> Self {
        Self { config }
    }

    /// Decide the action for an assessment.
    ///
    /// - suspicious → [`Action::Block`], irrespective of score
    /// - score below `medium_lower` → [`Action::Block`]
    /// - score below `medium_upper` → [`Action::Challenge`]
    /// - otherwise → [`Action::Allow`]
    pub fn decide(&self, assessment: &TrustAssessment) -> Action {
        if assessment.is_suspicious {
            return Action::Block;
        }
        if assessment.score < self.config.medium_lower {
            return Action::Block;
        }
        if assessment.score < self.config.medium_upper {
            return Action::Challenge;
        }
        Action::Allow
    }
}
