//! Analytics engine for Social Autopilot
//!
//! Three pure stages, leaves first:
//! - [`aggregate`]: events → one sorted thread per contact → [`ContactMetrics`]
//! - [`score`]: metrics → health score, state, trend direction, action
//! - [`decay`]: analyses → "no contact for 30 days" projection
//!
//! Plus [`engagement`] detail per thread and a [`summary`] over a result set.
//!
//! Nothing here reads the wall clock: every run takes an explicit `as_of`.

pub mod aggregate;
pub mod decay;
pub mod engagement;
pub mod score;
pub mod summary;

use crate::config::{validate_constant, ScoringConfig};
use crate::error::Result;

/// Everything the live engine needs besides the events and the clock.
#[derive(Debug, Clone)]
pub struct AnalysisPolicy {
    /// The identity whose relationships are assessed
    pub self_identity: String,
    /// Silence (hours) that separates two conversations
    pub conversation_gap_hours: f64,
    pub scoring: ScoringConfig,
}

impl AnalysisPolicy {
    /// Reject a policy the engine cannot run with: a non-finite or negative
    /// conversation gap, or an invalid scoring section.
    pub fn validate(&self) -> Result<()> {
        validate_constant("engine.conversation_gap_hours", self.conversation_gap_hours)?;
        self.scoring.validate()
    }
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        crate::Config::default().policy()
    }
}

pub use aggregate::{group_by_contact, ContactMetrics, ContactThread};
pub use decay::{decay_contact, simulate_no_contact};
pub use engagement::EngagementStats;
pub use score::{analyze_relationships, assess, sort_by_health, suggest_action, SubScores};
pub use summary::{PortfolioSummary, StateCounts};
