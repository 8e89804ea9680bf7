//! Portfolio summary for report headers.

use crate::types::{ContactAnalysis, RelationshipState};
use serde::Serialize;

/// Aggregate view over a set of analyses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub contact_count: usize,
    /// Rounded mean health score (0 for an empty set)
    pub average_health: u8,
    pub state_counts: StateCounts,
    /// Contacts needing attention (At Risk)
    pub pending_issues: usize,
}

/// Number of contacts in each state, serialized as an object keyed by state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateCounts {
    pub thriving: usize,
    pub stable: usize,
    pub drifting: usize,
    pub at_risk: usize,
}

impl StateCounts {
    pub fn get(&self, state: RelationshipState) -> usize {
        match state {
            RelationshipState::Thriving => self.thriving,
            RelationshipState::Stable => self.stable,
            RelationshipState::Drifting => self.drifting,
            RelationshipState::AtRisk => self.at_risk,
        }
    }

    fn slot(&mut self, state: RelationshipState) -> &mut usize {
        match state {
            RelationshipState::Thriving => &mut self.thriving,
            RelationshipState::Stable => &mut self.stable,
            RelationshipState::Drifting => &mut self.drifting,
            RelationshipState::AtRisk => &mut self.at_risk,
        }
    }

    /// Counts in band order, Thriving first.
    pub fn iter(&self) -> impl Iterator<Item = (RelationshipState, usize)> + '_ {
        RelationshipState::ALL
            .into_iter()
            .map(move |state| (state, self.get(state)))
    }
}

impl PortfolioSummary {
    pub fn from_analyses(analyses: &[ContactAnalysis]) -> Self {
        let mut state_counts = StateCounts::default();
        for analysis in analyses {
            *state_counts.slot(analysis.state) += 1;
        }

        let average_health = if analyses.is_empty() {
            0
        } else {
            let total: u64 = analyses.iter().map(|a| a.health_score as u64).sum();
            (total as f64 / analyses.len() as f64).round() as u8
        };

        Self {
            contact_count: analyses.len(),
            average_health,
            pending_issues: state_counts.at_risk,
            state_counts,
        }
    }

    /// Count for a single state.
    pub fn count(&self, state: RelationshipState) -> usize {
        self.state_counts.get(state)
    }
}
