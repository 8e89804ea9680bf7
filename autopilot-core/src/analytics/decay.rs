//! Decay Simulator: projects analyses through a stretch of total silence.
//!
//! The projection works only from already-computed analyses. Frequency and
//! trend collapse to zero, recency is recomputed from the extended day count
//! (with the steeper [`DecayConfig`] rate), reciprocity is recomputed from
//! the unchanged initiation ratio, and the response-time sub-score is left
//! out entirely.
//!
//! Actions come from the reduced set maintain / check-in / re-engage: with
//! the trend pinned at -100% the full live cascade would suggest a meetup
//! for every contact.
//!
//! Applying the projection to its own output simply adds another stretch of
//! silence; already-decayed contacts get no special treatment.

use super::score::{clamp_score, recency_score, reciprocity_score, sort_by_health, state_action};
use crate::config::{DecayConfig, DecayWeights};
use crate::types::{ContactAnalysis, RelationshipState, TrendDirection};

/// Trend percent reported for every projected contact.
pub const SILENT_TREND_PERCENT: i64 = -100;

/// The four sub-scores used by the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayedSubScores {
    pub recency: f64,
    pub frequency: f64,
    pub reciprocity: f64,
    pub trend: f64,
}

impl DecayedSubScores {
    pub fn weighted(&self, weights: &DecayWeights) -> f64 {
        weights.recency_weight * self.recency
            + weights.frequency_weight * self.frequency
            + weights.reciprocity_weight * self.reciprocity
            + weights.trend_weight * self.trend
    }
}

/// Project one contact through `config.silence_days` of silence.
pub fn decay_contact(contact: &ContactAnalysis, config: &DecayConfig) -> ContactAnalysis {
    let days = contact
        .days_since_last_interaction
        .saturating_add(config.silence_days);

    let subs = DecayedSubScores {
        recency: recency_score(days, config.recency_decay_per_day),
        frequency: 0.0,
        reciprocity: reciprocity_score(contact.initiation_ratio as f64, config.reciprocity_penalty),
        trend: 0.0,
    };
    let health_score = clamp_score(subs.weighted(&config.weights));
    let state = RelationshipState::from_score(health_score);

    ContactAnalysis {
        days_since_last_interaction: days,
        interaction_count_last30: 0,
        frequency_trend_percent: SILENT_TREND_PERCENT,
        health_score,
        state,
        suggested_action: state_action(state),
        trend_direction: TrendDirection::Down,
        ..contact.clone()
    }
}

/// Project every contact and re-sort by the new health score.
///
/// The input is left untouched.
pub fn simulate_no_contact(
    analyses: &[ContactAnalysis],
    config: &DecayConfig,
) -> Vec<ContactAnalysis> {
    let mut projected: Vec<ContactAnalysis> = analyses
        .iter()
        .map(|contact| decay_contact(contact, config))
        .collect();
    sort_by_health(&mut projected);

    tracing::debug!(
        contacts = projected.len(),
        silence_days = config.silence_days,
        "Simulated silence"
    );
    projected
}
