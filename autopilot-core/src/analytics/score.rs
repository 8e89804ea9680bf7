//! Scorer/Classifier: weighted health score, relationship state, trend
//! direction and suggested action.
//!
//! ## Reference policy
//!
//! | Sub-score | Rule | Weight |
//! |-----------|------|--------|
//! | recency | `100 - 2.5 * days`, floored at 0 | 0.35 |
//! | frequency | `last30 / total * 150`, capped at 100 | 0.20 |
//! | reciprocity | `100 - 1.5 * abs(initiation - 50)`, floored at 0 | 0.15 |
//! | trend | step function of the trend percent | 0.15 |
//! | response | step function of the mean reply delay | 0.15 |
//!
//! Constants and weights come from [`ScoringConfig`]. The final score is the
//! rounded weighted sum clamped to 0-100. No randomness enters the score:
//! equal inputs always yield byte-identical analyses.

use super::aggregate::{group_by_contact, ContactMetrics, NO_ALTERNATION_DELAY_HOURS};
use super::engagement::EngagementStats;
use super::AnalysisPolicy;
use crate::config::{ScoringConfig, ScoringWeights};
use crate::error::Result;
use crate::types::{ContactAnalysis, Event, RelationshipState, SuggestedAction, TrendDirection};
use chrono::{DateTime, Utc};

/// Trend percent below which a meetup is suggested.
pub const MEETUP_TREND_THRESHOLD: f64 = -40.0;

/// Initiation ratio above which outreach pressure should drop.
pub const OUTREACH_PRESSURE_THRESHOLD: f64 = 70.0;

/// The five bounded sub-scores, each in 0-100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub recency: f64,
    pub frequency: f64,
    pub reciprocity: f64,
    pub trend: f64,
    pub response: f64,
}

impl SubScores {
    /// Compute every sub-score from derived statistics.
    pub fn compute(metrics: &ContactMetrics, config: &ScoringConfig) -> Self {
        Self {
            recency: recency_score(metrics.days_since, config.recency_decay_per_day),
            frequency: frequency_score(metrics.last30, metrics.total, config.frequency_multiplier),
            reciprocity: reciprocity_score(metrics.initiation_ratio, config.reciprocity_penalty),
            trend: trend_score(metrics.trend_percent),
            response: response_score(metrics.avg_response_delay),
        }
    }

    /// Weighted sum, not yet rounded or clamped.
    pub fn weighted(&self, weights: &ScoringWeights) -> f64 {
        weights.recency_weight * self.recency
            + weights.frequency_weight * self.frequency
            + weights.reciprocity_weight * self.reciprocity
            + weights.trend_weight * self.trend
            + weights.response_weight * self.response
    }
}

/// 100 at zero days, losing `per_day` points per day, floored at 0.
pub fn recency_score(days: u32, per_day: f64) -> f64 {
    (100.0 - days as f64 * per_day).clamp(0.0, 100.0)
}

/// Recent share of all interactions, scaled by `multiplier` and capped at 100.
pub fn frequency_score(last30: u32, total: u32, multiplier: f64) -> f64 {
    let total = total.max(1) as f64;
    (last30 as f64 / total * multiplier).clamp(0.0, 100.0)
}

/// Penalizes one-sided initiation symmetrically around 50%.
pub fn reciprocity_score(initiation_ratio: f64, penalty: f64) -> f64 {
    (100.0 - (initiation_ratio - 50.0).abs() * penalty).clamp(0.0, 100.0)
}

/// Step function of the trend percent; flat trends land on 50.
pub fn trend_score(trend_percent: f64) -> f64 {
    if trend_percent > 50.0 {
        100.0
    } else if trend_percent > 10.0 {
        75.0
    } else if trend_percent >= -10.0 {
        50.0
    } else if trend_percent >= -50.0 {
        25.0
    } else {
        0.0
    }
}

/// Step function of mean reply delay in hours; faster is better.
///
/// The no-alternation sentinel falls into the slowest bucket.
pub fn response_score(avg_delay_hours: f64) -> f64 {
    if avg_delay_hours <= 12.0 {
        100.0
    } else if avg_delay_hours <= 24.0 {
        80.0
    } else if avg_delay_hours <= 48.0 {
        60.0
    } else if avg_delay_hours <= 100.0 {
        40.0
    } else {
        20.0
    }
}

/// Round and clamp a raw score into 0-100. Non-finite input becomes 0.
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_finite() {
        raw.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Pick exactly one action.
///
/// Rules are checked in priority order and the first match wins:
/// 1. trend below -40% → plan a meetup
/// 2. initiation above 70% → reduce outreach pressure
/// 3. At Risk → high priority re-engagement
/// 4. Drifting → light check-in
/// 5. otherwise → maintain
pub fn suggest_action(
    state: RelationshipState,
    initiation_ratio: f64,
    trend_percent: f64,
) -> SuggestedAction {
    if trend_percent < MEETUP_TREND_THRESHOLD {
        SuggestedAction::PlanMeetup
    } else if initiation_ratio > OUTREACH_PRESSURE_THRESHOLD {
        SuggestedAction::ReduceOutreach
    } else {
        state_action(state)
    }
}

/// Action keyed on state alone.
pub fn state_action(state: RelationshipState) -> SuggestedAction {
    match state {
        RelationshipState::AtRisk => SuggestedAction::ReEngage,
        RelationshipState::Drifting => SuggestedAction::LightCheckIn,
        RelationshipState::Thriving | RelationshipState::Stable => SuggestedAction::Maintain,
    }
}

/// Replace a non-finite metric with its sentinel, logging the substitution.
pub(crate) fn finite_or(value: f64, sentinel: f64, metric: &str, contact: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!(contact, metric, value, sentinel, "Degenerate metric replaced");
        sentinel
    }
}

/// Score derived statistics into a full analysis.
///
/// `health_override` replaces the computed weighted score (e.g. a health
/// value supplied by an upstream service); it is still clamped and
/// re-classified with the same thresholds.
pub fn assess(
    metrics: &ContactMetrics,
    engagement: EngagementStats,
    config: &ScoringConfig,
    health_override: Option<f64>,
) -> ContactAnalysis {
    let name = metrics.name.as_str();
    let trend_percent = finite_or(metrics.trend_percent, 0.0, "trend_percent", name);
    let initiation_ratio =
        finite_or(metrics.initiation_ratio, 50.0, "initiation_ratio", name).clamp(0.0, 100.0);
    let avg_response_delay = finite_or(
        metrics.avg_response_delay,
        NO_ALTERNATION_DELAY_HOURS,
        "avg_response_delay",
        name,
    )
    .max(0.0);

    let sanitized = ContactMetrics {
        trend_percent,
        initiation_ratio,
        avg_response_delay,
        ..metrics.clone()
    };

    let raw = match health_override {
        Some(supplied) => finite_or(supplied, 0.0, "health", name),
        None => SubScores::compute(&sanitized, config).weighted(&config.weights),
    };
    let health_score = clamp_score(raw);
    let state = RelationshipState::from_score(health_score);

    ContactAnalysis {
        name: metrics.name.clone(),
        days_since_last_interaction: metrics.days_since,
        interaction_count_last30: metrics.last30,
        interaction_count_prev30: metrics.prev30,
        frequency_trend_percent: trend_percent.round() as i64,
        initiation_ratio: initiation_ratio.round() as u32,
        avg_response_delay: avg_response_delay.round().min(u32::MAX as f64) as u32,
        health_score,
        state,
        suggested_action: suggest_action(state, initiation_ratio, trend_percent),
        trend_direction: TrendDirection::from_percent(trend_percent),
        conversations_you_started: engagement.conversations_you_started,
        conversations_they_started: engagement.conversations_they_started,
        one_word_replies_percent: engagement.one_word_replies_percent,
        emoji_only_replies_percent: engagement.emoji_only_replies_percent,
    }
}

/// Order analyses by descending health score, ties by ascending name.
pub fn sort_by_health(analyses: &mut [ContactAnalysis]) {
    analyses.sort_by(|a, b| {
        b.health_score
            .cmp(&a.health_score)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Run the full engine over a batch of events.
///
/// `as_of` is read once and shared by every contact so that window counts
/// are mutually consistent. Fails with [`crate::Error::MalformedInput`] if
/// any event lacks the self identity, or [`crate::Error::Config`] if the
/// policy is invalid.
pub fn analyze_relationships(
    events: &[Event],
    as_of: DateTime<Utc>,
    policy: &AnalysisPolicy,
) -> Result<Vec<ContactAnalysis>> {
    policy.validate()?;

    let threads = group_by_contact(events, &policy.self_identity)?;

    let mut analyses: Vec<ContactAnalysis> = threads
        .iter()
        .map(|thread| {
            let metrics = ContactMetrics::from_thread(thread, as_of, &policy.self_identity);
            let engagement = EngagementStats::from_thread(
                thread,
                &policy.self_identity,
                policy.conversation_gap_hours,
            );
            assess(&metrics, engagement, &policy.scoring, None)
        })
        .collect();

    sort_by_health(&mut analyses);

    tracing::info!(
        events = events.len(),
        contacts = analyses.len(),
        as_of = %as_of,
        "Analyzed relationships"
    );
    Ok(analyses)
}
