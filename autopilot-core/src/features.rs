//! Adapter for feature bundles returned by the upstream extraction service.
//!
//! The service reports per-contact (or per-group) statistics instead of raw
//! events. Each bundle entry is mapped onto the same [`ContactAnalysis`]
//! contract as the live engine: a supplied health value is clamped and
//! re-classified, and a missing one is recomputed from the supplied
//! statistics. Group entries sum their members' counts.

use crate::analytics::aggregate::{trend_percent, ContactMetrics, NO_ALTERNATION_DELAY_HOURS};
use crate::analytics::score::{assess, sort_by_health};
use crate::analytics::EngagementStats;
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::types::ContactAnalysis;
use serde::Deserialize;

/// Day count assumed when a bundle does not report recency.
pub const UNKNOWN_DAYS_SINCE: u32 = 999;

/// Top-level response of the feature service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureBundle {
    #[serde(default)]
    pub contacts: Vec<ContactFeatures>,
}

/// Statistics for one contact, or a group when `members` is non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactFeatures {
    pub name: String,
    /// Health computed upstream, any scale; clamped to 0-100
    #[serde(default)]
    pub health: Option<f64>,
    #[serde(default)]
    pub days_since_last: Option<u32>,
    #[serde(default)]
    pub messages_last30: u32,
    #[serde(default)]
    pub messages_prev30: u32,
    /// All messages ever; defaults to `messages_last30 + messages_prev30`
    #[serde(default)]
    pub messages_total: Option<u32>,
    #[serde(default)]
    pub initiation_percent: Option<f64>,
    /// Share of sessions opened by self; used when `initiation_percent` is absent
    #[serde(default)]
    pub session_start_percent: Option<f64>,
    #[serde(default)]
    pub avg_response_hours: Option<f64>,
    #[serde(default)]
    pub members: Vec<ContactFeatures>,
}

impl FeatureBundle {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Map every entry onto the analysis contract, sorted by health.
    pub fn into_analyses(self, config: &ScoringConfig) -> Result<Vec<ContactAnalysis>> {
        config.validate()?;
        let mut analyses: Vec<ContactAnalysis> = self
            .contacts
            .iter()
            .map(|features| features.to_analysis(config))
            .collect();
        sort_by_health(&mut analyses);
        Ok(analyses)
    }
}

impl ContactFeatures {
    fn total(&self) -> u32 {
        self.messages_total
            .unwrap_or_else(|| self.messages_last30.saturating_add(self.messages_prev30))
    }

    fn initiation(&self) -> Option<f64> {
        self.initiation_percent.or(self.session_start_percent)
    }

    /// Fold group members into a single entry; plain contacts are returned as-is.
    ///
    /// Counts are summed, recency is the most recent member's, initiation is
    /// weighted by member volume and response delay is averaged over members
    /// that report one. A health value on the group itself wins.
    pub fn merged(&self) -> ContactFeatures {
        if self.members.is_empty() {
            return self.clone();
        }
        let members: Vec<ContactFeatures> = self.members.iter().map(|m| m.merged()).collect();

        let sum = |f: fn(&ContactFeatures) -> u32| {
            members.iter().map(f).fold(0u32, |acc, n| acc.saturating_add(n))
        };
        let total = sum(|m| m.total());

        let weighted: Vec<(f64, f64)> = members
            .iter()
            .filter_map(|m| m.initiation().map(|pct| (pct, m.total() as f64)))
            .collect();
        let weight: f64 = weighted.iter().map(|(_, w)| w).sum();
        let initiation_percent = if weight > 0.0 {
            Some(weighted.iter().map(|(pct, w)| pct * w).sum::<f64>() / weight)
        } else if !weighted.is_empty() {
            Some(weighted.iter().map(|(pct, _)| pct).sum::<f64>() / weighted.len() as f64)
        } else {
            None
        };

        let delays: Vec<f64> = members.iter().filter_map(|m| m.avg_response_hours).collect();
        let avg_response_hours = if delays.is_empty() {
            None
        } else {
            Some(delays.iter().sum::<f64>() / delays.len() as f64)
        };

        ContactFeatures {
            name: self.name.clone(),
            health: self.health,
            days_since_last: members.iter().filter_map(|m| m.days_since_last).min(),
            messages_last30: sum(|m| m.messages_last30),
            messages_prev30: sum(|m| m.messages_prev30),
            messages_total: Some(total),
            initiation_percent,
            session_start_percent: None,
            avg_response_hours,
            members: Vec::new(),
        }
    }

    /// Convert into statistics the scorer understands.
    pub fn to_metrics(&self) -> ContactMetrics {
        let merged = self.merged();
        ContactMetrics {
            name: merged.name.clone(),
            days_since: merged.days_since_last.unwrap_or(UNKNOWN_DAYS_SINCE),
            last30: merged.messages_last30,
            prev30: merged.messages_prev30,
            total: merged.total(),
            trend_percent: trend_percent(merged.messages_last30, merged.messages_prev30),
            initiation_ratio: merged.initiation().unwrap_or(50.0),
            avg_response_delay: merged
                .avg_response_hours
                .unwrap_or(NO_ALTERNATION_DELAY_HOURS),
        }
    }

    pub fn to_analysis(&self, config: &ScoringConfig) -> ContactAnalysis {
        assess(
            &self.to_metrics(),
            EngagementStats::default(),
            config,
            self.merged().health,
        )
    }
}
