//! Core domain types for Social Autopilot
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Self** | The fixed identity whose relationships are being assessed (default `"You"`) |
//! | **Contact** | Any counterpart identity that exchanges messages with Self |
//! | **Event** | One timestamped message between Self and a Contact |
//! | **Thread** | All events with one Contact, in chronological order |
//! | **Analysis** | The derived health assessment for one Contact |
//!
//! Field names of [`ContactAnalysis`] serialize in camelCase because that
//! shape is what presentation layers bind to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Events
// ============================================

/// A validated two-party message event.
///
/// Exactly one of `sender`/`receiver` is the self identity; see
/// [`crate::ingest::parse_events`] for how raw records become events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub receiver: String,
    pub message: String,
}

impl Event {
    /// Returns the counterpart identity, i.e. whichever end is not `self_identity`.
    pub fn contact<'a>(&'a self, self_identity: &str) -> &'a str {
        if self.sender == self_identity {
            &self.receiver
        } else {
            &self.sender
        }
    }

    /// Whether this event was sent by `self_identity`.
    pub fn is_from(&self, identity: &str) -> bool {
        self.sender == identity
    }
}

// ============================================
// Classification
// ============================================

/// Discrete relationship state, ordered from healthiest to weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipState {
    Thriving,
    Stable,
    Drifting,
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl RelationshipState {
    /// All states in band order (highest band first).
    pub const ALL: [RelationshipState; 4] = [
        RelationshipState::Thriving,
        RelationshipState::Stable,
        RelationshipState::Drifting,
        RelationshipState::AtRisk,
    ];

    /// Map a clamped health score onto its band.
    ///
    /// Thresholds are inclusive at the lower edge of each band:
    /// `>= 75` Thriving, `>= 50` Stable, `>= 30` Drifting, otherwise At Risk.
    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => RelationshipState::Thriving,
            50..=74 => RelationshipState::Stable,
            30..=49 => RelationshipState::Drifting,
            _ => RelationshipState::AtRisk,
        }
    }

    /// Returns the display name for this state
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipState::Thriving => "Thriving",
            RelationshipState::Stable => "Stable",
            RelationshipState::Drifting => "Drifting",
            RelationshipState::AtRisk => "At Risk",
        }
    }
}

impl std::fmt::Display for RelationshipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of the interaction-frequency trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    /// Width of the dead-band around zero, in percentage points.
    pub const DEAD_BAND: f64 = 10.0;

    /// `Up` above +10%, `Down` below -10%, `Stable` in between (inclusive).
    pub fn from_percent(trend_percent: f64) -> Self {
        if trend_percent > Self::DEAD_BAND {
            TrendDirection::Up
        } else if trend_percent < -Self::DEAD_BAND {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Short directive suggested for a contact.
///
/// Serializes as the human-readable sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestedAction {
    #[serde(rename = "Maintain current engagement")]
    Maintain,
    #[serde(rename = "Send a light check-in")]
    LightCheckIn,
    #[serde(rename = "High priority re-engagement")]
    ReEngage,
    #[serde(rename = "Reduce outreach pressure")]
    ReduceOutreach,
    #[serde(rename = "Plan a meetup")]
    PlanMeetup,
}

impl SuggestedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestedAction::Maintain => "Maintain current engagement",
            SuggestedAction::LightCheckIn => "Send a light check-in",
            SuggestedAction::ReEngage => "High priority re-engagement",
            SuggestedAction::ReduceOutreach => "Reduce outreach pressure",
            SuggestedAction::PlanMeetup => "Plan a meetup",
        }
    }
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================
// Analysis output
// ============================================

/// Relationship-health assessment for one contact.
///
/// Produced fresh by each run; projections such as
/// [`crate::analytics::simulate_no_contact`] return new values instead of
/// mutating these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAnalysis {
    /// Contact identity
    pub name: String,
    /// Whole days between `as_of` and the latest event (never negative)
    pub days_since_last_interaction: u32,
    /// Events in `[as_of - 30d, as_of)`
    pub interaction_count_last30: u32,
    /// Events in `[as_of - 60d, as_of - 30d)`
    pub interaction_count_prev30: u32,
    /// Rounded percentage change of last30 vs prev30 (+100 when prev30 is zero but last30 is not)
    pub frequency_trend_percent: i64,
    /// Rounded percentage of all events sent by self (0-100)
    pub initiation_ratio: u32,
    /// Rounded mean hours between sender alternations (999 when there are none)
    pub avg_response_delay: u32,
    /// Weighted health score, clamped to 0-100
    pub health_score: u8,
    pub state: RelationshipState,
    pub suggested_action: SuggestedAction,
    pub trend_direction: TrendDirection,

    // Engagement detail (informational, never scored)
    /// Conversations opened by self
    #[serde(default)]
    pub conversations_you_started: u32,
    /// Conversations opened by the contact
    #[serde(default)]
    pub conversations_they_started: u32,
    /// Percentage of the contact's messages that are a single word
    #[serde(default)]
    pub one_word_replies_percent: u32,
    /// Percentage of the contact's messages without any alphanumeric content
    #[serde(default)]
    pub emoji_only_replies_percent: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_thresholds() {
        assert_eq!(RelationshipState::from_score(100), RelationshipState::Thriving);
        assert_eq!(RelationshipState::from_score(75), RelationshipState::Thriving);
        assert_eq!(RelationshipState::from_score(74), RelationshipState::Stable);
        assert_eq!(RelationshipState::from_score(50), RelationshipState::Stable);
        assert_eq!(RelationshipState::from_score(49), RelationshipState::Drifting);
        assert_eq!(RelationshipState::from_score(30), RelationshipState::Drifting);
        assert_eq!(RelationshipState::from_score(29), RelationshipState::AtRisk);
        assert_eq!(RelationshipState::from_score(0), RelationshipState::AtRisk);
    }

    #[test]
    fn test_trend_direction_dead_band() {
        assert_eq!(TrendDirection::from_percent(10.5), TrendDirection::Up);
        assert_eq!(TrendDirection::from_percent(10.0), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_percent(-10.0), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_percent(-10.5), TrendDirection::Down);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&RelationshipState::AtRisk).unwrap(),
            "\"At Risk\""
        );
        assert_eq!(
            serde_json::to_string(&TrendDirection::Down).unwrap(),
            "\"down\""
        );
        assert_eq!(
            serde_json::to_string(&SuggestedAction::PlanMeetup).unwrap(),
            "\"Plan a meetup\""
        );
    }

    #[test]
    fn test_event_contact() {
        let event = Event {
            timestamp: Utc::now(),
            sender: "Sarah".to_string(),
            receiver: "You".to_string(),
            message: "hi".to_string(),
        };
        assert_eq!(event.contact("You"), "Sarah");
        assert!(!event.is_from("You"));
    }
}
