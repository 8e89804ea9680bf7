//! Engagement detail: who opens conversations and how terse the contact's
//! replies are. These figures are informational and never scored.

use super::aggregate::ContactThread;
use chrono::Duration;

/// Per-contact engagement detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementStats {
    pub conversations_you_started: u32,
    pub conversations_they_started: u32,
    pub one_word_replies_percent: u32,
    pub emoji_only_replies_percent: u32,
}

impl EngagementStats {
    /// Compute engagement for a chronologically sorted thread.
    ///
    /// A conversation opens at the first event and at every event that
    /// follows at least `gap_hours` of silence; it is credited to that
    /// event's sender. A gap that is not a representable non-negative
    /// duration means only the first event opens a conversation.
    pub fn from_thread(thread: &ContactThread, self_identity: &str, gap_hours: f64) -> Self {
        let gap = conversation_gap(gap_hours);

        let mut you_started = 0u32;
        let mut they_started = 0u32;
        let mut previous = None;
        for event in &thread.events {
            let opens = match previous {
                None => true,
                Some(prev) => {
                    gap.is_some_and(|gap| event.timestamp.signed_duration_since(prev) >= gap)
                }
            };
            if opens {
                if event.is_from(self_identity) {
                    you_started += 1;
                } else {
                    they_started += 1;
                }
            }
            previous = Some(event.timestamp);
        }

        let replies: Vec<&str> = thread
            .events
            .iter()
            .filter(|e| !e.is_from(self_identity))
            .map(|e| e.message.as_str())
            .collect();
        let one_word = replies.iter().filter(|m| is_one_word(m)).count();
        let emoji_only = replies.iter().filter(|m| is_emoji_only(m)).count();

        Self {
            conversations_you_started: you_started,
            conversations_they_started: they_started,
            one_word_replies_percent: percent(one_word, replies.len()),
            emoji_only_replies_percent: percent(emoji_only, replies.len()),
        }
    }
}

/// `None` when the gap is NaN, negative or too large for a [`Duration`].
fn conversation_gap(gap_hours: f64) -> Option<Duration> {
    let millis = gap_hours * 3_600_000.0;
    if millis.is_nan() || millis < 0.0 || millis >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

fn is_one_word(message: &str) -> bool {
    message.split_whitespace().count() == 1
}

fn is_emoji_only(message: &str) -> bool {
    let trimmed = message.trim();
    !trimmed.is_empty() && !trimmed.chars().any(char::is_alphanumeric)
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        (part as f64 / whole as f64 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Event;
    use chrono::{TimeZone, Utc};

    fn event(hours: i64, sender: &str, message: &str) -> Event {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let (sender, receiver) = if sender == "You" {
            ("You", "Alice")
        } else {
            (sender, "You")
        };
        Event {
            timestamp: base + Duration::hours(hours),
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_conversation_starts() {
        let thread = ContactThread {
            name: "Alice".to_string(),
            events: vec![
                event(0, "You", "hey, lunch?"),
                event(1, "Alice", "sure"),
                event(10, "Alice", "running late"),
                event(11, "You", "no worries"),
                event(30, "You", "fun day"),
            ],
        };
        let stats = EngagementStats::from_thread(&thread, "You", 6.0);
        assert_eq!(stats.conversations_you_started, 2);
        assert_eq!(stats.conversations_they_started, 1);
    }

    #[test]
    fn test_reply_shapes() {
        let thread = ContactThread {
            name: "Alice".to_string(),
            events: vec![
                event(0, "You", "how was it?"),
                event(1, "Alice", "great"),
                event(2, "Alice", "😂😂"),
                event(3, "Alice", "we should go again"),
                event(4, "Alice", "!!"),
            ],
        };
        let stats = EngagementStats::from_thread(&thread, "You", 6.0);
        // "great", "😂😂" and "!!" are single tokens
        assert_eq!(stats.one_word_replies_percent, 75);
        assert_eq!(stats.emoji_only_replies_percent, 50);
    }

    #[test]
    fn test_unrepresentable_gap_never_splits() {
        let thread = ContactThread {
            name: "Alice".to_string(),
            events: vec![
                event(0, "You", "hi"),
                event(100, "Alice", "hey"),
                event(900, "You", "still there?"),
            ],
        };
        for gap in [f64::NAN, f64::NEG_INFINITY, -1.0, f64::INFINITY, 1e300] {
            let stats = EngagementStats::from_thread(&thread, "You", gap);
            assert_eq!(stats.conversations_you_started, 1, "gap {gap}");
            assert_eq!(stats.conversations_they_started, 0, "gap {gap}");
        }
    }

    #[test]
    fn test_no_replies() {
        let thread = ContactThread {
            name: "Alice".to_string(),
            events: vec![event(0, "You", "hello?")],
        };
        let stats = EngagementStats::from_thread(&thread, "You", 6.0);
        assert_eq!(stats.one_word_replies_percent, 0);
        assert_eq!(stats.emoji_only_replies_percent, 0);
        assert_eq!(stats.conversations_you_started, 1);
    }
}
