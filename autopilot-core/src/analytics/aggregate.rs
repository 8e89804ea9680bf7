//! Aggregator: groups events into per-contact threads and derives the
//! statistics the scorer consumes.

use crate::error::Result;
use crate::ingest::validate_participants;
use crate::types::Event;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Length of each comparison window.
pub const WINDOW_DAYS: i64 = 30;

/// Average response delay reported when a thread never alternates senders.
pub const NO_ALTERNATION_DELAY_HOURS: f64 = 999.0;

/// Initiation ratio reported for a thread without events.
pub const NEUTRAL_INITIATION_RATIO: f64 = 50.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// All events exchanged with one contact, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactThread {
    pub name: String,
    pub events: Vec<Event>,
}

impl ContactThread {
    /// Latest event, if any.
    pub fn last_event(&self) -> Option<&Event> {
        self.events.last()
    }
}

/// Partition events into one thread per counterpart.
///
/// Threads are returned in ascending name order. Events inside a thread are
/// sorted by timestamp, with sender, receiver and message breaking ties, so
/// any permutation of the same input yields identical threads.
pub fn group_by_contact(events: &[Event], self_identity: &str) -> Result<Vec<ContactThread>> {
    let mut contacts: BTreeMap<&str, Vec<Event>> = BTreeMap::new();

    for (index, event) in events.iter().enumerate() {
        validate_participants(index, &event.sender, &event.receiver, self_identity)?;
        contacts
            .entry(event.contact(self_identity))
            .or_default()
            .push(event.clone());
    }

    let threads: Vec<ContactThread> = contacts
        .into_iter()
        .map(|(name, mut events)| {
            events.sort_by(|a, b| {
                a.timestamp
                    .cmp(&b.timestamp)
                    .then_with(|| a.sender.cmp(&b.sender))
                    .then_with(|| a.receiver.cmp(&b.receiver))
                    .then_with(|| a.message.cmp(&b.message))
            });
            ContactThread {
                name: name.to_string(),
                events,
            }
        })
        .collect();

    tracing::debug!(
        events = events.len(),
        contacts = threads.len(),
        "Grouped events by contact"
    );
    Ok(threads)
}

/// Raw per-contact statistics, before any scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMetrics {
    pub name: String,
    /// Whole days since the latest event, never negative
    pub days_since: u32,
    pub last30: u32,
    pub prev30: u32,
    /// All events in the thread, regardless of window
    pub total: u32,
    /// Signed percentage change of `last30` vs `prev30`
    pub trend_percent: f64,
    /// Percentage of all events sent by self (0-100)
    pub initiation_ratio: f64,
    /// Mean hours between adjacent events with different senders
    pub avg_response_delay: f64,
}

impl ContactMetrics {
    /// Derive statistics for a thread as of a single fixed instant.
    pub fn from_thread(thread: &ContactThread, as_of: DateTime<Utc>, self_identity: &str) -> Self {
        let window = Duration::days(WINDOW_DAYS);
        let last_window_start = as_of - window;
        let prev_window_start = last_window_start - window;

        let days_since = thread
            .last_event()
            .map(|e| whole_days_between(e.timestamp, as_of))
            .unwrap_or(0);

        let last30 = count_in(&thread.events, last_window_start, as_of);
        let prev30 = count_in(&thread.events, prev_window_start, last_window_start);

        let total = thread.events.len();
        let initiation_ratio = if total > 0 {
            let from_self = thread
                .events
                .iter()
                .filter(|e| e.is_from(self_identity))
                .count();
            from_self as f64 / total as f64 * 100.0
        } else {
            NEUTRAL_INITIATION_RATIO
        };

        Self {
            name: thread.name.clone(),
            days_since,
            last30,
            prev30,
            total: u32::try_from(total).unwrap_or(u32::MAX),
            trend_percent: trend_percent(last30, prev30),
            initiation_ratio,
            avg_response_delay: average_response_delay(&thread.events),
        }
    }
}

/// Percentage change between two window counts.
///
/// +100 when only the recent window has activity, 0 when neither does.
pub fn trend_percent(last30: u32, prev30: u32) -> f64 {
    if prev30 > 0 {
        (last30 as f64 - prev30 as f64) / prev30 as f64 * 100.0
    } else if last30 > 0 {
        100.0
    } else {
        0.0
    }
}

/// Mean gap in hours across sender alternations in a chronological slice.
pub fn average_response_delay(events: &[Event]) -> f64 {
    let (total_hours, alternations) = events
        .windows(2)
        .filter(|pair| pair[0].sender != pair[1].sender)
        .fold((0.0, 0u32), |(sum, n), pair| {
            let gap = pair[1].timestamp.signed_duration_since(pair[0].timestamp);
            (sum + gap.num_milliseconds() as f64 / MILLIS_PER_HOUR, n + 1)
        });

    if alternations == 0 {
        NO_ALTERNATION_DELAY_HOURS
    } else {
        total_hours / alternations as f64
    }
}

/// Floor of whole days from `from` to `to`; zero when `from` is in the future.
fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u32 {
    let days = to.signed_duration_since(from).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Count events in the half-open window `[start, end)`.
fn count_in(events: &[Event], start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let count = events
        .iter()
        .filter(|e| e.timestamp >= start && e.timestamp < end)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn event(ts: DateTime<Utc>, sender: &str, receiver: &str) -> Event {
        Event {
            timestamp: ts,
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            message: "msg".to_string(),
        }
    }

    #[test]
    fn test_group_by_contact_sorts_threads() {
        let now = as_of();
        let events = vec![
            event(now - Duration::hours(1), "You", "Bob"),
            event(now - Duration::hours(5), "Alice", "You"),
            event(now - Duration::hours(3), "Bob", "You"),
            event(now - Duration::hours(2), "You", "Alice"),
        ];

        let threads = group_by_contact(&events, "You").unwrap();
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].name, "Alice");
        assert_eq!(threads[1].name, "Bob");
        for thread in &threads {
            assert!(thread
                .events
                .windows(2)
                .all(|w| w[0].timestamp <= w[1].timestamp));
        }
    }

    #[test]
    fn test_grouping_ignores_input_order() {
        let now = as_of();
        let a = event(now - Duration::hours(2), "You", "Alice");
        let b = event(now - Duration::hours(2), "Alice", "You");
        let c = event(now - Duration::days(3), "Alice", "You");

        let forward = group_by_contact(&[a.clone(), b.clone(), c.clone()], "You").unwrap();
        let reversed = group_by_contact(&[c, b, a], "You").unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_group_rejects_foreign_event() {
        let now = as_of();
        let events = vec![
            event(now, "You", "Alice"),
            event(now, "Alice", "Bob"),
        ];
        let err = group_by_contact(&events, "You").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::MalformedInput { index: 1, .. }
        ));
    }

    #[test]
    fn test_windows_are_half_open() {
        let now = as_of();
        let thread = ContactThread {
            name: "Alice".to_string(),
            events: vec![
                event(now - Duration::days(60), "Alice", "You"),
                event(now - Duration::days(30), "You", "Alice"),
                event(now - Duration::days(1), "Alice", "You"),
                event(now, "You", "Alice"),
            ],
        };

        let metrics = ContactMetrics::from_thread(&thread, now, "You");
        // now-30d opens the recent window; `now` itself is outside it
        assert_eq!(metrics.last30, 2);
        // now-60d opens the previous window
        assert_eq!(metrics.prev30, 1);
        assert_eq!(metrics.days_since, 0);
        assert_eq!(metrics.total, 4);
        assert_eq!(metrics.initiation_ratio, 50.0);
    }

    #[test]
    fn test_days_since_floors_and_never_negative() {
        let now = as_of();
        let thread = ContactThread {
            name: "Alice".to_string(),
            events: vec![event(now - Duration::hours(47), "Alice", "You")],
        };
        assert_eq!(ContactMetrics::from_thread(&thread, now, "You").days_since, 1);

        let future = ContactThread {
            name: "Alice".to_string(),
            events: vec![event(now + Duration::days(2), "Alice", "You")],
        };
        assert_eq!(ContactMetrics::from_thread(&future, now, "You").days_since, 0);
    }

    #[test]
    fn test_trend_percent() {
        assert_eq!(trend_percent(15, 10), 50.0);
        assert_eq!(trend_percent(5, 10), -50.0);
        assert_eq!(trend_percent(3, 0), 100.0);
        assert_eq!(trend_percent(0, 0), 0.0);
        assert_eq!(trend_percent(0, 4), -100.0);
    }

    #[test]
    fn test_average_response_delay() {
        let now = as_of();
        let events = vec![
            event(now - Duration::hours(10), "You", "Alice"),
            event(now - Duration::hours(7), "Alice", "You"),
            event(now - Duration::hours(6), "Alice", "You"),
            event(now - Duration::hours(1), "You", "Alice"),
        ];
        // alternations: 3h and 5h
        assert_eq!(average_response_delay(&events), 4.0);
    }

    #[test]
    fn test_one_sided_thread_uses_sentinel() {
        let now = as_of();
        let events = vec![
            event(now - Duration::hours(3), "You", "Alice"),
            event(now - Duration::hours(1), "You", "Alice"),
        ];
        assert_eq!(average_response_delay(&events), NO_ALTERNATION_DELAY_HOURS);
        assert_eq!(average_response_delay(&[]), NO_ALTERNATION_DELAY_HOURS);
    }
}
