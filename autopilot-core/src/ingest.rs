//! Event ingestion
//!
//! Turns caller-supplied [`RawEvent`] records into validated [`Event`]s.
//! Any defect rejects the entire batch with [`Error::MalformedInput`] so that
//! callers never act on a silently truncated log.

use crate::error::{Error, Result};
use crate::timestamp::parse_timestamp;
use crate::types::Event;
use serde::{Deserialize, Serialize};

/// An event record as it arrives from an export (timestamp still textual).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub timestamp: String,
    pub sender: String,
    pub receiver: String,
    #[serde(default)]
    pub message: String,
}

impl RawEvent {
    pub fn new(
        timestamp: impl Into<String>,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            sender: sender.into(),
            receiver: receiver.into(),
            message: message.into(),
        }
    }
}

/// Validate and convert a batch of raw records.
///
/// Fails on the first record that has an unparseable timestamp, an empty
/// sender or receiver, or no end equal to `self_identity`. The error carries
/// the record's index in `raw`.
pub fn parse_events(raw: &[RawEvent], self_identity: &str) -> Result<Vec<Event>> {
    let mut events = Vec::with_capacity(raw.len());

    for (index, record) in raw.iter().enumerate() {
        let timestamp = parse_timestamp(&record.timestamp).ok_or_else(|| {
            Error::malformed(
                index,
                format!("unparseable timestamp {:?}", record.timestamp),
            )
        })?;

        let sender = record.sender.trim();
        let receiver = record.receiver.trim();
        validate_participants(index, sender, receiver, self_identity)?;

        events.push(Event {
            timestamp,
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            message: record.message.clone(),
        });
    }

    tracing::debug!(count = events.len(), "Parsed events");
    Ok(events)
}

/// Check that both ends are present and exactly the self identity is one of them.
///
/// Events with self at both ends are not rejected here; they are the
/// caller's responsibility.
pub(crate) fn validate_participants(
    index: usize,
    sender: &str,
    receiver: &str,
    self_identity: &str,
) -> Result<()> {
    if sender.is_empty() {
        return Err(Error::malformed(index, "missing sender"));
    }
    if receiver.is_empty() {
        return Err(Error::malformed(index, "missing receiver"));
    }
    if sender != self_identity && receiver != self_identity {
        return Err(Error::malformed(
            index,
            format!(
                "neither {:?} nor {:?} is the self identity {:?}",
                sender, receiver, self_identity
            ),
        ));
    }
    Ok(())
}
