//! Alert dispatch over an injected messaging channel.
//!
//! The crate never opens a mail session itself. The caller connects the
//! channel (authentication and transport are its concern), lends it to
//! [`dispatch_alerts`] for one invocation, and drops it afterwards; the
//! borrow ends when dispatch returns, on every exit path. Within one
//! invocation each unique address is attempted exactly once, a failed send
//! never aborts the rest of the batch, and there are no retries.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

/// A channel-level delivery failure for a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("send failed: {reason}")]
pub struct SendError {
    /// What the channel reported.
    pub reason: String,
}

impl SendError {
    /// Wrap a channel failure description.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// An outbound messaging channel, already connected and authenticated.
pub trait MessageChannel {
    /// Deliver one message. Timeouts are the channel's concern and surface
    /// here like any other failure.
    fn send(&mut self, address: &str, subject: &str, body: &str) -> Result<(), SendError>;
}

impl<F> MessageChannel for F
where
    F: FnMut(&str, &str, &str) -> Result<(), SendError>,
{
    fn send(&mut self, address: &str, subject: &str, body: &str) -> Result<(), SendError> {
        self(address, subject, body)
    }
}

/// Terminal state of one recipient's alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The channel accepted the message.
    Sent,
    /// The channel rejected the message; no retry is attempted.
    Failed(SendError),
}

/// Per-recipient outcome of one dispatch invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    /// The recipient address.
    pub address: String,
    /// What happened to it.
    pub outcome: DispatchOutcome,
}

impl DispatchResult {
    /// Whether the alert reached the channel.
    pub fn is_sent(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Sent)
    }
}

/// The fixed alert sent to every contact of an index case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    /// Message subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl AlertMessage {
    /// Build the alert for contacts of `index_identity`.
    pub fn for_index_case(index_identity: &str) -> Self {
        Self {
            subject: "Health Contact Alert".to_string(),
            body: format!(
                "Dear User,\n\nYou have been identified as a close contact of {index_identity} \
                 who has been affected by the flu virus. Please take necessary precautions \
                 and stay alert.\n\nStay safe!"
            ),
        }
    }
}

/// Send one alert per unique address, reporting per-recipient outcomes.
///
/// Addresses are deduplicated case-sensitively in first-encounter order;
/// duplicates later in the sequence are skipped entirely, so the returned
/// vector has exactly one entry per unique input address. A failure is
/// recorded in that entry and processing continues with the next address.
pub fn dispatch_alerts<C: MessageChannel>(
    channel: &mut C,
    addresses: &[String],
    index_identity: &str,
) -> Vec<DispatchResult> {
    let message = AlertMessage::for_index_case(index_identity);

    let mut attempted: HashSet<&str> = HashSet::new();
    let mut results = Vec::new();

    for address in addresses {
        if !attempted.insert(address.as_str()) {
            continue;
        }

        let outcome = match channel.send(address, &message.subject, &message.body) {
            Ok(()) => {
                debug!(address = address.as_str(), "alert sent");
                DispatchOutcome::Sent
            }
            Err(err) => {
                warn!(
                    address = address.as_str(),
                    reason = err.reason.as_str(),
                    "alert delivery failed"
                );
                DispatchOutcome::Failed(err)
            }
        };

        results.push(DispatchResult {
            address: address.clone(),
            outcome,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_send_per_unique_address() {
        let mut sent = Vec::new();
        let mut channel = |address: &str, _: &str, _: &str| -> Result<(), SendError> {
            sent.push(address.to_string());
            Ok(())
        };

        let results = dispatch_alerts(
            &mut channel,
            &addrs(&["a@x.com", "b@x.com", "a@x.com", "b@x.com"]),
            "Alice",
        );

        assert_eq!(sent, vec!["a@x.com", "b@x.com"]);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(DispatchResult::is_sent));
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let mut channel = |address: &str, _: &str, _: &str| -> Result<(), SendError> {
            if address == "b@x.com" {
                Err(SendError::new("mailbox unavailable"))
            } else {
                Ok(())
            }
        };

        let results = dispatch_alerts(
            &mut channel,
            &addrs(&["a@x.com", "b@x.com", "c@x.com"]),
            "Alice",
        );

        assert_eq!(results.len(), 3);
        assert!(results[0].is_sent());
        assert_eq!(
            results[1].outcome,
            DispatchOutcome::Failed(SendError::new("mailbox unavailable"))
        );
        assert!(results[2].is_sent());
    }

    #[test]
    fn test_duplicate_skipped_then_failure_recorded() {
        // First send succeeds, the duplicate is skipped without a second
        // attempt, the third address fails: two results, not three.
        let mut calls = 0;
        let mut channel = |address: &str, _: &str, _: &str| -> Result<(), SendError> {
            calls += 1;
            if address == "b@x.com" {
                Err(SendError::new("rejected"))
            } else {
                Ok(())
            }
        };

        let results = dispatch_alerts(
            &mut channel,
            &addrs(&["a@x.com", "a@x.com", "b@x.com"]),
            "Alice",
        );

        assert_eq!(calls, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].address, "a@x.com");
        assert!(results[0].is_sent());
        assert_eq!(results[1].address, "b@x.com");
        assert!(!results[1].is_sent());
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut sent = Vec::new();
        let mut channel = |address: &str, _: &str, _: &str| -> Result<(), SendError> {
            sent.push(address.to_string());
            Ok(())
        };

        dispatch_alerts(&mut channel, &addrs(&["A@x.com", "a@x.com"]), "Alice");
        assert_eq!(sent.len(), 2);
    }

    #[test]
    fn test_message_references_index_case() {
        let mut captured = Vec::new();
        let mut channel = |_: &str, subject: &str, body: &str| -> Result<(), SendError> {
            captured.push((subject.to_string(), body.to_string()));
            Ok(())
        };

        dispatch_alerts(&mut channel, &addrs(&["a@x.com"]), "Alice");

        let (subject, body) = &captured[0];
        assert_eq!(subject, "Health Contact Alert");
        assert!(body.contains("close contact of Alice"));
    }

    #[test]
    fn test_empty_addresses() {
        let mut channel =
            |_: &str, _: &str, _: &str| -> Result<(), SendError> { panic!("no sends expected") };
        let results = dispatch_alerts(&mut channel, &[], "Alice");
        assert!(results.is_empty());
    }
}
