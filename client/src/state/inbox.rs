//! Log of messages accepted from the peer window.
//!
//! DESIGN
//! ======
//! Arrival order is the only order. Entries are never persisted and the log
//! has no cap; it only empties on an explicit clear.

#[cfg(test)]
#[path = "inbox_test.rs"]
mod inbox_test;

use serde_json::Value;

/// One accepted inbound message.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceivedMessage {
    /// Arrival sequence number, unique for the page session.
    pub seq: u64,
    /// Capture-time label, e.g. `14:03:27.512`.
    pub timestamp: String,
    /// Payload exactly as delivered.
    pub payload: Value,
}

impl ReceivedMessage {
    /// Text shown in the log: strings verbatim, everything else as
    /// indented JSON.
    #[must_use]
    pub fn display_payload(&self) -> String {
        match &self.payload {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }

    /// Short type tag for the log entry header.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match &self.payload {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

/// Received-message log.
#[derive(Clone, Debug, Default)]
pub struct InboxState {
    messages: Vec<ReceivedMessage>,
    next_seq: u64,
}

impl InboxState {
    /// Append a message and return its sequence number.
    pub fn push(&mut self, timestamp: String, payload: Value) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.messages.push(ReceivedMessage { seq, timestamp, payload });
        seq
    }

    /// Drop every entry. Sequence numbers keep counting so list keys stay
    /// unique across clears.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[must_use]
    pub fn messages(&self) -> &[ReceivedMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
