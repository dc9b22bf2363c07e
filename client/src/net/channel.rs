//! Transport seam for cross-document messaging.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router never touches browser windows directly. It talks to a
//! `MessageChannel`, which the page backs with `window.postMessage` and the
//! window `message` event, and which tests back with fake windows.

use serde_json::Value;

/// Payload handed to the transport for delivery.
#[derive(Clone, Debug, PartialEq)]
pub enum Outbound {
    /// Parsed structured data, delivered as a structured clone.
    Structured(Value),
    /// Raw text that did not parse, delivered as a plain string.
    Text(String),
}

impl Outbound {
    /// The value the receiving window observes.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Structured(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }
}

/// Cross-document messaging capability.
pub trait MessageChannel {
    /// Handle to a window the channel can address or compare.
    type Window: Clone + PartialEq;
    /// Registration handle for an inbound listener. Dropping or removing it
    /// ends delivery.
    type Subscription;

    /// Fire-and-forget delivery to `target` with a wildcard origin.
    fn post(&self, target: &Self::Window, payload: &Outbound);

    /// Register a listener. `accept` sees the declared source window of each
    /// inbound event (`None` when the event carries no source); `handler`
    /// receives payloads of accepted events only.
    fn on_receive<A, H>(&self, accept: A, handler: H) -> Self::Subscription
    where
        A: Fn(Option<&Self::Window>) -> bool + 'static,
        H: Fn(Value) + 'static;
}
