//! Mode-aware message routing between this page and its peer window.
//!
//! ARCHITECTURE
//! ============
//! Routing is split into a pure decision (`send_target`,
//! `is_trusted_source`) and a thin `MessageRouter` that applies it through a
//! `MessageChannel`. Window handles are supplied as an `Endpoints` snapshot
//! on every call because the child frame's window changes whenever the frame
//! navigates.
//!
//! TRUST MODEL
//! ===========
//! Inbound events are filtered on source window identity only. There is no
//! origin or payload validation; this is a local testing tool.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails. A missing target is a silent no-op and unparseable
//! text is delivered as a plain string with a logged warning.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use serde_json::Value;

use crate::net::channel::{MessageChannel, Outbound};
use crate::state::session::OperatingMode;
use crate::util::clock;

/// Window handles visible to this page at a point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints<W> {
    /// The page's own window.
    pub this: W,
    /// The parent as reported by the platform. A top-level browser window
    /// reports itself.
    pub parent: Option<W>,
    /// The child frame's content window, once the frame exists.
    pub child: Option<W>,
}

/// What `MessageRouter::send` did with the draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// No peer window to address; nothing was sent.
    NoTarget,
    /// The draft parsed and was sent as structured data.
    Structured,
    /// The draft did not parse and was sent as a plain string.
    PlainText,
}

impl SendOutcome {
    /// Status line text for the compose panel.
    #[must_use]
    pub fn describe(self, mode: OperatingMode) -> String {
        match self {
            Self::NoTarget => format!("No {} to send to", mode.peer_label()),
            Self::Structured => format!("Sent object to {}", mode.peer_label()),
            Self::PlainText => format!("Sent plain string to {}", mode.peer_label()),
        }
    }
}

/// Window that outbound messages go to, if any.
///
/// Host mode addresses only the child; embedded mode addresses only a parent
/// that is distinct from the page itself.
pub fn send_target<W: Clone + PartialEq>(mode: OperatingMode, endpoints: &Endpoints<W>) -> Option<W> {
    match mode {
        OperatingMode::Host => endpoints.child.clone(),
        OperatingMode::Embedded => endpoints
            .parent
            .as_ref()
            .filter(|parent| **parent != endpoints.this)
            .cloned(),
    }
}

/// Whether an inbound event from `source` should be logged.
///
/// Events without a source are never trusted. Embedded mode drops events
/// sourced from the page itself, which covers the case where embedded mode
/// was requested but the page is not actually nested.
pub fn is_trusted_source<W: PartialEq>(mode: OperatingMode, endpoints: &Endpoints<W>, source: Option<&W>) -> bool {
    let Some(source) = source else {
        return false;
    };
    match mode {
        OperatingMode::Host => endpoints.child.as_ref() == Some(source),
        OperatingMode::Embedded => *source != endpoints.this && endpoints.parent.as_ref() == Some(source),
    }
}

/// Coerce draft text into an outbound payload.
///
/// Relaxed JSON becomes structured data; anything else is passed through as
/// the original string.
pub fn coerce_outbound(raw: &str) -> Outbound {
    match relaxed::parse(raw) {
        Ok(value) => Outbound::Structured(value),
        Err(e) => {
            leptos::logging::warn!("message is not relaxed JSON ({e}); sending as plain string");
            Outbound::Text(raw.to_owned())
        }
    }
}

/// Applies the routing rules for one page session.
#[derive(Clone, Copy)]
pub struct MessageRouter<C> {
    mode: OperatingMode,
    channel: C,
    clock: fn() -> String,
}

impl<C: MessageChannel> MessageRouter<C> {
    #[must_use]
    pub fn new(mode: OperatingMode, channel: C) -> Self {
        Self { mode, channel, clock: clock::capture_timestamp }
    }

    /// Replace the timestamp source used for received messages.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Send draft text to the peer window for the current mode.
    pub fn send(&self, endpoints: &Endpoints<C::Window>, raw: &str) -> SendOutcome {
        let Some(target) = send_target(self.mode, endpoints) else {
            return SendOutcome::NoTarget;
        };
        let payload = coerce_outbound(raw);
        let outcome = match payload {
            Outbound::Structured(_) => SendOutcome::Structured,
            Outbound::Text(_) => SendOutcome::PlainText,
        };
        self.channel.post(&target, &payload);
        outcome
    }

    /// Start accepting messages from the trusted peer.
    ///
    /// `endpoints` is resolved per event so a re-navigated child frame is
    /// matched by its current window. `on_message` receives the capture
    /// timestamp and the payload.
    pub fn listen<E, F>(&self, endpoints: E, on_message: F) -> C::Subscription
    where
        E: Fn() -> Option<Endpoints<C::Window>> + 'static,
        F: Fn(String, Value) + 'static,
    {
        let mode = self.mode;
        let clock = self.clock;
        self.channel.on_receive(
            move |source| endpoints().is_some_and(|current| is_trusted_source(mode, &current, source)),
            move |payload| on_message(clock(), payload),
        )
    }
}
