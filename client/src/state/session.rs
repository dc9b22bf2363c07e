//! Operating mode for the current page session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The mode is decided once from the startup query string and never changes
//! for the lifetime of the page. Switching modes means reloading with
//! different parameters.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Which side of the frame relationship this instance plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperatingMode {
    /// This page owns a child frame and talks to it.
    #[default]
    Host,
    /// This page is itself the child and talks to its parent.
    Embedded,
}

impl OperatingMode {
    /// Resolve the mode from the raw `embedded` query value. Only the literal
    /// `true` selects embedded mode.
    #[must_use]
    pub fn from_embedded_flag(raw: Option<&str>) -> Self {
        if raw == Some("true") { Self::Embedded } else { Self::Host }
    }

    #[must_use]
    pub fn is_embedded(self) -> bool {
        self == Self::Embedded
    }

    /// Short name of the window this mode exchanges messages with.
    #[must_use]
    pub fn peer_label(self) -> &'static str {
        match self {
            Self::Host => "iframe",
            Self::Embedded => "parent",
        }
    }

    /// Badge text shown in the side panel.
    #[must_use]
    pub fn badge(self) -> &'static str {
        match self {
            Self::Host => "Host mode",
            Self::Embedded => "Embedded mode",
        }
    }
}
