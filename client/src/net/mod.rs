//! Cross-document messaging.
//!
//! SYSTEM CONTEXT
//! ==============
//! `channel` defines the transport seam, `router` holds the mode-aware
//! routing rules, and `browser` backs both with the live window.

pub mod browser;
pub mod channel;
pub mod router;
