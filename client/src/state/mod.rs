//! Reactive state held in page contexts.

pub mod inbox;
pub mod prefs;
pub mod session;
pub mod ui;
