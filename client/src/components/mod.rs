//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the tester chrome while reading/writing shared state
//! from Leptos context providers.

pub mod compose_panel;
pub mod divider;
pub mod frame_pane;
pub mod inbox_panel;
pub mod url_bar;
