//! Canned messages for the compose box.
//!
//! Picking a template replaces the draft with its pretty-printed JSON. The
//! placeholder strings are meant to be edited by hand before sending.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use serde_json::{Value, json};

/// A named draft the operator can start from.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageTemplate {
    pub id: &'static str,
    pub label: &'static str,
    pub value: Value,
}

impl MessageTemplate {
    /// Draft text for the compose box, two-space indented.
    #[must_use]
    pub fn draft_text(&self) -> String {
        serde_json::to_string_pretty(&self.value).unwrap_or_else(|_| self.value.to_string())
    }
}

/// Built-in templates, in display order.
#[must_use]
pub fn builtin_templates() -> Vec<MessageTemplate> {
    vec![
        MessageTemplate {
            id: "open_project",
            label: "Open project",
            value: json!({
                "action": "open_project",
                "payload": { "projectId": "<PROJECT UUID>" },
            }),
        },
        MessageTemplate {
            id: "open_asset",
            label: "Open source media",
            value: json!({
                "action": "open_asset",
                "payload": {
                    "item": {
                        "title": "My source media",
                        "contentType": "video",
                        "source": { "url": "<SOURCE MEDIA URL>" },
                    },
                },
            }),
        },
    ]
}

/// Look up a built-in template by id.
#[must_use]
pub fn find_template(id: &str) -> Option<MessageTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}
