//! Operator preferences that survive page reloads.
//!
//! DESIGN
//! ======
//! `Preferences` is a plain value held in an `RwSignal` context. Storage is
//! reached only through the `PreferencesStore` port: the page reads once on
//! init and writes after every mutation. The browser implementation lives in
//! `util::persistence`.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use serde::{Deserialize, Serialize};

use crate::util::startup::StartupParams;

/// Persisted operator input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Text currently in the URL bar.
    pub url: String,
    /// Address actually loaded into the child frame.
    pub iframe_url: String,
    /// Draft message in the compose box.
    pub iframe_message: String,
}

impl Preferences {
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_iframe_url(&mut self, url: impl Into<String>) {
        self.iframe_url = url.into();
    }

    pub fn set_iframe_message(&mut self, message: impl Into<String>) {
        self.iframe_message = message.into();
    }

    /// Load the URL bar text into the frame. Blank input is ignored.
    ///
    /// Returns `true` when the loaded address changed.
    pub fn load_url(&mut self) -> bool {
        let trimmed = self.url.trim();
        if trimmed.is_empty() || trimmed == self.iframe_url {
            return false;
        }
        self.iframe_url = trimmed.to_owned();
        true
    }

    /// Seed from startup parameters: an `embedUrl` replaces the URL bar text
    /// and is loaded immediately.
    pub fn apply_startup(&mut self, params: &StartupParams) {
        if let Some(url) = &params.embed_url {
            self.set_url(url.clone());
            self.load_url();
        }
    }

    /// Whether a frame should be rendered for the loaded address.
    #[must_use]
    pub fn has_loaded_url(&self) -> bool {
        !self.iframe_url.trim().is_empty()
    }
}

/// Storage port for [`Preferences`].
pub trait PreferencesStore {
    /// Read the stored record. Missing or unreadable records yield `None`.
    fn load(&self) -> Option<Preferences>;
    /// Replace the stored record.
    fn save(&self, prefs: &Preferences);
}

/// Read preferences from `store`, falling back to defaults.
pub fn restore(store: &impl PreferencesStore) -> Preferences {
    store.load().unwrap_or_default()
}
