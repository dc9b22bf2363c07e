//! Browser `localStorage` adapter for operator preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! One record under [`PREFERENCES_KEY`] holds the whole preference set inside
//! a versioned envelope. Encoding is pure so it can be tested off-browser;
//! only [`LocalStorageStore`] touches web-sys.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort. Quota errors and private-mode failures are logged
//! and dropped, and SSR paths no-op.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use serde::{Deserialize, Serialize};

use crate::state::prefs::{Preferences, PreferencesStore};

/// Storage key for the preference record.
pub const PREFERENCES_KEY: &str = "embed-app-storage";

/// Envelope schema version written by this build.
pub const RECORD_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    state: Preferences,
    #[serde(default)]
    version: u32,
}

/// Serialize preferences into the stored envelope.
#[must_use]
pub fn encode_record(prefs: &Preferences) -> String {
    let record = PersistedRecord { state: prefs.clone(), version: RECORD_VERSION };
    serde_json::to_string(&record).unwrap_or_default()
}

/// Parse a stored envelope. Corrupt or foreign-version records yield `None`.
#[must_use]
pub fn decode_record(raw: &str) -> Option<Preferences> {
    let record: PersistedRecord = serde_json::from_str(raw).ok()?;
    (record.version == RECORD_VERSION).then_some(record.state)
}

/// [`PreferencesStore`] backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl PreferencesStore for LocalStorageStore {
    fn load(&self) -> Option<Preferences> {
        #[cfg(feature = "hydrate")]
        {
            let raw = local_storage()?.get_item(PREFERENCES_KEY).ok().flatten()?;
            let prefs = decode_record(&raw);
            if prefs.is_none() {
                leptos::logging::warn!("ignoring unreadable `{PREFERENCES_KEY}` record");
            }
            prefs
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, prefs: &Preferences) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.set_item(PREFERENCES_KEY, &encode_record(prefs)).is_err() {
                leptos::logging::warn!("failed to write `{PREFERENCES_KEY}` to localStorage");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = prefs;
        }
    }
}
