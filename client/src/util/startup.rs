//! Startup parameters read once from the page query string.
//!
//! SYSTEM CONTEXT
//! ==============
//! `embedUrl` pre-seeds and loads the frame address; `embedded=true` flips
//! the page into embedded mode. Both are read at mount and never again.

#[cfg(test)]
#[path = "startup_test.rs"]
mod startup_test;

use crate::state::session::OperatingMode;

pub const EMBED_URL_PARAM: &str = "embedUrl";
pub const EMBEDDED_PARAM: &str = "embedded";

/// Error returned by [`parse_query`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartupError {
    /// A parameter value is not valid percent-encoded UTF-8.
    #[error("query parameter `{param}` could not be decoded")]
    Decode { param: String },
}

/// Values the page needs before first render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartupParams {
    /// Decoded `embedUrl`, if supplied.
    pub embed_url: Option<String>,
    pub mode: OperatingMode,
}

/// Parse a location search string (`?a=b&c=d`, leading `?` optional).
///
/// The first occurrence of each parameter wins. `+` decodes to a space.
///
/// # Errors
///
/// Returns [`StartupError::Decode`] when a recognised parameter has an
/// undecodable value. Unrecognised parameters are never decoded.
pub fn parse_query(search: &str) -> Result<StartupParams, StartupError> {
    let query = search.strip_prefix('?').unwrap_or(search);

    let mut embed_url: Option<String> = None;
    let mut embedded: Option<String> = None;
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let Ok(key) = decode_component(raw_key) else {
            continue;
        };
        let slot = match key.as_str() {
            EMBED_URL_PARAM => &mut embed_url,
            EMBEDDED_PARAM => &mut embedded,
            _ => continue,
        };
        if slot.is_some() {
            continue;
        }
        let value = decode_component(raw_value).map_err(|()| StartupError::Decode { param: key })?;
        *slot = Some(value);
    }

    Ok(StartupParams { embed_url, mode: OperatingMode::from_embedded_flag(embedded.as_deref()) })
}

fn decode_component(raw: &str) -> Result<String, ()> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| ())
}
