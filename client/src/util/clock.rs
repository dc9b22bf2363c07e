//! Capture-time labels for received messages.
//!
//! `chrono::Local` reads the host timezone natively and the browser's
//! `Date` under wasm, so both builds label messages in local time.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

const CLOCK_FORMAT: &str = "%H:%M:%S%.3f";

/// Current local wall-clock time as `HH:MM:SS.mmm`.
pub fn capture_timestamp() -> String {
    clock_label(&Local::now())
}

/// Time-of-day label for `at` in its own timezone.
#[must_use]
pub fn clock_label<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(CLOCK_FORMAT).to_string()
}
