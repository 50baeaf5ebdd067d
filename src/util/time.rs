//! Protocol timestamp formatting.

use chrono::{DateTime, Utc};

/// Format an instant in the gateway's `YYYY:MM:DD-HH:MM:SS` layout.
///
/// One-second granularity, always UTC, no offset field.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y:%m:%d-%H:%M:%S").to_string()
}

/// Current UTC instant in the gateway timestamp layout.
pub fn formatted_timestamp() -> String {
    format_timestamp(Utc::now())
}
