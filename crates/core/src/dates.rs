//! Human-readable dates shown next to listings.

use crate::types::Timestamp;

/// Format a timestamp the way listings display it, e.g. `October 18, 2026`.
pub fn display_date(ts: &Timestamp) -> String {
    ts.format("%B %-d, %Y").to_string()
}
