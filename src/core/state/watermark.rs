//! Watermark model for tracking export state
//!
//! A watermark is the millisecond timestamp up to which a log group has
//! already been exported. It is stored as its decimal string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Milliseconds since the Unix epoch up to which a log group is exported
///
/// # Examples
///
/// ```
/// use cwlogs_archive::core::state::Watermark;
///
/// let watermark: Watermark = "1642568042037".parse().unwrap();
/// assert_eq!(watermark.as_millis(), 1642568042037);
/// assert_eq!(watermark.to_string(), "1642568042037");
/// assert_eq!(Watermark::ZERO.to_string(), "0");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Watermark(i64);

impl Watermark {
    /// The "never exported" watermark
    pub const ZERO: Watermark = Watermark(0);

    /// Create a watermark from milliseconds since the epoch
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// The current wall-clock time
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Milliseconds since the epoch
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// The watermark as a UTC timestamp, if representable
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Watermark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid watermark '{s}': {e}"))
    }
}

/// Half-open export interval `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportWindow {
    /// Previous watermark, inclusive
    pub from: Watermark,
    /// Current time, exclusive; becomes the next watermark
    pub to: Watermark,
}

impl ExportWindow {
    /// Create a window
    pub fn new(from: Watermark, to: Watermark) -> Self {
        Self { from, to }
    }

    /// True if the window covers no time
    ///
    /// Happens when the stored watermark is at or ahead of the clock.
    pub fn is_empty(&self) -> bool {
        self.to <= self.from
    }

    /// Length of the window in milliseconds, zero when empty
    pub fn span_millis(&self) -> i64 {
        (self.to.as_millis() - self.from.as_millis()).max(0)
    }
}
