//! Canonical post timestamps.
//!
//! Frontmatter dates arrive as free text in whatever shape the author
//! felt like that morning: `2024-03-05`, `March 5, 2024`, a full RFC
//! 3339 timestamp. [`PostDate::resolve`] normalizes all of them into a
//! single `chrono::NaiveDateTime` at the parse boundary; every rendering
//! (human display, ISO calendar date, RFC-822 feed timestamp, permalink
//! path) derives from that one instant. Nothing downstream ever looks at
//! the original text again, so the sidebar date and the permalink date
//! cannot drift apart.

use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Date-and-time formats tried in order for frontmatter text.
///
/// Ordering matters only for ambiguity between the numeric slash forms;
/// month-first wins, matching the original content this tool was built
/// around.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%m/%d/%Y",
];

/// The single canonical timestamp all display formats derive from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PostDate(NaiveDateTime);

impl PostDate {
    pub fn new(instant: NaiveDateTime) -> Self {
        PostDate(instant)
    }

    /// Resolve an optional frontmatter date into a canonical timestamp.
    ///
    /// Absent input resolves to `now`. Text input is tried against the
    /// flexible format lists; on failure the result is `now` and the
    /// returned flag is `false` so the caller can warn with the source
    /// file in hand. Resolution itself is never fatal.
    pub fn resolve(raw: Option<&str>, now: NaiveDateTime) -> (Self, bool) {
        let Some(text) = raw else {
            return (PostDate(now), true);
        };
        match parse_flexible(text) {
            Some(instant) => (PostDate(instant), true),
            None => (PostDate(now), false),
        }
    }

    /// Long human form, e.g. `June 15, 2024`.
    pub fn display(&self) -> String {
        self.0.format("%B %d, %Y").to_string()
    }

    /// ISO calendar date, e.g. `2024-06-15`.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// RFC-822 timestamp with a fixed UTC offset, for the RSS feed.
    pub fn rfc822(&self) -> String {
        self.0.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
    }

    /// Site-absolute permalink path, e.g. `/2024/06/15/`.
    pub fn permalink(&self) -> String {
        self.0.format("/%Y/%m/%d/").to_string()
    }

    /// Output path of the post page relative to the output root.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(self.0.format("%Y/%m/%d").to_string())
            .join("index.html")
    }
}

fn parse_flexible(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date.and_hms_opt(0, 0, 0).unwrap_or_default());
        }
    }
    None
}
