//! Display helpers for timeline labels and tooltips.

use chrono::{DateTime, Utc};
use decisionline_core::TimelineEvent;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const SHORT_PATTERN: &str = "%b %-d, %Y";
const LONG_PATTERN: &str = "%b %-d, %Y %H:%M";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pattern", rename_all = "snake_case")]
pub enum DateStyle {
    #[default]
    Short,
    Long,
    /// chrono strftime pattern
    Custom(String),
}

impl DateStyle {
    fn pattern(&self) -> &str {
        match self {
            Self::Short => SHORT_PATTERN,
            Self::Long => LONG_PATTERN,
            Self::Custom(pattern) => pattern,
        }
    }
}

/// An unusable custom pattern falls back to the long style.
pub fn format_timestamp(ts: DateTime<Utc>, style: &DateStyle) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.format(style.pattern())).is_ok() {
        return out;
    }
    tracing::debug!(pattern = style.pattern(), "invalid date pattern");
    ts.format(LONG_PATTERN).to_string()
}

pub fn event_label(event: &TimelineEvent) -> String {
    let kind = event.kind.label();
    let title = event.title.trim();
    let author = event.author.trim();
    if !title.is_empty() {
        format!("{kind}: {title}")
    } else if !author.is_empty() {
        format!("{kind}: {author}")
    } else {
        kind.to_string()
    }
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let flattened = text.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut truncated: String = flattened.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
