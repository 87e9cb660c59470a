use chrono::{DateTime, Utc};
use decisionline_core::{EventType, TimelineEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive on both ends. A reversed range matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// Criteria are ANDed; an absent (or empty) criterion does not constrain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub types: BTreeSet<EventType>,
    pub date_range: Option<DateRange>,
    pub search_query: Option<String>,
}

impl FilterCriteria {
    pub fn with_types<I: IntoIterator<Item = EventType>>(mut self, types: I) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.date_range.is_none() && self.normalized_query().is_none()
    }

    fn normalized_query(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
    }

    pub fn matches(&self, event: &TimelineEvent) -> bool {
        self.matches_with(event, self.normalized_query().as_deref())
    }

    fn matches_with(&self, event: &TimelineEvent, query: Option<&str>) -> bool {
        if !self.types.is_empty() && !self.types.contains(&event.kind) {
            return false;
        }
        if let Some(range) = &self.date_range {
            if !range.contains(event.timestamp) {
                return false;
            }
        }
        match query {
            Some(q) => searchable_text(event).contains(q),
            None => true,
        }
    }
}

fn searchable_text(event: &TimelineEvent) -> String {
    format!("{} {} {}", event.title, event.content, event.author).to_lowercase()
}

pub fn filter_events(events: &[TimelineEvent], criteria: &FilterCriteria) -> Vec<TimelineEvent> {
    let query = criteria.normalized_query();
    let kept: Vec<TimelineEvent> = events
        .iter()
        .filter(|event| criteria.matches_with(event, query.as_deref()))
        .cloned()
        .collect();
    tracing::trace!(input = events.len(), kept = kept.len(), "events filtered");
    kept
}
