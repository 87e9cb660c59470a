use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Document,
    Message,
    Email,
    Decision,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Document,
        EventType::Message,
        EventType::Email,
        EventType::Decision,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Message => "message",
            Self::Email => "email",
            Self::Decision => "decision",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Message => "Message",
            Self::Email => "Email",
            Self::Decision => "Decision",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "document" => Some(Self::Document),
            "message" => Some(Self::Message),
            "email" => Some(Self::Email),
            "decision" => Some(Self::Decision),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension payload carried alongside an event.
///
/// Passed through untouched: nothing in the layout core reads it, so producers
/// and renderers can agree on its shape without involving this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EventMetadata(pub serde_json::Value);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: EventId,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub related_events: Vec<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

impl TimelineEvent {
    pub fn new(id: impl Into<String>, kind: EventType, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: EventId::new(id),
            kind,
            timestamp,
            title: String::new(),
            author: String::new(),
            content: String::new(),
            source_url: None,
            related_events: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_related<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_events = ids.into_iter().map(EventId::new).collect();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionFactor {
    pub id: String,
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub description: String,
}

impl DecisionFactor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight,
            description: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_decodes_wire_shape() {
        let raw = r#"{
            "id": "e1",
            "type": "email",
            "timestamp": "2024-03-01T12:00:00Z",
            "title": "Invoice follow-up",
            "author": "dana",
            "content": "see attached",
            "sourceUrl": "https://mail.example/e1",
            "relatedEvents": ["d7", "missing"],
            "metadata": {"thread": 42}
        }"#;

        let event: TimelineEvent = serde_json::from_str(raw).expect("decode event");
        assert_eq!(event.id, EventId::from("e1"));
        assert_eq!(event.kind, EventType::Email);
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(event.source_url.as_deref(), Some("https://mail.example/e1"));
        assert_eq!(event.related_events.len(), 2);
        assert_eq!(
            event.metadata,
            Some(EventMetadata(serde_json::json!({"thread": 42})))
        );
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let raw = r#"{"id":"d1","type":"decision","timestamp":"2024-01-01T00:00:00Z"}"#;
        let event: TimelineEvent = serde_json::from_str(raw).expect("decode event");
        assert!(event.related_events.is_empty());
        assert!(event.title.is_empty());
        assert!(event.metadata.is_none());
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let raw = r#"{"id":"x","type":"fax","timestamp":"2024-01-01T00:00:00Z"}"#;
        let decoded: Result<TimelineEvent, _> = serde_json::from_str(raw);
        assert!(decoded.is_err());
    }

    #[test]
    fn event_type_parse_matches_wire_names() {
        for kind in EventType::ALL {
            assert_eq!(EventType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EventType::parse(" EMAIL "), Some(EventType::Email));
        assert_eq!(EventType::parse("memo"), None);
    }
}
