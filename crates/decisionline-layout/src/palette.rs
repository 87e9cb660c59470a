use decisionline_core::EventType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStyle {
    pub color: String,
    pub icon: String,
}

impl EventStyle {
    pub fn new(color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            icon: icon.into(),
        }
    }
}

/// Color and icon lookup for event types, injected into renderers.
pub trait EventPalette {
    fn style(&self, kind: EventType) -> EventStyle;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPalette;

impl EventPalette for DefaultPalette {
    fn style(&self, kind: EventType) -> EventStyle {
        match kind {
            EventType::Document => EventStyle::new("#3b82f6", "file-text"),
            EventType::Message => EventStyle::new("#10b981", "message-square"),
            EventType::Email => EventStyle::new("#f59e0b", "mail"),
            EventType::Decision => EventStyle::new("#ef4444", "check-circle"),
        }
    }
}

/// Per-type overrides keyed by wire name (`"email"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteTable(BTreeMap<String, EventStyle>);

impl PaletteTable {
    pub fn set(&mut self, kind: EventType, style: EventStyle) {
        self.0.insert(kind.as_str().to_string(), style);
    }

    pub fn get(&self, kind: EventType) -> Option<&EventStyle> {
        self.0.get(kind.as_str())
    }

    /// Keys that name no event type.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.0
            .keys()
            .filter(|key| EventType::parse(key).is_none())
            .map(String::as_str)
            .collect()
    }

    pub fn over<P: EventPalette>(self, base: P) -> ThemedPalette<P> {
        ThemedPalette {
            base,
            overrides: self,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemedPalette<P> {
    base: P,
    overrides: PaletteTable,
}

impl<P: EventPalette> EventPalette for ThemedPalette<P> {
    fn style(&self, kind: EventType) -> EventStyle {
        match self.overrides.get(kind) {
            Some(style) => style.clone(),
            None => self.base.style(kind),
        }
    }
}
