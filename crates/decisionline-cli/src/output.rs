use decisionline_core::EventType;
use decisionline_layout::{
    event_label, format_timestamp, truncate_text, EventPalette, EventStyle, Link, TimelineNode,
    TimelineSettings,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RenderedNode<'a> {
    #[serde(flatten)]
    pub node: &'a TimelineNode<'a>,
    pub label: String,
    pub date: String,
    pub style: EventStyle,
}

#[derive(Debug, Serialize)]
pub struct LayoutOutput<'a> {
    pub nodes: Vec<RenderedNode<'a>>,
    pub links: Vec<Link>,
}

impl LayoutOutput<'_> {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }
}

pub fn render_nodes<'a, P: EventPalette>(
    nodes: &'a [TimelineNode<'a>],
    settings: &TimelineSettings,
    palette: &P,
) -> Vec<RenderedNode<'a>> {
    nodes
        .iter()
        .map(|node| RenderedNode {
            node,
            label: truncate_text(&event_label(node.event), settings.label_max_chars),
            date: format_timestamp(node.event.timestamp, &settings.date_style),
            style: palette.style(node.event.kind),
        })
        .collect()
}

pub fn count_by_type(nodes: &[TimelineNode<'_>]) -> Vec<(EventType, usize)> {
    EventType::ALL
        .iter()
        .map(|&kind| (kind, nodes.iter().filter(|n| n.event.kind == kind).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}
