use decisionline_core::EventId;
use serde::Serialize;
use std::collections::HashMap;

use crate::placer::TimelineNode;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub from: EventId,
    pub to: EventId,
    pub from_pos: (f64, f64),
    pub to_pos: (f64, f64),
}

/// Connections that name a node in `nodes`, as drawable segments.
///
/// Unknown ids and self references are skipped.
pub fn resolve_links(nodes: &[TimelineNode<'_>]) -> Vec<Link> {
    let positions: HashMap<&EventId, (f64, f64)> =
        nodes.iter().map(|n| (&n.id, (n.x, n.y))).collect();

    let mut links = Vec::new();
    let mut dangling = 0usize;
    for node in nodes {
        for target in &node.connections {
            if target == &node.id {
                continue;
            }
            let Some(&to_pos) = positions.get(target) else {
                dangling += 1;
                continue;
            };
            links.push(Link {
                from: node.id.clone(),
                to: target.clone(),
                from_pos: (node.x, node.y),
                to_pos,
            });
        }
    }

    if dangling > 0 {
        tracing::debug!(dangling, links = links.len(), "skipped unresolved connections");
    }
    links
}
