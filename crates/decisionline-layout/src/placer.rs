use decisionline_core::{EventId, TimelineEvent};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::error::{LayoutError, LayoutResult};
use crate::scale::{Margin, TimeScale};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub level_height: f64,
    pub max_levels: usize,
    pub overlap_threshold_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 400.0,
            margin: Margin::default(),
            level_height: 40.0,
            max_levels: 8,
            overlap_threshold_px: 50.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> LayoutResult<()> {
        let numbers = [
            ("width", self.width),
            ("height", self.height),
            ("margin.top", self.margin.top),
            ("margin.right", self.margin.right),
            ("margin.bottom", self.margin.bottom),
            ("margin.left", self.margin.left),
            ("level_height", self.level_height),
            ("overlap_threshold_px", self.overlap_threshold_px),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LayoutError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.width <= self.margin.horizontal() {
            return Err(LayoutError::InvalidConfig(format!(
                "width {} leaves no room between margins {} and {}",
                self.width, self.margin.left, self.margin.right
            )));
        }
        if self.level_height <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "level_height must be positive".to_string(),
            ));
        }
        if self.max_levels == 0 {
            return Err(LayoutError::InvalidConfig(
                "max_levels must be at least 1".to_string(),
            ));
        }
        if self.overlap_threshold_px < 0.0 {
            return Err(LayoutError::InvalidConfig(
                "overlap_threshold_px cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets `max_levels` to the number of lanes that fit between the top and
    /// bottom margins of `height` (at least one).
    pub fn fit_levels(mut self) -> Self {
        let available = self.height - self.margin.vertical();
        let lanes = if self.level_height > 0.0 && available.is_finite() {
            (available / self.level_height).floor()
        } else {
            0.0
        };
        self.max_levels = if lanes >= 1.0 { lanes as usize } else { 1 };
        self
    }

    pub fn level_y(&self, level: usize) -> f64 {
        self.margin.top + self.level_height * (level + 1) as f64
    }
}

/// Placement of one event. Borrows the event it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineNode<'a> {
    pub id: EventId,
    pub event: &'a TimelineEvent,
    pub x: f64,
    pub y: f64,
    pub level: usize,
    pub connections: Vec<EventId>,
}

// Rightmost x placed on each level so far. Events arrive in non-decreasing x
// and distinct levels are a whole level_height apart, so a candidate can only
// collide with the latest node on its own level. Levels are compared by index:
// rounding in level_y (e.g. 0.3 + 0.1 * n) never turns neighbouring lanes
// into a vertical collision.
struct LevelIndex {
    last_x: SmallVec<[Option<f64>; 8]>,
    threshold: f64,
}

impl LevelIndex {
    fn new(levels: usize, threshold: f64) -> Self {
        Self {
            last_x: smallvec![None; levels],
            threshold,
        }
    }

    fn is_free(&self, level: usize, x: f64) -> bool {
        match self.last_x[level] {
            Some(prev) => (x - prev).abs() >= self.threshold,
            None => true,
        }
    }

    fn first_free(&self, x: f64) -> Option<usize> {
        (0..self.last_x.len()).find(|&level| self.is_free(level, x))
    }

    fn record(&mut self, level: usize, x: f64) {
        self.last_x[level] = Some(x);
    }

    fn used(&self) -> usize {
        self.last_x.iter().filter(|x| x.is_some()).count()
    }
}

/// Lays out `events` chronologically left to right, stacking temporally close
/// events into separate levels.
///
/// Events sharing a timestamp keep their input order. When every level in
/// `[0, max_levels)` collides, the event lands on the last level anyway.
pub fn layout_timeline<'a>(
    events: &'a [TimelineEvent],
    config: &LayoutConfig,
) -> LayoutResult<Vec<TimelineNode<'a>>> {
    config.validate()?;
    let scale = TimeScale::from_events(events, config.width, &config.margin)?;

    let mut ordered: Vec<&TimelineEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.timestamp);

    let last_level = config.max_levels - 1;
    let mut lanes = LevelIndex::new(config.max_levels, config.overlap_threshold_px);
    let mut overflowed = 0usize;
    let mut nodes = Vec::with_capacity(ordered.len());

    for event in ordered {
        let x = scale.x(event.timestamp);
        let level = match lanes.first_free(x) {
            Some(level) => level,
            None => {
                overflowed += 1;
                last_level
            }
        };
        lanes.record(level, x);

        nodes.push(TimelineNode {
            id: event.id.clone(),
            event,
            x,
            y: config.level_y(level),
            level,
            connections: event.related_events.clone(),
        });
    }

    if overflowed > 0 {
        tracing::debug!(
            overflowed,
            max_levels = config.max_levels,
            "events overlap on the last level"
        );
    }
    tracing::debug!(
        nodes = nodes.len(),
        levels_used = lanes.used(),
        "timeline laid out"
    );

    Ok(nodes)
}
