use chrono::{DateTime, Duration, Utc};
use decisionline_core::TimelineEvent;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

impl Margin {
    pub fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Linear mapping from a timestamp domain onto a horizontal pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain_min: DateTime<Utc>,
    domain_max: DateTime<Utc>,
    range_start: f64,
    range_end: f64,
}

impl TimeScale {
    pub fn new(
        a: DateTime<Utc>,
        b: DateTime<Utc>,
        range_start: f64,
        range_end: f64,
    ) -> Self {
        Self {
            domain_min: a.min(b),
            domain_max: a.max(b),
            range_start,
            range_end,
        }
    }

    /// Domain is `[earliest, latest]` timestamp; range is
    /// `[margin.left, width - margin.right]`.
    pub fn from_events(
        events: &[TimelineEvent],
        width: f64,
        margin: &Margin,
    ) -> LayoutResult<Self> {
        let mut stamps = events.iter().map(|event| event.timestamp);
        let Some(first) = stamps.next() else {
            return Err(LayoutError::EmptyDomain);
        };
        let (min, max) = stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
        Ok(Self::new(min, max, margin.left, width - margin.right))
    }

    pub fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.domain_min, self.domain_max)
    }

    pub fn is_degenerate(&self) -> bool {
        self.span_seconds() <= 0.0
    }

    fn midpoint(&self) -> f64 {
        (self.range_start + self.range_end) / 2.0
    }

    fn span_seconds(&self) -> f64 {
        seconds_between(self.domain_min, self.domain_max)
    }

    pub fn x(&self, ts: DateTime<Utc>) -> f64 {
        let span = self.span_seconds();
        if span <= 0.0 {
            return self.midpoint();
        }
        let t = seconds_between(self.domain_min, ts) / span;
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Pixel back to timestamp. A degenerate domain inverts to its single instant.
    pub fn invert(&self, x: f64) -> DateTime<Utc> {
        let width = self.range_end - self.range_start;
        if self.is_degenerate() || width == 0.0 || !x.is_finite() {
            return self.domain_min;
        }
        let t = (x - self.range_start) / width;
        offset_by(self.domain_min, t * self.span_seconds())
    }

    /// Evenly spaced instants across the domain, both ends included.
    pub fn ticks(&self, count: usize) -> Vec<DateTime<Utc>> {
        match count {
            0 => Vec::new(),
            _ if self.is_degenerate() => vec![self.domain_min],
            1 => vec![self.domain_min],
            _ => {
                let span = self.span_seconds();
                let steps = (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        if i == count - 1 {
                            self.domain_max
                        } else {
                            offset_by(self.domain_min, span * i as f64 / steps)
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Builds the scale for `events` and hands back the `time -> x` function.
pub fn map_time_to_x(
    events: &[TimelineEvent],
    width: f64,
    margin: &Margin,
) -> LayoutResult<impl Fn(DateTime<Utc>) -> f64> {
    let scale = TimeScale::from_events(events, width, margin)?;
    Ok(move |ts| scale.x(ts))
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

// Saturates at the representable bounds instead of overflowing.
fn offset_by(base: DateTime<Utc>, seconds: f64) -> DateTime<Utc> {
    let delta = Duration::microseconds((seconds * 1e6).round() as i64);
    match base.checked_add_signed(delta) {
        Some(ts) => ts,
        None if seconds < 0.0 => DateTime::<Utc>::MIN_UTC,
        None => DateTime::<Utc>::MAX_UTC,
    }
}
