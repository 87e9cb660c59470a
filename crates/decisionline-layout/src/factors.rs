use decisionline_core::DecisionFactor;
use serde::Serialize;
use std::f64::consts::TAU;

/// Anything that contributes a weight to a normalized whole.
pub trait Weighted {
    fn weight(&self) -> f64;

    fn key(&self) -> Option<&str> {
        None
    }
}

impl Weighted for DecisionFactor {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn key(&self) -> Option<&str> {
        Some(&self.id)
    }
}

impl Weighted for f64 {
    fn weight(&self) -> f64 {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorShare {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub percentage: f64,
    /// Radians, measured from the start of the first share.
    pub start_angle: f64,
    pub end_angle: f64,
}

impl FactorShare {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

// negative and non-finite weights contribute nothing
fn effective_weight(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

// rounding can push the running percentage a hair past 100
fn turn(percentage: f64) -> f64 {
    (percentage / 100.0 * TAU).min(TAU)
}

// Weights divided by the largest one, so the sum stays finite even when the
// raw weights would overflow. Zero when every weight is zero.
fn relative_weights<T: Weighted>(factors: &[T]) -> (Vec<f64>, f64) {
    let raw: Vec<f64> = factors.iter().map(|f| effective_weight(f.weight())).collect();
    let largest = raw.iter().copied().fold(0.0, f64::max);
    if largest <= 0.0 {
        return (vec![0.0; raw.len()], 0.0);
    }
    let relative: Vec<f64> = raw.into_iter().map(|w| w / largest).collect();
    let total = relative.iter().sum();
    (relative, total)
}

/// One share per factor, in input order. Angles are cumulative percentage
/// boundaries scaled to a full turn. A zero total yields all-zero shares.
pub fn normalize_factors<T: Weighted>(factors: &[T]) -> Vec<FactorShare> {
    let (relative, total) = relative_weights(factors);
    if total <= 0.0 {
        if !factors.is_empty() {
            tracing::debug!(factors = factors.len(), "total factor weight is zero");
        }
        return factors
            .iter()
            .map(|f| FactorShare {
                id: f.key().map(str::to_string),
                percentage: 0.0,
                start_angle: 0.0,
                end_angle: 0.0,
            })
            .collect();
    }

    let last = factors.len().saturating_sub(1);
    let mut cumulative = 0.0;
    factors
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let percentage = relative[i] / total * 100.0;
            let start_angle = turn(cumulative);
            cumulative += percentage;
            let end_angle = if i == last { TAU } else { turn(cumulative) };
            FactorShare {
                id: f.key().map(str::to_string),
                percentage,
                start_angle,
                end_angle,
            }
        })
        .collect()
}
