use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The time advance of an atomic model - either a finite, non-negative delay
/// until the model fires on its own, or `Infinite` for a passive model with
/// no future internal event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeAdvance {
    Finite(f64),
    Infinite,
}

impl TimeAdvance {
    pub fn is_infinite(&self) -> bool {
        matches!(self, TimeAdvance::Infinite)
    }

    pub fn as_finite(&self) -> Option<f64> {
        match self {
            TimeAdvance::Finite(delay) => Some(*delay),
            TimeAdvance::Infinite => None,
        }
    }

    /// `Infinite` maps to `f64::INFINITY`, for reporting only.
    pub fn to_f64(&self) -> f64 {
        self.as_finite().unwrap_or(f64::INFINITY)
    }

    pub fn min(self, other: Self) -> Self {
        match self.partial_cmp(&other) {
            Some(Ordering::Greater) => other,
            _ => self,
        }
    }
}

impl PartialOrd for TimeAdvance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (TimeAdvance::Finite(a), TimeAdvance::Finite(b)) => a.partial_cmp(b),
            (TimeAdvance::Finite(_), TimeAdvance::Infinite) => Some(Ordering::Less),
            (TimeAdvance::Infinite, TimeAdvance::Finite(_)) => Some(Ordering::Greater),
            (TimeAdvance::Infinite, TimeAdvance::Infinite) => Some(Ordering::Equal),
        }
    }
}

impl fmt::Display for TimeAdvance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeAdvance::Finite(delay) => write!(f, "{}", delay),
            TimeAdvance::Infinite => write!(f, "infinity"),
        }
    }
}
