pub mod summary;
pub mod trends;

use serde::{Deserialize, Serialize};

use crate::corpus::Phase;

/// Five-number summary plus mean for one phase. All fields are zero when
/// `count` is zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseStats {
    pub phase: Phase,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
    pub source_count: usize,
}

impl PhaseStats {
    pub fn empty(phase: Phase) -> Self {
        Self {
            phase,
            min: 0.0,
            q1: 0.0,
            median: 0.0,
            q3: 0.0,
            max: 0.0,
            mean: 0.0,
            count: 0,
            source_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTrend {
    pub phase: Phase,
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EraComparison {
    pub phase: Phase,
    pub early_mean: f64,
    pub agentic_mean: f64,
    pub delta: f64,
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
