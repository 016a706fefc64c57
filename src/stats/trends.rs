use std::collections::BTreeMap;

use crate::corpus::{Observation, Phase, TemporalEra};
use crate::stats::{round1, EraComparison, PhaseTrend, TrendPoint};

/// Per-phase yearly mean series. Only years with at least one observation
/// appear; gaps stay gaps.
pub fn trend_series(observations: &[Observation]) -> Vec<PhaseTrend> {
    Phase::ALL
        .iter()
        .map(|&phase| {
            let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
            for obs in observations.iter().filter(|o| o.phase == phase) {
                by_year.entry(obs.year).or_default().push(obs.impact_pct);
            }
            let points = by_year
                .into_iter()
                .map(|(year, values)| TrendPoint {
                    year,
                    mean: round1(values.iter().sum::<f64>() / values.len() as f64),
                    count: values.len(),
                })
                .collect();
            PhaseTrend { phase, points }
        })
        .collect()
}

/// Mean impact before and after the era boundary, per phase.
pub fn era_comparison(observations: &[Observation]) -> Vec<EraComparison> {
    Phase::ALL
        .iter()
        .map(|&phase| {
            let early_mean = era_mean(observations, phase, TemporalEra::Early);
            let agentic_mean = era_mean(observations, phase, TemporalEra::Agentic);
            EraComparison {
                phase,
                early_mean: round1(early_mean),
                agentic_mean: round1(agentic_mean),
                delta: round1(agentic_mean - early_mean),
            }
        })
        .collect()
}

fn era_mean(observations: &[Observation], phase: Phase, era: TemporalEra) -> f64 {
    let values: Vec<f64> = observations
        .iter()
        .filter(|o| o.phase == phase && era.contains(o.year))
        .map(|o| o.impact_pct)
        .collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
