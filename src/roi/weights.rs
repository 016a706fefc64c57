use std::collections::BTreeMap;

use crate::corpus::{Observation, Phase};

/// Rescale `base` so the weights of `included` phases sum to 1.0; every other
/// phase gets 0. An all-zero included sum yields all zeros, which the caller
/// must treat as "redistribute manually".
pub fn normalize_weights(
    base: &BTreeMap<Phase, f64>,
    included: &[Phase],
) -> BTreeMap<Phase, f64> {
    let sum: f64 = Phase::ALL
        .iter()
        .filter(|p| included.contains(p))
        .map(|p| base.get(p).copied().unwrap_or(0.0))
        .sum();

    Phase::ALL
        .iter()
        .map(|&phase| {
            let weight = if included.contains(&phase) && sum > 0.0 {
                base.get(&phase).copied().unwrap_or(0.0) / sum
            } else {
                0.0
            };
            (phase, weight)
        })
        .collect()
}

/// Default weights derived from the corpus: each phase weighted by its share
/// of the total observation count. Falls back to `fallback` on an empty
/// corpus.
pub fn weights_from_corpus(
    observations: &[Observation],
    fallback: &BTreeMap<Phase, f64>,
) -> BTreeMap<Phase, f64> {
    let total = observations.len();
    Phase::ALL
        .iter()
        .map(|&phase| {
            let weight = if total > 0 {
                let count = observations.iter().filter(|o| o.phase == phase).count();
                count as f64 / total as f64
            } else {
                fallback.get(&phase).copied().unwrap_or(0.0)
            };
            (phase, weight)
        })
        .collect()
}
