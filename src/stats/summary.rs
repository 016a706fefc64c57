use std::collections::BTreeSet;

use crate::corpus::{Observation, Phase};
use crate::stats::PhaseStats;

/// Linear interpolation between order statistics. `sorted` must be ascending;
/// `q` in [0, 1].
pub fn quartile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;
    if base + 1 < sorted.len() {
        sorted[base] + rest * (sorted[base + 1] - sorted[base])
    } else {
        sorted[base]
    }
}

/// One entry per phase, in declared phase order, including phases with no
/// observations (zeroed).
pub fn phase_stats(observations: &[Observation]) -> Vec<PhaseStats> {
    Phase::ALL
        .iter()
        .map(|&phase| stats_for_phase(observations, phase))
        .collect()
}

pub fn stats_for_phase(observations: &[Observation], phase: Phase) -> PhaseStats {
    let mut values: Vec<f64> = observations
        .iter()
        .filter(|o| o.phase == phase)
        .map(|o| o.impact_pct)
        .collect();
    if values.is_empty() {
        return PhaseStats::empty(phase);
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let sources: BTreeSet<&str> = observations
        .iter()
        .filter(|o| o.phase == phase)
        .map(|o| o.source.as_str())
        .collect();

    let sum: f64 = values.iter().sum();
    PhaseStats {
        phase,
        min: values[0],
        q1: quartile(&values, 0.25),
        median: quartile(&values, 0.5),
        q3: quartile(&values, 0.75),
        max: values[values.len() - 1],
        mean: sum / values.len() as f64,
        count: values.len(),
        source_count: sources.len(),
    }
}

#[cfg(test)]
mod tests {
    use crate::corpus::{DataType, Observation, Phase};
    use crate::stats::summary::{phase_stats, quartile, stats_for_phase};

    fn obs(phase: Phase, impact_pct: f64, year: i32, source: &str) -> Observation {
        Observation {
            id: format!("{}-{}-{}", phase.as_slug(), year, impact_pct),
            phase,
            impact_pct,
            year,
            publish_date: None,
            source: source.to_string(),
            source_url: None,
            data_type: DataType::Empirical,
            description: String::new(),
            sample_size: None,
            credibility: 2,
        }
    }

    #[test]
    fn literal_four_point_sample() {
        let observations: Vec<Observation> = [10.0, 20.0, 30.0, 40.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| obs(Phase::Dev, v, 2025, &format!("src-{i}")))
            .collect();
        let stats = stats_for_phase(&observations, Phase::Dev);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.q1, 17.5);
        assert_eq!(stats.median, 25.0);
        assert_eq!(stats.q3, 32.5);
        assert_eq!(stats.max, 40.0);
        assert_eq!(stats.mean, 25.0);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.source_count, 4);
    }

    #[test]
    fn quartiles_are_ordered() {
        let samples: Vec<Vec<f64>> = vec![
            vec![3.0],
            vec![-12.0, 44.0],
            vec![5.0, 5.0, 5.0],
            vec![-19.0, 2.5, 30.0, 30.0, 55.8, 100.0, 7.0],
        ];
        for mut sample in samples {
            sample.sort_by(|a, b| a.total_cmp(b));
            let q1 = quartile(&sample, 0.25);
            let median = quartile(&sample, 0.5);
            let q3 = quartile(&sample, 0.75);
            assert!(sample[0] <= q1);
            assert!(q1 <= median);
            assert!(median <= q3);
            assert!(q3 <= sample[sample.len() - 1]);
        }
    }

    #[test]
    fn single_observation_collapses_summary() {
        let observations = vec![obs(Phase::Qa, -19.0, 2025, "rct")];
        let stats = stats_for_phase(&observations, Phase::Qa);
        assert_eq!(stats.min, -19.0);
        assert_eq!(stats.q1, -19.0);
        assert_eq!(stats.median, -19.0);
        assert_eq!(stats.q3, -19.0);
        assert_eq!(stats.max, -19.0);
        assert_eq!(stats.mean, -19.0);
        assert_eq!(stats.count, 1);
    }

    #[test]
    fn empty_phase_yields_zeroed_stats() {
        let stats = phase_stats(&[]);
        assert_eq!(stats.len(), Phase::ALL.len());
        for s in stats {
            assert_eq!(s.count, 0);
            assert_eq!(s.median, 0.0);
            assert_eq!(s.source_count, 0);
        }
    }

    #[test]
    fn distinct_sources_deduplicate() {
        let observations = vec![
            obs(Phase::Dev, 10.0, 2024, "survey-a"),
            obs(Phase::Dev, 20.0, 2024, "survey-a"),
            obs(Phase::Dev, 30.0, 2025, "rct-b"),
        ];
        let stats = stats_for_phase(&observations, Phase::Dev);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.source_count, 2);
    }
}
