use crate::corpus::{Observation, Phase};
use crate::roi::growth::capability_multiplier;
use crate::roi::{
    CalculatorInputs, PhaseBreakdown, PhaseEvidence, RoiResult, ScenarioEvidence, ScenarioKind,
    ScenarioProjection, ScenarioSet, TOOLING_COST_PER_SEAT_MONTHLY,
};
use crate::stats::{round1, PhaseStats};

/// Monetize one scenario. `select_impact` picks the statistic (in percent) to
/// project for each phase; negative selections still show up in the breakdown
/// but floor to zero savings.
pub fn project_scenario(
    inputs: &CalculatorInputs,
    stats: &[PhaseStats],
    select_impact: impl Fn(&PhaseStats) -> f64,
) -> RoiResult {
    let hourly_rate = inputs.hourly_rate();
    let team_size = f64::from(inputs.team_size);

    let phase_breakdown: Vec<PhaseBreakdown> = Phase::ALL
        .iter()
        .map(|&phase| {
            let selected_pct = stats
                .iter()
                .find(|s| s.phase == phase)
                .map(&select_impact)
                .unwrap_or(0.0);
            let impact = (selected_pct / 100.0).max(0.0);
            let weight = inputs.weight(phase);
            let included = inputs.includes(phase);

            let hours_saved = if included {
                team_size
                    * inputs.hours_per_year
                    * weight
                    * impact
                    * inputs.inhouse_ratio(phase)
                    * inputs.timeframe_years
            } else {
                0.0
            };
            let cost_savings = hours_saved * hourly_rate;

            PhaseBreakdown {
                phase,
                weight,
                impact_pct: round1(selected_pct),
                hours_saved: hours_saved.round(),
                cost_savings: cost_savings.round(),
                included,
            }
        })
        .collect();

    let total_hours_saved: f64 = phase_breakdown.iter().map(|p| p.hours_saved).sum();
    let total_cost_savings: f64 = phase_breakdown.iter().map(|p| p.cost_savings).sum();
    let tooling_cost =
        team_size * TOOLING_COST_PER_SEAT_MONTHLY * 12.0 * inputs.timeframe_years;
    let consulting_cost = inputs.transformation_costs.consulting;
    let training_cost = inputs.transformation_costs.training;
    let internal_cost = inputs.transformation_costs.internal;
    let total_investment = tooling_cost + consulting_cost + training_cost + internal_cost;
    let net_roi = total_cost_savings - total_investment;
    let roi_ratio = if total_investment > 0.0 {
        round1(total_cost_savings / total_investment)
    } else {
        0.0
    };

    RoiResult {
        total_hours_saved,
        total_cost_savings,
        tooling_cost,
        consulting_cost,
        training_cost,
        internal_cost,
        total_investment,
        net_roi,
        roi_ratio,
        phase_breakdown,
    }
}

/// Three scenarios over one shared dataset, differing only in the quartile
/// they monetize.
pub fn quartile_scenarios(inputs: &CalculatorInputs, stats: &[PhaseStats]) -> ScenarioSet {
    ScenarioSet {
        pessimistic: project_scenario(inputs, stats, |s| s.q1),
        realistic: project_scenario(inputs, stats, |s| s.median),
        optimistic: project_scenario(inputs, stats, |s| s.q3),
    }
}

/// Fully configured scenarios: each reads its own corpus slice, applies its
/// adoption factor, and (optimistic only) the capability-growth multiplier.
/// Every projected number stays traceable to the observation subset returned
/// alongside it.
pub fn configured_scenarios(
    inputs: &CalculatorInputs,
    observations: &[Observation],
) -> ScenarioProjection {
    let multiplier = capability_multiplier(&inputs.scenario_configs.growth);

    let (pessimistic, pessimistic_evidence) =
        run_scenario(inputs, observations, ScenarioKind::Pessimistic, multiplier);
    let (realistic, realistic_evidence) =
        run_scenario(inputs, observations, ScenarioKind::Realistic, multiplier);
    let (optimistic, optimistic_evidence) =
        run_scenario(inputs, observations, ScenarioKind::Optimistic, multiplier);

    ScenarioProjection {
        scenarios: ScenarioSet {
            pessimistic,
            realistic,
            optimistic,
        },
        evidence: ScenarioEvidence {
            pessimistic: pessimistic_evidence,
            realistic: realistic_evidence,
            optimistic: optimistic_evidence,
        },
    }
}

fn run_scenario(
    inputs: &CalculatorInputs,
    observations: &[Observation],
    kind: ScenarioKind,
    multiplier: f64,
) -> (RoiResult, Vec<PhaseEvidence>) {
    let config = inputs.scenario_configs.get(kind);
    let adoption_factor = config.adoption_factor;
    let boost = if kind == ScenarioKind::Optimistic && inputs.scenario_configs.growth.enabled {
        multiplier
    } else {
        1.0
    };

    let filtered: Vec<Observation> = observations
        .iter()
        .filter(|o| config.matches(o))
        .cloned()
        .collect();
    let stats = crate::stats::summary::phase_stats(&filtered);

    let result = project_scenario(inputs, &stats, |s| s.mean * boost * adoption_factor);

    let evidence = Phase::ALL
        .iter()
        .map(|&phase| {
            let phase_observations: Vec<Observation> = filtered
                .iter()
                .filter(|o| o.phase == phase)
                .cloned()
                .collect();
            let raw_mean = if phase_observations.is_empty() {
                0.0
            } else {
                phase_observations.iter().map(|o| o.impact_pct).sum::<f64>()
                    / phase_observations.len() as f64
            };
            PhaseEvidence {
                phase,
                impact_pct: raw_mean * boost * adoption_factor,
                observations: phase_observations,
            }
        })
        .collect();

    (result, evidence)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::corpus::{DataType, Observation, Phase};
    use crate::roi::growth::GrowthConfig;
    use crate::roi::scenario::{configured_scenarios, project_scenario, quartile_scenarios};
    use crate::roi::{
        CalculatorInputs, ScenarioConfig, ScenarioConfigs, TransformationCosts,
    };
    use crate::stats::summary::phase_stats;

    fn obs(phase: Phase, impact_pct: f64, year: i32, data_type: DataType) -> Observation {
        Observation {
            id: format!("{}-{}-{}", phase.as_slug(), year, impact_pct),
            phase,
            impact_pct,
            year,
            publish_date: None,
            source: format!("source-{impact_pct}"),
            source_url: None,
            data_type,
            description: String::new(),
            sample_size: None,
            credibility: 2,
        }
    }

    fn dev_only_inputs() -> CalculatorInputs {
        let mut phase_weights: BTreeMap<Phase, f64> =
            Phase::ALL.iter().map(|&p| (p, 0.0)).collect();
        phase_weights.insert(Phase::Dev, 1.0);
        CalculatorInputs {
            team_size: 10,
            avg_salary: 60_000.0,
            hours_per_year: 1_600.0,
            timeframe_years: 1.0,
            included_phases: vec![Phase::Dev],
            phase_weights,
            inhouse_ratios: Phase::ALL.iter().map(|&p| (p, 1.0)).collect(),
            transformation_costs: TransformationCosts::default(),
            scenario_configs: ScenarioConfigs::default(),
        }
    }

    #[test]
    fn realistic_projection_matches_hand_computation() {
        let observations: Vec<Observation> = [10.0, 20.0, 30.0, 40.0]
            .iter()
            .map(|&v| obs(Phase::Dev, v, 2025, DataType::Empirical))
            .collect();
        let stats = phase_stats(&observations);
        let scenarios = quartile_scenarios(&dev_only_inputs(), &stats);

        let realistic = &scenarios.realistic;
        let dev = realistic
            .phase_breakdown
            .iter()
            .find(|p| p.phase == Phase::Dev)
            .unwrap();
        assert_eq!(dev.impact_pct, 25.0);
        assert_eq!(dev.hours_saved, 4_000.0);
        assert_eq!(dev.cost_savings, 150_000.0);
        assert_eq!(realistic.total_hours_saved, 4_000.0);
        assert_eq!(realistic.total_cost_savings, 150_000.0);
        assert_eq!(realistic.tooling_cost, 2_400.0);
        assert_eq!(realistic.total_investment, 2_400.0);
        assert_eq!(realistic.net_roi, 147_600.0);
        assert_eq!(realistic.roi_ratio, 62.5);

        // quartile selectors bracket the realistic projection
        assert!(scenarios.pessimistic.total_cost_savings < realistic.total_cost_savings);
        assert!(scenarios.optimistic.total_cost_savings > realistic.total_cost_savings);
    }

    #[test]
    fn negative_impact_floors_savings_but_stays_visible() {
        let observations = vec![obs(Phase::Dev, -19.0, 2025, DataType::Empirical)];
        let stats = phase_stats(&observations);
        let result = project_scenario(&dev_only_inputs(), &stats, |s| s.median);

        let dev = result
            .phase_breakdown
            .iter()
            .find(|p| p.phase == Phase::Dev)
            .unwrap();
        assert_eq!(dev.impact_pct, -19.0);
        assert_eq!(dev.hours_saved, 0.0);
        assert_eq!(dev.cost_savings, 0.0);
        // investment still accrues, so the net goes negative
        assert!(result.net_roi < 0.0);
    }

    #[test]
    fn excluded_phase_contributes_nothing() {
        let observations = vec![obs(Phase::Qa, 50.0, 2025, DataType::Empirical)];
        let stats = phase_stats(&observations);
        let result = project_scenario(&dev_only_inputs(), &stats, |s| s.median);
        let qa = result
            .phase_breakdown
            .iter()
            .find(|p| p.phase == Phase::Qa)
            .unwrap();
        assert!(!qa.included);
        assert_eq!(qa.hours_saved, 0.0);
        assert_eq!(result.total_cost_savings, 0.0);
    }

    #[test]
    fn savings_grow_with_team_size_and_impact() {
        let observations: Vec<Observation> = [10.0, 20.0, 30.0, 40.0]
            .iter()
            .map(|&v| obs(Phase::Dev, v, 2025, DataType::Empirical))
            .collect();
        let stats = phase_stats(&observations);

        let base = project_scenario(&dev_only_inputs(), &stats, |s| s.median);

        let mut bigger_team = dev_only_inputs();
        bigger_team.team_size = 20;
        let scaled = project_scenario(&bigger_team, &stats, |s| s.median);
        assert!(scaled.total_hours_saved > base.total_hours_saved);
        assert!(scaled.total_cost_savings > base.total_cost_savings);

        let higher_impact = project_scenario(&dev_only_inputs(), &stats, |s| s.q3);
        assert!(higher_impact.total_cost_savings >= base.total_cost_savings);
    }

    #[test]
    fn zero_investment_guards_the_ratio() {
        let mut inputs = dev_only_inputs();
        inputs.team_size = 0;
        let result = project_scenario(&inputs, &phase_stats(&[]), |s| s.median);
        assert_eq!(result.total_investment, 0.0);
        assert_eq!(result.roi_ratio, 0.0);
    }

    fn configured_inputs(growth_enabled: bool) -> CalculatorInputs {
        let mut inputs = dev_only_inputs();
        inputs.scenario_configs = ScenarioConfigs {
            pessimistic: ScenarioConfig {
                years: vec![2024],
                data_types: vec![DataType::Empirical],
                adoption_factor: 0.5,
            },
            realistic: ScenarioConfig {
                years: vec![2025],
                data_types: DataType::ALL.to_vec(),
                adoption_factor: 1.0,
            },
            optimistic: ScenarioConfig {
                years: vec![2025],
                data_types: DataType::ALL.to_vec(),
                adoption_factor: 1.0,
            },
            growth: GrowthConfig {
                enabled: growth_enabled,
                doubling_period_months: 6.0,
                horizon_months: 6.0,
                elasticity: 1.0,
            },
        };
        inputs
    }

    fn configured_corpus() -> Vec<Observation> {
        vec![
            obs(Phase::Dev, 20.0, 2024, DataType::Empirical),
            obs(Phase::Dev, 40.0, 2024, DataType::Vendor),
            obs(Phase::Dev, 30.0, 2025, DataType::Empirical),
            obs(Phase::Dev, 50.0, 2025, DataType::Survey),
        ]
    }

    #[test]
    fn scenario_filters_and_adoption_factor_apply() {
        let projection = configured_scenarios(&configured_inputs(false), &configured_corpus());

        // pessimistic: only the 2024 empirical observation (20%), halved by adoption
        let pess_dev = projection
            .scenarios
            .pessimistic
            .phase_breakdown
            .iter()
            .find(|p| p.phase == Phase::Dev)
            .unwrap();
        assert_eq!(pess_dev.impact_pct, 10.0);

        // realistic: 2025 mean of 30 and 50
        let real_dev = projection
            .scenarios
            .realistic
            .phase_breakdown
            .iter()
            .find(|p| p.phase == Phase::Dev)
            .unwrap();
        assert_eq!(real_dev.impact_pct, 40.0);
    }

    #[test]
    fn growth_multiplier_boosts_only_the_optimistic_scenario() {
        let off = configured_scenarios(&configured_inputs(false), &configured_corpus());
        let on = configured_scenarios(&configured_inputs(true), &configured_corpus());

        // doubling period == horizon, elasticity 1 => exactly 2x on optimistic
        let optimistic_off = off
            .scenarios
            .optimistic
            .phase_breakdown
            .iter()
            .find(|p| p.phase == Phase::Dev)
            .unwrap()
            .impact_pct;
        let optimistic_on = on
            .scenarios
            .optimistic
            .phase_breakdown
            .iter()
            .find(|p| p.phase == Phase::Dev)
            .unwrap()
            .impact_pct;
        assert_eq!(optimistic_on, optimistic_off * 2.0);

        assert_eq!(
            off.scenarios.realistic.total_cost_savings,
            on.scenarios.realistic.total_cost_savings
        );
        assert_eq!(
            off.scenarios.pessimistic.total_cost_savings,
            on.scenarios.pessimistic.total_cost_savings
        );
    }

    #[test]
    fn sample_corpus_projects_under_the_default_config() {
        let config = crate::config::Config::default();
        config.validate().expect("default config is valid");
        let inputs = config.calculator_inputs();
        let corpus = crate::corpus::store::sample_corpus();

        let projection = configured_scenarios(&inputs, &corpus.observations);
        for kind in crate::roi::ScenarioKind::ALL {
            let result = projection.scenarios.get(kind);
            assert!(result.total_cost_savings > 0.0, "{kind} produced no savings");
            assert!(result.total_investment > 0.0);

            // every evidence row satisfies that scenario's own filter
            let scenario = inputs.scenario_configs.get(kind);
            for group in projection.evidence.get(kind) {
                for obs in &group.observations {
                    assert!(scenario.matches(obs));
                    assert_eq!(obs.phase, group.phase);
                }
            }
        }
    }

    #[test]
    fn evidence_traces_each_scenario_to_its_subset() {
        let projection = configured_scenarios(&configured_inputs(false), &configured_corpus());

        let pess_dev = projection
            .evidence
            .pessimistic
            .iter()
            .find(|e| e.phase == Phase::Dev)
            .unwrap();
        assert_eq!(pess_dev.observations.len(), 1);
        assert_eq!(pess_dev.observations[0].year, 2024);
        assert!((pess_dev.impact_pct - 10.0).abs() < 1e-9);

        let real_dev = projection
            .evidence
            .realistic
            .iter()
            .find(|e| e.phase == Phase::Dev)
            .unwrap();
        assert_eq!(real_dev.observations.len(), 2);
        assert!(real_dev.observations.iter().all(|o| o.year == 2025));

        // phases with no matching observations still appear, zeroed
        let pess_qa = projection
            .evidence
            .pessimistic
            .iter()
            .find(|e| e.phase == Phase::Qa)
            .unwrap();
        assert!(pess_qa.observations.is_empty());
        assert_eq!(pess_qa.impact_pct, 0.0);
    }
}
