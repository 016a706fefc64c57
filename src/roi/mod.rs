pub mod growth;
pub mod scenario;
pub mod weights;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::corpus::{DataType, Observation, Phase};
use crate::roi::growth::GrowthConfig;

/// EUR per seat per month, recurring.
pub const TOOLING_COST_PER_SEAT_MONTHLY: f64 = 20.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Pessimistic,
    Realistic,
    Optimistic,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Pessimistic,
        ScenarioKind::Realistic,
        ScenarioKind::Optimistic,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Pessimistic => "pessimistic",
            Self::Realistic => "realistic",
            Self::Optimistic => "optimistic",
        }
    }
}

impl Display for ScenarioKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown scenario: {0}")]
pub struct ScenarioParseError(pub String);

impl FromStr for ScenarioKind {
    type Err = ScenarioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pessimistic" | "low" => Ok(Self::Pessimistic),
            "realistic" | "base" => Ok(Self::Realistic),
            "optimistic" | "high" => Ok(Self::Optimistic),
            _ => Err(ScenarioParseError(s.to_string())),
        }
    }
}

/// Which slice of the corpus a scenario reads, plus its uptake scalar.
/// Both filter sets must be non-empty before this reaches the engine; the
/// configuration boundary enforces that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub data_types: Vec<DataType>,
    #[serde(default = "default_adoption_factor")]
    pub adoption_factor: f64,
}

impl ScenarioConfig {
    pub fn matches(&self, observation: &Observation) -> bool {
        self.years.contains(&observation.year)
            && self.data_types.contains(&observation.data_type)
    }
}

fn default_adoption_factor() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioConfigs {
    #[serde(default = "default_pessimistic")]
    pub pessimistic: ScenarioConfig,
    #[serde(default = "default_realistic")]
    pub realistic: ScenarioConfig,
    #[serde(default = "default_optimistic")]
    pub optimistic: ScenarioConfig,
    #[serde(default)]
    pub growth: GrowthConfig,
}

impl ScenarioConfigs {
    pub fn get(&self, kind: ScenarioKind) -> &ScenarioConfig {
        match kind {
            ScenarioKind::Pessimistic => &self.pessimistic,
            ScenarioKind::Realistic => &self.realistic,
            ScenarioKind::Optimistic => &self.optimistic,
        }
    }

    pub fn default_for(kind: ScenarioKind) -> ScenarioConfig {
        match kind {
            ScenarioKind::Pessimistic => default_pessimistic(),
            ScenarioKind::Realistic => default_realistic(),
            ScenarioKind::Optimistic => default_optimistic(),
        }
    }
}

impl Default for ScenarioConfigs {
    fn default() -> Self {
        Self {
            pessimistic: default_pessimistic(),
            realistic: default_realistic(),
            optimistic: default_optimistic(),
            growth: GrowthConfig::default(),
        }
    }
}

fn default_pessimistic() -> ScenarioConfig {
    ScenarioConfig {
        years: vec![2023, 2024],
        data_types: vec![DataType::Empirical],
        adoption_factor: 0.75,
    }
}

fn default_realistic() -> ScenarioConfig {
    ScenarioConfig {
        years: vec![2024, 2025, 2026],
        data_types: DataType::ALL.to_vec(),
        adoption_factor: 1.0,
    }
}

fn default_optimistic() -> ScenarioConfig {
    ScenarioConfig {
        years: vec![2025, 2026],
        data_types: DataType::ALL.to_vec(),
        adoption_factor: 1.0,
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TransformationCosts {
    pub consulting: f64,
    pub training: f64,
    pub internal: f64,
}

/// Everything the projection needs, assembled and validated at the
/// configuration boundary. Weights for included phases sum to 1.0 and
/// excluded phases carry 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorInputs {
    pub team_size: u32,
    pub avg_salary: f64,
    pub hours_per_year: f64,
    pub timeframe_years: f64,
    pub included_phases: Vec<Phase>,
    pub phase_weights: BTreeMap<Phase, f64>,
    pub inhouse_ratios: BTreeMap<Phase, f64>,
    pub transformation_costs: TransformationCosts,
    pub scenario_configs: ScenarioConfigs,
}

impl CalculatorInputs {
    pub fn hourly_rate(&self) -> f64 {
        if self.hours_per_year > 0.0 {
            self.avg_salary / self.hours_per_year
        } else {
            0.0
        }
    }

    pub fn includes(&self, phase: Phase) -> bool {
        self.included_phases.contains(&phase)
    }

    pub fn weight(&self, phase: Phase) -> f64 {
        self.phase_weights.get(&phase).copied().unwrap_or(0.0)
    }

    pub fn inhouse_ratio(&self, phase: Phase) -> f64 {
        self.inhouse_ratios.get(&phase).copied().unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseBreakdown {
    pub phase: Phase,
    pub weight: f64,
    /// Selected impact in percent, one decimal, sign preserved. Display only;
    /// monetization clamps negatives to zero.
    pub impact_pct: f64,
    pub hours_saved: f64,
    pub cost_savings: f64,
    pub included: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoiResult {
    pub total_hours_saved: f64,
    pub total_cost_savings: f64,
    pub tooling_cost: f64,
    pub consulting_cost: f64,
    pub training_cost: f64,
    pub internal_cost: f64,
    pub total_investment: f64,
    pub net_roi: f64,
    pub roi_ratio: f64,
    pub phase_breakdown: Vec<PhaseBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub pessimistic: RoiResult,
    pub realistic: RoiResult,
    pub optimistic: RoiResult,
}

impl ScenarioSet {
    pub fn get(&self, kind: ScenarioKind) -> &RoiResult {
        match kind {
            ScenarioKind::Pessimistic => &self.pessimistic,
            ScenarioKind::Realistic => &self.realistic,
            ScenarioKind::Optimistic => &self.optimistic,
        }
    }
}

/// The exact observations behind one phase of one scenario, with the impact
/// figure the projection used for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseEvidence {
    pub phase: Phase,
    pub impact_pct: f64,
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioEvidence {
    pub pessimistic: Vec<PhaseEvidence>,
    pub realistic: Vec<PhaseEvidence>,
    pub optimistic: Vec<PhaseEvidence>,
}

impl ScenarioEvidence {
    pub fn get(&self, kind: ScenarioKind) -> &[PhaseEvidence] {
        match kind {
            ScenarioKind::Pessimistic => &self.pessimistic,
            ScenarioKind::Realistic => &self.realistic,
            ScenarioKind::Optimistic => &self.optimistic,
        }
    }
}

/// Configured-scenario output: three projections plus the observation subsets
/// that produced every number in them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenarios: ScenarioSet,
    pub evidence: ScenarioEvidence,
}
