use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::{DataType, Phase};
use crate::roi::weights::normalize_weights;
use crate::roi::{CalculatorInputs, ScenarioConfigs, ScenarioKind, TransformationCosts};

/// Bump when the config file shape changes; `migrate` fills what older files
/// left unsaid so the engine never sees a partial configuration.
pub const CONFIG_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub team: TeamConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
    #[serde(default)]
    pub costs: TransformationCosts,
    #[serde(default)]
    pub phases: PhasesConfig,
    #[serde(default)]
    pub scenarios: ScenarioConfigs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    #[serde(default = "default_team_size")]
    pub size: u32,
    #[serde(default = "default_avg_salary")]
    pub avg_salary: f64,
    #[serde(default = "default_hours_per_year")]
    pub hours_per_year: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_timeframe_years")]
    pub timeframe_years: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhasesConfig {
    #[serde(default = "default_included")]
    pub included: Vec<Phase>,
    #[serde(default = "default_weights")]
    pub weights: BTreeMap<Phase, f64>,
    #[serde(default = "default_inhouse")]
    pub inhouse: BTreeMap<Phase, f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub team_size: Option<u32>,
    pub avg_salary: Option<f64>,
    pub hours_per_year: Option<f64>,
    pub timeframe_years: Option<f64>,
    pub consulting: Option<f64>,
    pub training: Option<f64>,
    pub internal: Option<f64>,
    pub included_phases: Option<Vec<Phase>>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/impact-oracle/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed.migrate())
    }

    /// Schema-versioned fill-in for older files, run once at load time.
    fn migrate(mut self) -> Self {
        if self.schema_version >= CONFIG_SCHEMA_VERSION {
            return self;
        }
        info!(
            from = self.schema_version,
            to = CONFIG_SCHEMA_VERSION,
            "migrating config schema"
        );
        for kind in ScenarioKind::ALL {
            let defaults = ScenarioConfigs::default_for(kind);
            let config = match kind {
                ScenarioKind::Pessimistic => &mut self.scenarios.pessimistic,
                ScenarioKind::Realistic => &mut self.scenarios.realistic,
                ScenarioKind::Optimistic => &mut self.scenarios.optimistic,
            };
            if config.years.is_empty() {
                config.years = defaults.years;
            }
            if config.data_types.is_empty() {
                config.data_types = DataType::ALL.to_vec();
            }
        }
        if self.phases.included.is_empty() {
            self.phases.included = default_included();
        }
        if self.phases.weights.is_empty() {
            self.phases.weights = default_weights();
        }
        if self.phases.inhouse.is_empty() {
            self.phases.inhouse = default_inhouse();
        }
        self.schema_version = CONFIG_SCHEMA_VERSION;
        self
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(team_size) = overrides.team_size {
            self.team.size = team_size;
        }
        if let Some(avg_salary) = overrides.avg_salary {
            self.team.avg_salary = avg_salary;
        }
        if let Some(hours_per_year) = overrides.hours_per_year {
            self.team.hours_per_year = hours_per_year;
        }
        if let Some(timeframe_years) = overrides.timeframe_years {
            self.projection.timeframe_years = timeframe_years;
        }
        if let Some(consulting) = overrides.consulting {
            self.costs.consulting = consulting;
        }
        if let Some(training) = overrides.training {
            self.costs.training = training;
        }
        if let Some(internal) = overrides.internal {
            self.costs.internal = internal;
        }
        if let Some(included) = overrides.included_phases {
            self.phases.included = included;
        }
    }

    /// The engine trusts its inputs; everything it relies on is checked here,
    /// at the configuration boundary.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.team.size >= 1, "team size must be at least 1");
        ensure!(self.team.avg_salary > 0.0, "average salary must be positive");
        ensure!(
            self.team.hours_per_year > 0.0,
            "hours per year must be positive"
        );
        ensure!(
            self.projection.timeframe_years > 0.0,
            "timeframe must be positive"
        );
        ensure!(
            self.costs.consulting >= 0.0
                && self.costs.training >= 0.0
                && self.costs.internal >= 0.0,
            "transformation costs must be non-negative"
        );
        ensure!(
            !self.phases.included.is_empty(),
            "at least one phase must be included"
        );
        let included_weight: f64 = self
            .phases
            .included
            .iter()
            .map(|p| self.phases.weights.get(p).copied().unwrap_or(0.0))
            .sum();
        ensure!(
            included_weight > 0.0,
            "included phases carry zero total weight; redistribute weights"
        );
        for (phase, weight) in &self.phases.weights {
            ensure!(*weight >= 0.0, "weight for {phase} must be non-negative");
        }
        for (phase, ratio) in &self.phases.inhouse {
            ensure!(
                (0.0..=1.0).contains(ratio),
                "in-house ratio for {phase} must be within [0, 1]"
            );
        }
        for kind in ScenarioKind::ALL {
            let scenario = self.scenarios.get(kind);
            ensure!(
                !scenario.years.is_empty(),
                "{kind} scenario selects no years"
            );
            ensure!(
                !scenario.data_types.is_empty(),
                "{kind} scenario selects no data types"
            );
            ensure!(
                scenario.adoption_factor >= 0.0,
                "{kind} adoption factor must be non-negative"
            );
        }
        let growth = &self.scenarios.growth;
        if growth.enabled {
            ensure!(
                growth.doubling_period_months > 0.0,
                "growth doubling period must be positive"
            );
            ensure!(
                growth.horizon_months > 0.0,
                "growth horizon must be positive"
            );
            ensure!(
                growth.elasticity > 0.0 && growth.elasticity <= 3.0,
                "growth elasticity must be within (0, 3]"
            );
        }
        Ok(())
    }

    /// Fully-populated engine inputs: weights normalized over the included
    /// set, excluded phases pinned to zero.
    pub fn calculator_inputs(&self) -> CalculatorInputs {
        let phase_weights = normalize_weights(&self.phases.weights, &self.phases.included);
        CalculatorInputs {
            team_size: self.team.size,
            avg_salary: self.team.avg_salary,
            hours_per_year: self.team.hours_per_year,
            timeframe_years: self.projection.timeframe_years,
            included_phases: self.phases.included.clone(),
            phase_weights,
            inhouse_ratios: self.phases.inhouse.clone(),
            transformation_costs: self.costs,
            scenario_configs: self.scenarios.clone(),
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"schema_version = 2

[team]
size = 25
avg_salary = 55000.0
hours_per_year = 1600.0

[projection]
timeframe_years = 1.0

[costs]
consulting = 0.0
training = 0.0
internal = 0.0

[phases]
included = ["strategy", "design", "spec", "dev", "qa", "devops"]

[phases.weights]
strategy = 0.05
design = 0.10
spec = 0.10
dev = 0.40
qa = 0.20
devops = 0.15

[phases.inhouse]
strategy = 1.0
design = 1.0
spec = 1.0
dev = 1.0
qa = 1.0
devops = 1.0

[scenarios.pessimistic]
years = [2023, 2024]
data_types = ["empirical"]
adoption_factor = 0.75

[scenarios.realistic]
years = [2024, 2025, 2026]
data_types = ["empirical", "survey", "vendor", "anecdotal"]
adoption_factor = 1.0

[scenarios.optimistic]
years = [2025, 2026]
data_types = ["empirical", "survey", "vendor", "anecdotal"]
adoption_factor = 1.0

[scenarios.growth]
enabled = true
doubling_period_months = 4.0
horizon_months = 12.0
elasticity = 0.5
"#;
        template.to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            team: TeamConfig::default(),
            projection: ProjectionConfig::default(),
            costs: TransformationCosts::default(),
            phases: PhasesConfig::default(),
            scenarios: ScenarioConfigs::default(),
        }
    }
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            size: default_team_size(),
            avg_salary: default_avg_salary(),
            hours_per_year: default_hours_per_year(),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            timeframe_years: default_timeframe_years(),
        }
    }
}

impl Default for PhasesConfig {
    fn default() -> Self {
        Self {
            included: default_included(),
            weights: default_weights(),
            inhouse: default_inhouse(),
        }
    }
}

fn default_schema_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

fn default_team_size() -> u32 {
    25
}

fn default_avg_salary() -> f64 {
    55_000.0
}

fn default_hours_per_year() -> f64 {
    1_600.0
}

fn default_timeframe_years() -> f64 {
    1.0
}

fn default_included() -> Vec<Phase> {
    Phase::ALL.to_vec()
}

fn default_weights() -> BTreeMap<Phase, f64> {
    BTreeMap::from([
        (Phase::Strategy, 0.05),
        (Phase::Design, 0.10),
        (Phase::Spec, 0.10),
        (Phase::Dev, 0.40),
        (Phase::Qa, 0.20),
        (Phase::DevOps, 0.15),
    ])
}

fn default_inhouse() -> BTreeMap<Phase, f64> {
    Phase::ALL.iter().map(|&p| (p, 1.0)).collect()
}
