use serde::{Deserialize, Serialize};

/// Capability-growth assumption: task capability doubles every
/// `doubling_period_months`; `elasticity` dampens (<1) or amplifies (>1) how
/// much of that curve an organization actually captures over the horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_doubling_period_months")]
    pub doubling_period_months: f64,
    #[serde(default = "default_horizon_months")]
    pub horizon_months: f64,
    #[serde(default = "default_elasticity")]
    pub elasticity: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            doubling_period_months: default_doubling_period_months(),
            horizon_months: default_horizon_months(),
            elasticity: default_elasticity(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_doubling_period_months() -> f64 {
    4.0
}

fn default_horizon_months() -> f64 {
    12.0
}

fn default_elasticity() -> f64 {
    0.5
}

/// Scalar amplifier for the optimistic scenario. 1.0 when disabled or when
/// the doubling period is degenerate.
pub fn capability_multiplier(config: &GrowthConfig) -> f64 {
    if !config.enabled || config.doubling_period_months <= 0.0 {
        return 1.0;
    }
    let raw = 2f64.powf(config.horizon_months / config.doubling_period_months);
    raw.powf(config.elasticity)
}
