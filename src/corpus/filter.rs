use serde::{Deserialize, Serialize};

use crate::corpus::{DataType, Observation, Phase, TemporalEra};

/// Caller-side selection over a corpus. `None` means "no restriction".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub years: Option<Vec<i32>>,
    pub data_types: Option<Vec<DataType>>,
    pub phases: Option<Vec<Phase>>,
    #[serde(default)]
    pub era: TemporalEra,
}

impl FilterSelection {
    pub fn matches(&self, observation: &Observation) -> bool {
        if let Some(years) = &self.years {
            if !years.contains(&observation.year) {
                return false;
            }
        }
        if let Some(data_types) = &self.data_types {
            if !data_types.contains(&observation.data_type) {
                return false;
            }
        }
        if let Some(phases) = &self.phases {
            if !phases.contains(&observation.phase) {
                return false;
            }
        }
        self.era.contains(observation.year)
    }

    pub fn apply(&self, observations: &[Observation]) -> Vec<Observation> {
        observations
            .iter()
            .filter(|o| self.matches(o))
            .cloned()
            .collect()
    }
}
