pub mod filter;
pub mod store;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Observations at or below this year belong to the early-assistant era,
/// later ones to the agentic era.
pub const ERA_BOUNDARY_YEAR: i32 = 2024;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Strategy,
    Design,
    Spec,
    Dev,
    Qa,
    DevOps,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Strategy,
        Phase::Design,
        Phase::Spec,
        Phase::Dev,
        Phase::Qa,
        Phase::DevOps,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Strategy => "strategy",
            Self::Design => "design",
            Self::Spec => "spec",
            Self::Dev => "dev",
            Self::Qa => "qa",
            Self::DevOps => "devops",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Strategy => "Strategy",
            Self::Design => "Design",
            Self::Spec => "Spec",
            Self::Dev => "Dev",
            Self::Qa => "QA",
            Self::DevOps => "DevOps",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown phase: {0}")]
pub struct PhaseParseError(pub String);

impl FromStr for Phase {
    type Err = PhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "strategy" => Ok(Self::Strategy),
            "design" => Ok(Self::Design),
            "spec" | "specification" => Ok(Self::Spec),
            "dev" | "development" => Ok(Self::Dev),
            "qa" | "test" => Ok(Self::Qa),
            "devops" | "dev_ops" | "ops" => Ok(Self::DevOps),
            _ => Err(PhaseParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Empirical,
    Survey,
    Vendor,
    Anecdotal,
}

impl DataType {
    pub const ALL: [DataType; 4] = [
        DataType::Empirical,
        DataType::Survey,
        DataType::Vendor,
        DataType::Anecdotal,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Empirical => "empirical",
            Self::Survey => "survey",
            Self::Vendor => "vendor",
            Self::Anecdotal => "anecdotal",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown data type: {0}")]
pub struct DataTypeParseError(pub String);

impl FromStr for DataType {
    type Err = DataTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "empirical" | "study" => Ok(Self::Empirical),
            "survey" => Ok(Self::Survey),
            "vendor" => Ok(Self::Vendor),
            "anecdotal" | "anecdote" => Ok(Self::Anecdotal),
            _ => Err(DataTypeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemporalEra {
    #[default]
    All,
    Early,
    Agentic,
}

impl TemporalEra {
    pub fn contains(&self, year: i32) -> bool {
        match self {
            Self::All => true,
            Self::Early => year <= ERA_BOUNDARY_YEAR,
            Self::Agentic => year > ERA_BOUNDARY_YEAR,
        }
    }
}

impl Display for TemporalEra {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::All => "all",
            Self::Early => "early",
            Self::Agentic => "agentic",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown era: {0}")]
pub struct EraParseError(pub String);

impl FromStr for TemporalEra {
    type Err = EraParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "early" => Ok(Self::Early),
            "agentic" => Ok(Self::Agentic),
            _ => Err(EraParseError(s.to_string())),
        }
    }
}

/// One externally-sourced impact report. Negative `impact_pct` means the
/// capability made this phase slower.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub id: String,
    pub phase: Phase,
    pub impact_pct: f64,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<NaiveDate>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub data_type: DataType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<String>,
    pub credibility: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    pub observations: Vec<Observation>,
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

impl Corpus {
    pub fn with_fingerprint(observations: Vec<Observation>) -> Self {
        let canonical = serde_json::to_string(&observations).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let fingerprint = format!("{:x}", hasher.finalize());
        Self {
            observations,
            fingerprint,
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.observations.iter().map(|o| o.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}
