//! Configuration file parsing. Every section is optional and falls back to
//! the fantasy game's regular season settings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::anneal::AnnealParams;
use crate::error::ConfigError;
use crate::model::condition::Rules;
use crate::simulate::PointsTable;
use crate::solver::SolveOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of search nodes (unset = no limit)
    pub node_limit: Option<u64>,
    /// Wall-clock limit in milliseconds (unset = no limit)
    pub time_limit_ms: Option<u64>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: Rules,
    pub limits: LimitsConfig,
    pub anneal: AnnealParams,
    pub points: PointsTable,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            node_limit: self.limits.node_limit,
            time_limit_ms: self.limits.time_limit_ms,
            anneal: self.anneal.clone(),
        }
    }
}

/// Returns a commented configuration file with the default settings.
pub fn default_config_template() -> &'static str {
    r#"# Team optimizer configuration

[rules]
# Spending cap in millions
budget = 100.0
# Team size and how many of those are constructors
capacity = 7
num_constructors = 2
# Fixed-point resolution of the search (10 = one decimal place)
scale = 10

[limits]
# Give up with an error instead of returning an unproven team
# node_limit = 50000000
# time_limit_ms = 10000

[anneal]
temperature = 5.0
cooling_rate = 0.995
max_iterations = 2000
seed = 7

[points]
qualifying_start = 10.0
race = [25.0, 18.0, 15.0, 12.0, 10.0, 8.0, 6.0, 4.0, 2.0, 1.0]
dnf = -20.0
dq = -25.0
"#
}
