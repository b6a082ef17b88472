use thiserror::Error;

use crate::model::entity::{PickId, PickKind};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("no pick named `{0}` in the catalog")]
    NotFound(String),
    #[error("`{name}` matches {count} picks in the catalog")]
    Ambiguous { name: String, count: usize },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("the bonus pick cannot be a constructor, but `{0}` was specified")]
    BonusIsConstructor(String),
    #[error("bonus driver `{0}` is not part of the team")]
    BonusNotInTeam(String),
    #[error("pick `{0}` appears more than once")]
    DuplicatePick(String),
    #[error("team has {actual} picks, expected {expected}")]
    WrongSize { expected: usize, actual: usize },
    #[error("team has {actual} {kind} picks, expected {expected}")]
    WrongComposition { kind: PickKind, expected: usize, actual: usize },
    #[error("team costs {cost:.1}, over the budget of {budget:.1}")]
    OverBudget { cost: f64, budget: f64 },
    #[error("team has {0} bonus picks, expected exactly one")]
    BonusCount(usize),
    #[error("invalid rules: {0}")]
    InvalidRules(String),
}

/// Failure of name-based team construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TeamError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SolveError {
    #[error("no legal team exists: {0}")]
    Infeasible(String),
    /// The search hit its node or time budget before proving optimality.
    /// `incumbent` is the objective of the best team seen so far, if any,
    /// and is not known to be optimal.
    #[error("search stopped after {nodes} nodes without proving optimality (best so far: {incumbent:?})")]
    ResourceExhausted { nodes: u64, incumbent: Option<f64> },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("pick id {0} is already in the catalog")]
    DuplicateId(PickId),
    #[error("pick {id} has cost {cost}, expected a non-negative number")]
    InvalidCost { id: PickId, cost: f64 },
    #[error("pick {id} has score {score}, expected a finite number")]
    InvalidScore { id: PickId, score: f64 },
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed feed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("player id `{0}` is not a number")]
    BadId(String),
    #[error("unknown pick kind `{kind}` for player {id}")]
    UnknownKind { id: PickId, kind: String },
    #[error("field `{field}` of player {id} is not a number: `{value}`")]
    BadNumber { id: PickId, field: &'static str, value: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
