//! Fantasy team optimizer: picks the best legal team of drivers and
//! constructors under a budget, and scores user-built teams.

pub mod action;
pub mod anneal;
pub mod cache;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod feed;
pub mod model;
pub mod roster;
pub mod simulate;
pub mod solver;

pub use error::{LookupError, SolveError, TeamError, ValidationError};
pub use evaluate::{evaluate, Totals};
pub use model::condition::Rules;
pub use model::entity::{Catalog, Pick, PickId, PickKind};
pub use model::team::{Member, Team};
pub use roster::build_team;
pub use simulate::{rescored, PointsTable, RaceResult};
pub use solver::{optimize, Solution, SolveOptions};
