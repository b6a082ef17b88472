//! Derives pick scores from a finishing order.
//!
//! Scoring never touches the input catalog: [`rescored`] returns a new one,
//! so the same base catalog can be rescored for several races and solved
//! concurrently.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::model::entity::{Catalog, PickId, PickKind, Points};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Finished,
    Dnf,
    Dq,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placing {
    pub name: String,
    #[serde(default)]
    pub status: Status,
}

/// Drivers in finishing order, winner first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub placings: Vec<Placing>,
}

impl RaceResult {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> RaceResult {
        RaceResult {
            placings: names.iter()
                .map(|name| Placing { name: name.as_ref().to_string(), status: Status::Finished })
                .collect(),
        }
    }
}

/// Points policy. Defaults follow the fantasy game: a qualifying-style bonus
/// counting down from 10 for the front of the order, the usual 25-18-15...
/// race points for the top ten, and flat penalties for DNF and DQ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsTable {
    pub qualifying_start: Points,
    pub race: Vec<Points>,
    pub dnf: Points,
    pub dq: Points,
}

impl Default for PointsTable {
    fn default() -> Self {
        PointsTable {
            qualifying_start: 10.0,
            race: vec![25.0, 18.0, 15.0, 12.0, 10.0, 8.0, 6.0, 4.0, 2.0, 1.0],
            dnf: -20.0,
            dq: -25.0,
        }
    }
}

impl PointsTable {
    pub fn points(&self, position: usize, status: Status) -> Points {
        let qualifying = (self.qualifying_start - position as Points).max(0.0);
        let race = match status {
            Status::Finished => self.race.get(position).copied().unwrap_or(0.0),
            Status::Dnf => self.dnf,
            Status::Dq => self.dq,
        };
        qualifying + race
    }
}

/// Returns a copy of `catalog` scored for `result` alone. Every pick starts
/// from zero; constructors get the sum of their drivers' points.
pub fn rescored(catalog: &Catalog, result: &RaceResult, table: &PointsTable) -> Result<Catalog, LookupError> {
    let mut scores: HashMap<PickId, Points> = HashMap::new();
    for (position, placing) in result.placings.iter().enumerate() {
        let pick = catalog.find_by_name(&placing.name)?;
        if pick.kind != PickKind::Driver {
            warn!("`{}` is not a driver, ignoring its placing", pick.name);
            continue;
        }
        *scores.entry(pick.id).or_insert(0.0) += table.points(position, placing.status);
    }

    let mut constructor_scores: HashMap<PickId, Points> = HashMap::new();
    for driver in catalog.of_kind(PickKind::Driver) {
        let score = scores.get(&driver.id).copied().unwrap_or(0.0);
        match catalog.get(driver.affiliation) {
            Some(owner) if owner.kind == PickKind::Constructor => {
                *constructor_scores.entry(owner.id).or_insert(0.0) += score;
            }
            _ => warn!("driver `{}` has no constructor {} in the catalog", driver.name, driver.affiliation),
        }
    }

    Ok(catalog.iter()
        .map(|pick| {
            let score = match pick.kind {
                PickKind::Driver => scores.get(&pick.id),
                PickKind::Constructor => constructor_scores.get(&pick.id),
            };
            pick.with_score(score.copied().unwrap_or(0.0))
        })
        .collect())
}
