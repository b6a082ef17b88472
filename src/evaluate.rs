use std::fmt;

use serde::Serialize;

use crate::model::entity::Points;
use crate::model::team::Team;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub score: Points,
    pub cost: f64,
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team total: {} Pts, ${:.1}M", self.score, self.cost)
    }
}

/// Sums a team's scores and costs. The bonus member counts twice.
pub fn evaluate(team: &Team) -> Totals {
    team.iter().fold(Totals { score: 0.0, cost: 0.0 }, |totals, member| Totals {
        score: totals.score + member.pick.score * if member.is_bonus { 2.0 } else { 1.0 },
        cost: totals.cost + member.pick.cost,
    })
}
