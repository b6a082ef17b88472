use thiserror::Error;

use crate::model::condition::Fixed;
use crate::model::entity::PickKind;

pub type Index = usize;

/// A slot in the team under construction: the `slot`-th selected pick of `kind`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub kind: PickKind,
    pub slot: Index,
}

/// Replace the pick at `position` with the pool entry `incoming` of the same kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swap {
    pub position: Position,
    pub incoming: Index,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Single(Swap),
    /// Two swaps applied together, e.g. downgrading a constructor to pay for
    /// a better driver. Neither half has to fit the budget on its own.
    Double(Swap, Swap),
}

impl Action {
    pub fn swaps(&self) -> Vec<Swap> {
        match self {
            Action::Single(swap) => vec![*swap],
            Action::Double(first, second) => vec![*first, *second],
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Invalid candidate")]
    InvalidCandidate,
    #[error("Candidate already selected")]
    AlreadySelected,
    #[error("Swaps overlap")]
    Overlapping,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    ScoreDiff(Fixed),
    OverBudget(Fixed),   // score diff of a team that no longer fits the budget
    Failed(Vec<ActionError>),
}
