use log::debug;
use rand::prelude::{Rng, SeedableRng, SliceRandom};
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionResult, Index, Position, Swap};
use crate::cache::{Pool, TeamCache};
use crate::model::condition::Rules;
use crate::model::entity::PickKind;


/// Simulated annealing schedule used to find a strong starting team for the
/// exact search. Temperature is in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealParams {
    pub temperature: f64,
    pub cooling_rate: f64,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for AnnealParams {
    fn default() -> Self {
        AnnealParams { temperature: 5.0, cooling_rate: 0.995, max_iterations: 2000, seed: 7 }
    }
}

struct State {
    team: TeamCache,
    n_iterations: usize,
    temperature: f64,
}

struct SwapGenerator {
    slots: Vec<(PickKind, usize)>,
    candidates: Vec<Position>,
    rng: SmallRng,
}

impl SwapGenerator {
    fn new(rules: &Rules, seed: u64) -> SwapGenerator {
        SwapGenerator {
            slots: vec![
                (PickKind::Driver, rules.num_drivers()),
                (PickKind::Constructor, rules.num_constructors),
            ],
            candidates: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn init(&mut self) {
        self.candidates = self.slots
            .iter()
            .flat_map(|(kind, size)| (0..*size).map(move |slot| Position { kind: *kind, slot }))
            .collect();
        self.candidates.shuffle(&mut self.rng);
    }

    fn next_position(&mut self) -> Option<Position> {
        if self.candidates.is_empty() {
            self.init();
        }
        self.candidates.pop()
    }

    fn incoming(&mut self, team: &TeamCache, pool: &Pool, kind: PickKind) -> Option<Index> {
        let free: Vec<Index> = (0..pool.group(kind).len())
            .filter(|index| !team.is_selected(kind, *index))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    fn swap(&mut self, team: &TeamCache, pool: &Pool) -> Option<Swap> {
        // a partial batch plus one full batch visits every slot at least once
        let total: usize = self.slots.iter().map(|(_, size)| size).sum();
        for _ in 0..2 * total {
            let position = self.next_position()?;
            if let Some(incoming) = self.incoming(team, pool, position.kind) {
                return Some(Swap { position, incoming });
            }
        }
        None
    }

    /// Either a single same-kind swap, or a driver swap paired with a
    /// constructor swap so budget can move between the two groups.
    fn next(&mut self, team: &TeamCache, pool: &Pool) -> Option<Action> {
        let first = self.swap(team, pool)?;
        if self.rng.gen_bool(0.3) {
            let other = match first.position.kind {
                PickKind::Driver => PickKind::Constructor,
                PickKind::Constructor => PickKind::Driver,
            };
            let slots = team.members(other).len();
            if slots > 0 {
                let position = Position { kind: other, slot: self.rng.gen_range(0..slots) };
                if let Some(incoming) = self.incoming(team, pool, other) {
                    return Some(Action::Double(first, Swap { position, incoming }));
                }
            }
        }
        Some(Action::Single(first))
    }
}

/// Improves `start` by random same-kind swaps, accepting worse teams with the
/// usual Metropolis probability. Only teams within `rules.budget` are ever
/// accepted, and the best team seen is returned.
pub fn anneal(start: TeamCache, pool: &Pool, rules: &Rules, params: &AnnealParams) -> TeamCache {
    let budget = rules.budget_limit();
    let mut generator = SwapGenerator::new(rules, params.seed);
    let mut rng = SmallRng::seed_from_u64(params.seed.wrapping_add(1));
    let mut best = start.clone();
    let mut best_objective = best.objective(pool);
    let mut state = State { team: start, n_iterations: 0, temperature: params.temperature };

    while state.n_iterations < params.max_iterations {
        state.n_iterations += 1;
        state.temperature *= params.cooling_rate;
        let Some(action) = generator.next(&state.team, pool) else {
            // every pick of each kind is already in the team
            break;
        };
        let diff = match state.team.simulate(&action, pool, budget) {
            ActionResult::ScoreDiff(diff) => diff,
            ActionResult::OverBudget(_) | ActionResult::Failed(_) => continue,
        };
        let accept = diff >= 0
            || (state.temperature > 0.0
                && rng.gen::<f64>() < (rules.unquantize(diff) / state.temperature).exp());
        if !accept || state.team.act(&action, pool).is_err() {
            continue;
        }
        let objective = state.team.objective(pool);
        if objective > best_objective {
            best_objective = objective;
            best = state.team.clone();
        }
    }
    debug!(
        "annealing finished after {} iterations, best objective {}",
        state.n_iterations,
        rules.unquantize(best_objective)
    );
    best
}
