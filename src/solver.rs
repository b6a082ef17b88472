use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, info};

use crate::action::Index;
use crate::anneal::{anneal, AnnealParams};
use crate::cache::{CachedPick, Pool, TeamCache};
use crate::error::SolveError;
use crate::model::condition::{Fixed, Rules};
use crate::model::entity::{Catalog, PickKind};
use crate::model::team::{Member, Team};


/// Search limits and warm start settings. With no limits the search always
/// runs to a proven optimum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveOptions {
    pub node_limit: Option<u64>,
    pub time_limit_ms: Option<u64>,
    pub anneal: AnnealParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution<'a> {
    pub team: Team<'a>,
    /// Fixed-point objective scaled back to points.
    pub objective: f64,
    pub nodes: u64,
    /// The annealed starting team was already optimal.
    pub warm_start_optimal: bool,
}

/// Score and cost bounds over the tail `group[i..]` of one pool group.
struct Suffix {
    prefix_score: Vec<Fixed>,
    min_cost: Vec<Vec<Fixed>>,
}

impl Suffix {
    fn create(group: &[CachedPick], need: usize) -> Suffix {
        let mut prefix_score = vec![0; group.len() + 1];
        for (i, candidate) in group.iter().enumerate() {
            prefix_score[i + 1] = prefix_score[i] + candidate.score;
        }
        let min_cost = (0..=group.len())
            .map(|i| {
                let cheapest = group[i..].iter().map(|candidate| candidate.cost).sorted().take(need);
                std::iter::once(0)
                    .chain(cheapest.scan(0, |total, cost| {
                        *total += cost;
                        Some(*total)
                    }))
                    .collect::<Vec<Fixed>>()
            })
            .collect();
        Suffix { prefix_score, min_cost }
    }

    /// Highest total score of `k` picks from `group[i..]`. The group is sorted
    /// best first, so that is simply the next `k`.
    fn top_score(&self, i: Index, k: usize) -> Option<Fixed> {
        self.prefix_score.get(i + k).map(|end| end - self.prefix_score[i])
    }

    fn min_cost(&self, i: Index, k: usize) -> Option<Fixed> {
        self.min_cost.get(i)?.get(k).copied()
    }
}

#[derive(Debug, Clone)]
struct Incumbent {
    objective: Fixed,
    drivers: Vec<Index>,
    constructors: Vec<Index>,
}

impl Incumbent {
    fn from_cache(team: &TeamCache, pool: &Pool) -> Incumbent {
        Incumbent {
            objective: team.objective(pool),
            drivers: team.members(PickKind::Driver).iter().copied().sorted().collect(),
            constructors: team.members(PickKind::Constructor).iter().copied().sorted().collect(),
        }
    }
}

/// Depth-first branch and bound. Constructors are decided first, then
/// drivers, each group in pool order. Because drivers are visited best
/// first, the first driver taken is the one that carries the bonus.
struct Search<'p, 'a> {
    pool: &'p Pool<'a>,
    budget: Fixed,
    need_drivers: usize,
    need_constructors: usize,
    driver_bounds: Suffix,
    constructor_bounds: Suffix,
    drivers: Vec<Index>,
    constructors: Vec<Index>,
    best: Incumbent,
    improved: bool,
    nodes: u64,
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    exhausted: bool,
}

impl<'p, 'a> Search<'p, 'a> {
    fn new(pool: &'p Pool<'a>, rules: &Rules, options: &SolveOptions, best: Incumbent) -> Search<'p, 'a> {
        Search {
            pool,
            budget: rules.budget_limit(),
            need_drivers: rules.num_drivers(),
            need_constructors: rules.num_constructors,
            driver_bounds: Suffix::create(&pool.drivers, rules.num_drivers()),
            constructor_bounds: Suffix::create(&pool.constructors, rules.num_constructors),
            drivers: Vec::with_capacity(rules.num_drivers()),
            constructors: Vec::with_capacity(rules.num_constructors),
            best,
            improved: false,
            nodes: 0,
            node_limit: options.node_limit,
            deadline: options.time_limit_ms.map(|ms| Instant::now() + Duration::from_millis(ms)),
            exhausted: false,
        }
    }

    fn tick(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        self.nodes += 1;
        if self.node_limit.is_some_and(|limit| self.nodes > limit) {
            self.exhausted = true;
        } else if self.nodes % 1024 == 1 && self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            self.exhausted = true;
        }
        !self.exhausted
    }

    fn run(&mut self) {
        self.branch_constructors(0, 0, 0);
    }

    fn branch_constructors(&mut self, index: Index, score: Fixed, cost: Fixed) {
        if !self.tick() {
            return;
        }
        let left = self.need_constructors - self.constructors.len();
        if left == 0 {
            self.branch_drivers(0, score, cost, None);
            return;
        }
        let pool = self.pool;
        let bounds = (
            self.constructor_bounds.top_score(index, left),
            self.constructor_bounds.min_cost(index, left),
            self.driver_bounds.top_score(0, self.need_drivers),
            self.driver_bounds.min_cost(0, self.need_drivers),
        );
        let (Some(top_c), Some(cheap_c), Some(top_d), Some(cheap_d)) = bounds else {
            return;
        };
        let bonus = pool.drivers.first().map(|driver| driver.score).unwrap_or(0);
        if cost + cheap_c + cheap_d > self.budget || score + top_c + top_d + bonus <= self.best.objective {
            return;
        }
        let candidate = pool.constructors[index];
        if cost + candidate.cost <= self.budget {
            self.constructors.push(index);
            self.branch_constructors(index + 1, score + candidate.score, cost + candidate.cost);
            self.constructors.pop();
        }
        self.branch_constructors(index + 1, score, cost);
    }

    fn branch_drivers(&mut self, index: Index, score: Fixed, cost: Fixed, bonus: Option<Fixed>) {
        if !self.tick() {
            return;
        }
        let left = self.need_drivers - self.drivers.len();
        if left == 0 {
            let objective = score + bonus.unwrap_or(0);
            if objective > self.best.objective {
                self.best = Incumbent {
                    objective,
                    drivers: self.drivers.clone(),
                    constructors: self.constructors.clone(),
                };
                self.improved = true;
            }
            return;
        }
        let pool = self.pool;
        let (Some(top), Some(cheap)) = (
            self.driver_bounds.top_score(index, left),
            self.driver_bounds.min_cost(index, left),
        ) else {
            return;
        };
        let candidate = pool.drivers[index];
        let bonus_bound = bonus.unwrap_or(candidate.score);
        if cost + cheap > self.budget || score + top + bonus_bound <= self.best.objective {
            return;
        }
        if cost + candidate.cost <= self.budget {
            self.drivers.push(index);
            self.branch_drivers(index + 1, score + candidate.score, cost + candidate.cost, bonus.or(Some(candidate.score)));
            self.drivers.pop();
        }
        self.branch_drivers(index + 1, score, cost, bonus);
    }
}

/// Finds the highest-scoring legal team in `catalog`.
///
/// Every selected pick scores once and the best driver scores twice.
/// Scores and costs are compared at the fixed-point resolution of
/// `rules.scale`. Ties are resolved by pool order, so identical inputs
/// always produce the identical team.
pub fn optimize<'a>(catalog: &'a Catalog, rules: &Rules, options: &SolveOptions) -> Result<Solution<'a>, SolveError> {
    rules.check()?;
    catalog.check()?;
    let pool = Pool::create(catalog, rules);
    for kind in [PickKind::Constructor, PickKind::Driver] {
        let available = pool.group(kind).len();
        let required = rules.slots(kind);
        if available < required {
            return Err(SolveError::Infeasible(format!("catalog has {} {} picks, {} required", available, kind, required)));
        }
    }
    let start = TeamCache::cheapest(&pool, rules)
        .ok_or_else(|| SolveError::Infeasible("not enough picks for the required composition".to_string()))?;
    if start.cost() > rules.budget_limit() {
        return Err(SolveError::Infeasible(format!(
            "cheapest legal team costs {:.1}, budget is {:.1}",
            rules.unquantize(start.cost()),
            rules.budget
        )));
    }

    let warm = anneal(start, &pool, rules, &options.anneal);
    let mut search = Search::new(&pool, rules, options, Incumbent::from_cache(&warm, &pool));
    debug!("searching {} picks from warm start objective {}", catalog.len(), rules.unquantize(search.best.objective));
    search.run();
    if search.exhausted {
        return Err(SolveError::ResourceExhausted {
            nodes: search.nodes,
            incumbent: Some(rules.unquantize(search.best.objective)),
        });
    }

    let best = search.best;
    let bonus = best.drivers.iter().min().copied();
    let members = best.constructors.iter()
        .map(|index| Member { pick: pool.constructors[*index].pick, is_bonus: false })
        .chain(best.drivers.iter().map(|index| Member { pick: pool.drivers[*index].pick, is_bonus: Some(*index) == bonus }))
        .collect();
    let team = Team::new(members);
    team.validate(rules)?;

    let objective = rules.unquantize(best.objective);
    info!(
        "optimal team found: {} points after {} nodes{}",
        objective,
        search.nodes,
        if search.improved { "" } else { " (warm start was optimal)" }
    );
    Ok(Solution { team, objective, nodes: search.nodes, warm_start_optimal: !search.improved })
}
