use std::cmp::Ordering;

use itertools::Itertools;

use crate::action::{Action, ActionError, ActionResult, Index, Swap};
use crate::model::condition::{Fixed, Rules};
use crate::model::entity::{Catalog, Pick, PickKind};


/// A catalog pick with its score and cost quantized to the rules' fixed point.
#[derive(Debug, Clone, Copy)]
pub struct CachedPick<'a> {
    pub pick: &'a Pick,
    pub score: Fixed,
    pub cost: Fixed,
}

impl CachedPick<'_> {
    fn search_order(&self, other: &Self) -> Ordering {
        other.score.cmp(&self.score)
            .then(self.cost.cmp(&other.cost))
            .then(self.pick.id.cmp(&other.pick.id))
    }
}

/// Both pick groups of a catalog, each sorted by score (best first), then by
/// cost (cheapest first), then by id. Everything downstream refers to picks by
/// their index in this order, which makes every search deterministic.
#[derive(Debug, Clone)]
pub struct Pool<'a> {
    pub drivers: Vec<CachedPick<'a>>,
    pub constructors: Vec<CachedPick<'a>>,
}

impl<'a> Pool<'a> {
    pub fn create(catalog: &'a Catalog, rules: &Rules) -> Pool<'a> {
        let group = move |kind: PickKind| -> Vec<CachedPick<'a>> {
            catalog.of_kind(kind)
                .map(|pick| CachedPick { pick, score: rules.quantize(pick.score), cost: rules.quantize_cost(pick.cost) })
                .sorted_by(|a, b| a.search_order(b))
                .collect()
        };
        Pool { drivers: group(PickKind::Driver), constructors: group(PickKind::Constructor) }
    }

    pub fn group(&self, kind: PickKind) -> &[CachedPick<'a>] {
        match kind {
            PickKind::Driver => &self.drivers,
            PickKind::Constructor => &self.constructors,
        }
    }

    /// Indices of the `n` cheapest picks of `kind`, or `None` if there are fewer.
    pub fn cheapest(&self, kind: PickKind, n: usize) -> Option<Vec<Index>> {
        let group = self.group(kind);
        if group.len() < n {
            return None;
        }
        Some(
            (0..group.len())
                .sorted_by(|a, b| group[*a].cost.cmp(&group[*b].cost).then(a.cmp(b)))
                .take(n)
                .collect()
        )
    }
}


#[derive(Debug, Clone, PartialEq)]
struct GroupCache {
    kind: PickKind,
    members: Vec<Index>,
    selected: Vec<bool>,
    score: Fixed,
    cost: Fixed,
}

impl GroupCache {
    fn create(kind: PickKind, members: Vec<Index>, pool: &Pool) -> GroupCache {
        let group = pool.group(kind);
        let mut selected = vec![false; group.len()];
        members.iter().for_each(|index| selected[*index] = true);
        let score = members.iter().map(|index| group[*index].score).sum();
        let cost = members.iter().map(|index| group[*index].cost).sum();
        GroupCache { kind, members, selected, score, cost }
    }

    fn check(&self, swap: &Swap) -> Option<ActionError> {
        if swap.position.slot >= self.members.len() {
            Some(ActionError::InvalidPosition)
        } else if swap.incoming >= self.selected.len() {
            Some(ActionError::InvalidCandidate)
        } else if self.selected[swap.incoming] {
            Some(ActionError::AlreadySelected)
        } else {
            None
        }
    }

    fn swap(&mut self, swap: &Swap, pool: &Pool) {
        let group = pool.group(self.kind);
        let outgoing = self.members[swap.position.slot];
        self.selected[outgoing] = false;
        self.selected[swap.incoming] = true;
        self.members[swap.position.slot] = swap.incoming;
        self.score += group[swap.incoming].score - group[outgoing].score;
        self.cost += group[swap.incoming].cost - group[outgoing].cost;
    }
}


/// Running totals of a legal-composition team, kept up to date as the
/// annealer swaps picks in and out.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCache {
    drivers: GroupCache,
    constructors: GroupCache,
}

impl TeamCache {
    pub fn create(drivers: Vec<Index>, constructors: Vec<Index>, pool: &Pool) -> TeamCache {
        TeamCache {
            drivers: GroupCache::create(PickKind::Driver, drivers, pool),
            constructors: GroupCache::create(PickKind::Constructor, constructors, pool),
        }
    }

    /// The cheapest team with the required composition, if the pool has enough picks.
    pub fn cheapest(pool: &Pool, rules: &Rules) -> Option<TeamCache> {
        let drivers = pool.cheapest(PickKind::Driver, rules.num_drivers())?;
        let constructors = pool.cheapest(PickKind::Constructor, rules.num_constructors)?;
        Some(TeamCache::create(drivers, constructors, pool))
    }

    fn group(&self, kind: PickKind) -> &GroupCache {
        match kind {
            PickKind::Driver => &self.drivers,
            PickKind::Constructor => &self.constructors,
        }
    }

    fn group_mut(&mut self, kind: PickKind) -> &mut GroupCache {
        match kind {
            PickKind::Driver => &mut self.drivers,
            PickKind::Constructor => &mut self.constructors,
        }
    }

    pub fn members(&self, kind: PickKind) -> &[Index] {
        &self.group(kind).members
    }

    pub fn is_selected(&self, kind: PickKind, index: Index) -> bool {
        self.group(kind).selected.get(index).copied().unwrap_or(false)
    }

    pub fn cost(&self) -> Fixed {
        self.drivers.cost + self.constructors.cost
    }

    /// Index of the driver that carries the bonus: the lowest pool index
    /// among the selected drivers, i.e. the best-scoring one.
    pub fn bonus(&self) -> Option<Index> {
        self.drivers.members.iter().min().copied()
    }

    /// Sum of member scores plus the bonus driver's score once more.
    pub fn objective(&self, pool: &Pool) -> Fixed {
        let bonus = self.bonus().map(|index| pool.drivers[index].score).unwrap_or(0);
        self.drivers.score + self.constructors.score + bonus
    }

    fn check(&self, action: &Action) -> Vec<ActionError> {
        let swaps = action.swaps();
        let mut errors: Vec<ActionError> = swaps.iter()
            .filter_map(|swap| self.group(swap.position.kind).check(swap))
            .collect();
        if let [first, second] = swaps.as_slice() {
            if first.position.kind == second.position.kind
                && (first.position.slot == second.position.slot || first.incoming == second.incoming)
            {
                errors.push(ActionError::Overlapping);
            }
        }
        errors
    }

    pub fn simulate(&self, action: &Action, pool: &Pool, budget: Fixed) -> ActionResult {
        let errors = self.check(action);
        if !errors.is_empty() {
            return ActionResult::Failed(errors);
        }
        let mut next = self.clone();
        for swap in action.swaps() {
            next.group_mut(swap.position.kind).swap(&swap, pool);
        }
        let diff = next.objective(pool) - self.objective(pool);
        if next.cost() <= budget {
            ActionResult::ScoreDiff(diff)
        } else {
            ActionResult::OverBudget(diff)
        }
    }

    pub fn act(&mut self, action: &Action, pool: &Pool) -> Result<(), ActionError> {
        if let Some(error) = self.check(action).into_iter().next() {
            return Err(error);
        }
        for swap in action.swaps() {
            self.group_mut(swap.position.kind).swap(&swap, pool);
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Position;

    fn catalog() -> Catalog {
        vec![
            Pick::constructor(1, "Alpha", 50.0, 10.0),
            Pick::constructor(2, "Bravo", 40.0, 8.0),
            Pick::constructor(3, "Charlie", 30.0, 6.0),
            Pick::driver(11, "D1", 20.0, 9.0, 1),
            Pick::driver(12, "D2", 18.0, 7.0, 1),
            Pick::driver(13, "D3", 15.0, 5.0, 2),
            Pick::driver(14, "D4", 10.0, 4.0, 2),
            Pick::driver(15, "D5", 5.0, 3.0, 3),
        ].into_iter().collect()
    }

    fn swap(kind: PickKind, slot: Index, incoming: Index) -> Swap {
        Swap { position: Position { kind, slot }, incoming }
    }

    #[test]
    fn pool_is_sorted_best_first() {
        let catalog = catalog();
        let pool = Pool::create(&catalog, &Rules::new(30.0, 4, 1));
        let ids: Vec<u32> = pool.drivers.iter().map(|c| c.pick.id).collect();
        assert_eq!(ids, vec![11, 12, 13, 14, 15]);
        assert_eq!(pool.constructors[2].cost, 60);
        assert_eq!(pool.cheapest(PickKind::Driver, 2), Some(vec![4, 3]));
        assert_eq!(pool.cheapest(PickKind::Constructor, 4), None);
    }

    #[test]
    fn cheapest_team_and_objective() {
        let catalog = catalog();
        let rules = Rules::new(30.0, 4, 1);
        let pool = Pool::create(&catalog, &rules);
        let team = TeamCache::cheapest(&pool, &rules).unwrap();
        // Charlie + D5, D4, D3: cost 6 + 3 + 4 + 5
        assert_eq!(team.cost(), 180);
        assert_eq!(team.bonus(), Some(2));
        assert_eq!(team.objective(&pool), 300 + 50 + 100 + 150 + 150);
    }

    #[test]
    fn simulate_matches_act() {
        let catalog = catalog();
        let rules = Rules::new(30.0, 4, 1);
        let pool = Pool::create(&catalog, &rules);
        let mut team = TeamCache::cheapest(&pool, &rules).unwrap();
        let before = team.objective(&pool);
        // D5 out, D1 in: bonus moves to D1
        let action = Action::Single(swap(PickKind::Driver, 0, 0));
        let result = team.simulate(&action, &pool, rules.budget_limit());
        team.act(&action, &pool).unwrap();
        assert_eq!(result, ActionResult::ScoreDiff(team.objective(&pool) - before));
        assert_eq!(team.objective(&pool) - before, (200 - 50) + (200 - 150));
        assert_eq!(team.bonus(), Some(0));
    }

    #[test]
    fn simulate_flags_over_budget() {
        let catalog = catalog();
        let rules = Rules::new(20.0, 4, 1);
        let pool = Pool::create(&catalog, &rules);
        let team = TeamCache::cheapest(&pool, &rules).unwrap();
        let action = Action::Single(swap(PickKind::Constructor, 0, 0));
        assert!(matches!(team.simulate(&action, &pool, rules.budget_limit()), ActionResult::OverBudget(_)));
    }

    #[test]
    fn double_swap_can_trade_budget_between_groups() {
        let catalog = catalog();
        let rules = Rules::new(22.0, 3, 1);
        let pool = Pool::create(&catalog, &rules);
        // Alpha + D4 + D5 costs 17. D5 -> D2 alone would cost 21, paired
        // with Alpha -> Charlie the total stays at 17.
        let team = TeamCache::create(vec![3, 4], vec![0], &pool);
        let action = Action::Double(swap(PickKind::Constructor, 0, 2), swap(PickKind::Driver, 1, 1));
        match team.simulate(&action, &pool, rules.budget_limit()) {
            ActionResult::ScoreDiff(diff) => assert_eq!(diff, (300 - 500) + (180 - 50) + (180 - 100)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_actions_fail() {
        let catalog = catalog();
        let rules = Rules::new(30.0, 4, 1);
        let pool = Pool::create(&catalog, &rules);
        let mut team = TeamCache::cheapest(&pool, &rules).unwrap();
        let taken = team.members(PickKind::Driver)[1];
        assert_eq!(
            team.simulate(&Action::Single(swap(PickKind::Driver, 0, taken)), &pool, 300),
            ActionResult::Failed(vec![ActionError::AlreadySelected])
        );
        assert_eq!(
            team.act(&Action::Single(swap(PickKind::Constructor, 1, 0)), &pool),
            Err(ActionError::InvalidPosition)
        );
        assert_eq!(
            team.act(&Action::Double(swap(PickKind::Driver, 0, 0), swap(PickKind::Driver, 1, 0)), &pool),
            Err(ActionError::Overlapping)
        );
        assert_eq!(
            team.simulate(&Action::Single(swap(PickKind::Driver, 0, 9)), &pool, 300),
            ActionResult::Failed(vec![ActionError::InvalidCandidate])
        );
    }
}
