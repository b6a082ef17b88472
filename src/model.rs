pub mod entity {
    use std::collections::HashMap;
    use std::fmt;

    use itertools::Itertools;
    use serde::{Deserialize, Serialize};

    use crate::error::{CatalogError, LookupError};

    pub type PickId = u32;
    pub type Points = f64;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum PickKind {
        Driver,
        Constructor,
    }

    impl fmt::Display for PickKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                PickKind::Driver => f.write_str("DRIVER"),
                PickKind::Constructor => f.write_str("CONSTRUCTOR"),
            }
        }
    }

    /// A driver or constructor on offer. Picks are never mutated once they are
    /// in a catalog; rescoring builds a new catalog.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Pick {
        pub id: PickId,
        pub kind: PickKind,
        pub name: String,
        pub score: Points,
        pub cost: f64,
        /// Owning constructor. A constructor is affiliated with itself.
        pub affiliation: PickId,
    }

    impl Pick {
        pub fn driver(id: PickId, name: &str, score: Points, cost: f64, affiliation: PickId) -> Pick {
            Pick { id, kind: PickKind::Driver, name: name.to_string(), score, cost, affiliation }
        }

        pub fn constructor(id: PickId, name: &str, score: Points, cost: f64) -> Pick {
            Pick { id, kind: PickKind::Constructor, name: name.to_string(), score, cost, affiliation: id }
        }

        pub fn is_driver(&self) -> bool {
            self.kind == PickKind::Driver
        }

        pub fn with_score(&self, score: Points) -> Pick {
            Pick { score, ..self.clone() }
        }

        /// Scores must be finite and costs finite and non-negative.
        pub fn check(&self) -> Result<(), CatalogError> {
            if !self.score.is_finite() {
                return Err(CatalogError::InvalidScore { id: self.id, score: self.score });
            }
            if !self.cost.is_finite() || self.cost < 0.0 {
                return Err(CatalogError::InvalidCost { id: self.id, cost: self.cost });
            }
            Ok(())
        }
    }

    impl fmt::Display for Pick {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}: {} Pts, ${:.1}M", self.name, self.score, self.cost)
        }
    }

    #[derive(Debug, Clone, Default)]
    pub struct Catalog {
        picks: HashMap<PickId, Pick>,
    }

    impl Catalog {
        pub fn new() -> Catalog {
            Catalog::default()
        }

        pub fn insert(&mut self, pick: Pick) -> Result<(), CatalogError> {
            pick.check()?;
            if self.picks.contains_key(&pick.id) {
                return Err(CatalogError::DuplicateId(pick.id));
            }
            self.picks.insert(pick.id, pick);
            Ok(())
        }

        /// Checks every pick. Catalogs collected from an iterator skip the
        /// checks `insert` does.
        pub fn check(&self) -> Result<(), CatalogError> {
            self.picks.values().sorted_by_key(|pick| pick.id).try_for_each(Pick::check)
        }

        pub fn get(&self, id: PickId) -> Option<&Pick> {
            self.picks.get(&id)
        }

        pub fn len(&self) -> usize {
            self.picks.len()
        }

        pub fn is_empty(&self) -> bool {
            self.picks.is_empty()
        }

        pub fn iter(&self) -> impl Iterator<Item = &Pick> {
            self.picks.values()
        }

        pub fn of_kind(&self, kind: PickKind) -> impl Iterator<Item = &Pick> {
            self.picks.values().filter(move |pick| pick.kind == kind)
        }

        pub fn find_by_name(&self, name: &str) -> Result<&Pick, LookupError> {
            let mut matches = self.picks.values().filter(|pick| pick.name == name);
            match (matches.next(), matches.count()) {
                (Some(pick), 0) => Ok(pick),
                (Some(_), rest) => Err(LookupError::Ambiguous { name: name.to_string(), count: rest + 1 }),
                (None, _) => Err(LookupError::NotFound(name.to_string())),
            }
        }
    }

    impl FromIterator<Pick> for Catalog {
        fn from_iter<I: IntoIterator<Item = Pick>>(iter: I) -> Self {
            Catalog { picks: iter.into_iter().map(|pick| (pick.id, pick)).collect() }
        }
    }
}


pub mod team {
    use std::collections::HashSet;
    use std::fmt;

    use super::condition::{Fixed, Rules};
    use super::entity::{Pick, PickId, PickKind};
    use crate::error::ValidationError;

    /// One membership of a pick in a team. The bonus marker lives here, not on
    /// the pick, so teams built from the same catalog never see each other's
    /// bonus choice.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Member<'a> {
        pub pick: &'a Pick,
        pub is_bonus: bool,
    }

    impl fmt::Display for Member<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let tag = if self.is_bonus { "[BONUS] " } else { "" };
            write!(f, "Pick({}{})", tag, self.pick)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Team<'a> {
        members: Vec<Member<'a>>,
    }

    impl<'a> Team<'a> {
        pub fn new(members: Vec<Member<'a>>) -> Team<'a> {
            Team { members }
        }

        pub fn members(&self) -> &[Member<'a>] {
            &self.members
        }

        pub fn iter(&self) -> impl Iterator<Item = &Member<'a>> {
            self.members.iter()
        }

        pub fn len(&self) -> usize {
            self.members.len()
        }

        pub fn is_empty(&self) -> bool {
            self.members.is_empty()
        }

        pub fn bonus(&self) -> Option<&Member<'a>> {
            self.members.iter().find(|member| member.is_bonus)
        }

        pub fn contains(&self, id: PickId) -> bool {
            self.members.iter().any(|member| member.pick.id == id)
        }

        pub fn ids(&self) -> Vec<PickId> {
            let mut ids: Vec<PickId> = self.members.iter().map(|member| member.pick.id).collect();
            ids.sort_unstable();
            ids
        }

        /// Constructors first, then the most expensive picks.
        pub fn sorted_for_display(&self) -> Vec<&Member<'a>> {
            let mut members: Vec<&Member<'a>> = self.members.iter().collect();
            members.sort_by(|a, b| {
                b.pick.kind.cmp(&a.pick.kind)
                    .then(b.pick.cost.total_cmp(&a.pick.cost))
                    .then(a.pick.id.cmp(&b.pick.id))
            });
            members
        }

        /// Checks every legality rule of a team: size, composition, budget and
        /// a single driver carrying the bonus. Costs are compared at the
        /// rules' fixed-point resolution, the same way the optimizer sees them.
        pub fn validate(&self, rules: &Rules) -> Result<(), ValidationError> {
            rules.check()?;
            let mut seen = HashSet::new();
            for member in &self.members {
                if !seen.insert(member.pick.id) {
                    return Err(ValidationError::DuplicatePick(member.pick.name.clone()));
                }
            }
            if self.members.len() != rules.capacity {
                return Err(ValidationError::WrongSize { expected: rules.capacity, actual: self.members.len() });
            }
            for kind in [PickKind::Constructor, PickKind::Driver] {
                let actual = self.members.iter().filter(|member| member.pick.kind == kind).count();
                let expected = rules.slots(kind);
                if actual != expected {
                    return Err(ValidationError::WrongComposition { kind, expected, actual });
                }
            }
            let cost: Fixed = self.members.iter().map(|member| rules.quantize_cost(member.pick.cost)).sum();
            if cost > rules.budget_limit() {
                return Err(ValidationError::OverBudget { cost: rules.unquantize(cost), budget: rules.budget });
            }
            let bonuses: Vec<&Member<'a>> = self.members.iter().filter(|member| member.is_bonus).collect();
            match bonuses.as_slice() {
                [member] if member.pick.kind == PickKind::Constructor => {
                    Err(ValidationError::BonusIsConstructor(member.pick.name.clone()))
                }
                [_] => Ok(()),
                _ => Err(ValidationError::BonusCount(bonuses.len())),
            }
        }
    }

    impl fmt::Display for Team<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for member in self.sorted_for_display() {
                writeln!(f, "{}", member)?;
            }
            Ok(())
        }
    }
}


pub mod condition {
    use serde::{Deserialize, Serialize};

    use super::entity::PickKind;
    use crate::error::ValidationError;

    /// Fixed-point value: a score or cost multiplied by `Rules::scale`.
    pub type Fixed = i64;

    /// Absorbs float noise such as `17.9 * 10.0 == 178.99999999999997`.
    const QUANTIZE_SLACK: f64 = 1e-9;

    /// Selection rules for one solve. The defaults are the fantasy game's
    /// regular season rules: 5 drivers, 2 constructors, a 100M budget.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Rules {
        pub budget: f64,
        pub capacity: usize,
        pub num_constructors: usize,
        /// Fixed-point resolution used by the search. With scale 10 every
        /// score and cost is exact to within 0.05.
        pub scale: u32,
    }

    impl Default for Rules {
        fn default() -> Self {
            Rules { budget: 100.0, capacity: 7, num_constructors: 2, scale: 10 }
        }
    }

    impl Rules {
        pub fn new(budget: f64, capacity: usize, num_constructors: usize) -> Rules {
            Rules { budget, capacity, num_constructors, ..Rules::default() }
        }

        pub fn with_scale(self, scale: u32) -> Rules {
            Rules { scale, ..self }
        }

        pub fn num_drivers(&self) -> usize {
            self.capacity.saturating_sub(self.num_constructors)
        }

        pub fn slots(&self, kind: PickKind) -> usize {
            match kind {
                PickKind::Driver => self.num_drivers(),
                PickKind::Constructor => self.num_constructors,
            }
        }

        pub fn quantize(&self, value: f64) -> Fixed {
            (value * self.scale as f64).round() as Fixed
        }

        /// Costs round up and the budget rounds down, so a team that fits
        /// at fixed-point resolution also fits at full precision.
        pub fn quantize_cost(&self, cost: f64) -> Fixed {
            (cost * self.scale as f64 - QUANTIZE_SLACK).ceil() as Fixed
        }

        pub fn unquantize(&self, value: Fixed) -> f64 {
            value as f64 / self.scale as f64
        }

        pub fn budget_limit(&self) -> Fixed {
            (self.budget * self.scale as f64 + QUANTIZE_SLACK).floor() as Fixed
        }

        pub fn check(&self) -> Result<(), ValidationError> {
            if self.scale == 0 {
                return Err(ValidationError::InvalidRules("scale must be positive".to_string()));
            }
            if !self.budget.is_finite() || self.budget < 0.0 {
                return Err(ValidationError::InvalidRules(format!("budget {} is not a non-negative number", self.budget)));
            }
            if self.num_constructors > self.capacity {
                return Err(ValidationError::InvalidRules(format!(
                    "{} constructors do not fit in a team of {}",
                    self.num_constructors, self.capacity
                )));
            }
            if self.num_drivers() == 0 {
                return Err(ValidationError::InvalidRules("a team needs at least one driver to carry the bonus".to_string()));
            }
            Ok(())
        }
    }
}
