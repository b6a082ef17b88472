#![allow(dead_code)]

use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::Rng;

use team_pick::model::condition::Fixed;
use team_pick::{Catalog, Pick, PickKind, Rules};

/// Prices and season points after the 2023 Bahrain round.
pub fn season_catalog() -> Catalog {
    vec![
        Pick::constructor(29, "Red Bull Racing", 173.0, 27.2),
        Pick::driver(131, "Max Verstappen", 96.0, 26.9, 29),
        Pick::constructor(28, "Mercedes", 89.0, 25.1),
        Pick::driver(110, "Lewis Hamilton", 35.0, 23.7, 28),
        Pick::constructor(25, "Ferrari", 90.0, 22.1),
        Pick::driver(115, "Charles Leclerc", 16.0, 21.2, 25),
        Pick::driver(124, "George Russell", 34.0, 18.6, 28),
        Pick::driver(121, "Sergio Perez", 64.0, 18.0, 29),
        Pick::driver(125, "Carlos Sainz", 31.0, 17.2, 25),
        Pick::driver(117, "Lando Norris", 6.0, 11.2, 27),
        Pick::constructor(23, "Alpine", 36.0, 10.1),
        Pick::driver(118, "Esteban Ocon", -10.0, 9.4, 23),
        Pick::constructor(27, "McLaren", -2.0, 9.1),
        Pick::driver(12, "Fernando Alonso", 62.0, 8.3, 24),
        Pick::driver(18, "Pierre Gasly", 26.0, 8.1, 23),
        Pick::driver(13, "Valtteri Bottas", 11.0, 7.8, 21),
        Pick::driver(129, "Lance Stroll", 3.0, 7.5, 24),
        Pick::driver(1982, "Oscar Piastri", -14.0, 7.0, 27),
        Pick::constructor(24, "Aston Martin", 75.0, 6.7),
        Pick::driver(116, "Kevin Magnussen", 17.0, 6.7, 26),
        Pick::constructor(22, "AlphaTauri", 32.0, 6.4),
        Pick::constructor(21, "Alfa Romeo", 38.0, 6.2),
        Pick::driver(11, "Alexander Albon", -4.0, 5.5, 210),
        Pick::constructor(26, "Haas F1 Team", 25.0, 5.3),
        Pick::constructor(210, "Williams", 9.0, 5.1),
        Pick::driver(14, "Nyck De Vries", 15.0, 5.0, 22),
        Pick::driver(134, "Zhou Guanyu", 21.0, 4.9, 21),
        Pick::driver(130, "Yuki Tsunoda", 17.0, 4.8, 22),
        Pick::driver(111, "Nico Hulkenberg", 0.0, 4.3, 26),
        Pick::driver(126, "Logan Sargeant", 13.0, 4.0, 210),
    ].into_iter().collect()
}

pub fn season_team() -> (Vec<&'static str>, &'static str) {
    (
        vec![
            "Max Verstappen",
            "Fernando Alonso",
            "Sergio Perez",
            "Lance Stroll",
            "Zhou Guanyu",
            "Red Bull Racing",
            "Aston Martin",
        ],
        "Max Verstappen",
    )
}

fn one_decimal(rng: &mut SmallRng, low: i32, high: i32) -> f64 {
    rng.gen_range(low * 10..=high * 10) as f64 / 10.0
}

/// A small random catalog, small enough to enumerate every team.
pub fn random_catalog(rng: &mut SmallRng) -> Catalog {
    let n_constructors = rng.gen_range(1..=5u32);
    let n_drivers = rng.gen_range(2..=9u32);
    let constructors = (0..n_constructors)
        .map(|i| Pick::constructor(100 + i, &format!("C{}", i), one_decimal(rng, -5, 80), one_decimal(rng, 3, 30)))
        .collect_vec();
    let drivers = (0..n_drivers)
        .map(|i| {
            let team = 100 + rng.gen_range(0..n_constructors);
            Pick::driver(i, &format!("D{}", i), one_decimal(rng, -20, 40), one_decimal(rng, 1, 25), team)
        })
        .collect_vec();
    constructors.into_iter().chain(drivers).collect()
}

pub fn random_rules(rng: &mut SmallRng) -> Rules {
    let num_constructors = rng.gen_range(0..=2);
    let num_drivers = rng.gen_range(1..=4);
    Rules::new(one_decimal(rng, 10, 120), num_constructors + num_drivers, num_constructors)
}

/// Best objective over every legal team, in the rules' fixed point.
pub fn brute_force(catalog: &Catalog, rules: &Rules) -> Option<Fixed> {
    let constructors = catalog.of_kind(PickKind::Constructor).collect_vec();
    let drivers = catalog.of_kind(PickKind::Driver).collect_vec();
    let budget = rules.budget_limit();
    let mut best: Option<Fixed> = None;
    for chosen_constructors in constructors.iter().combinations(rules.num_constructors) {
        for chosen_drivers in drivers.iter().combinations(rules.num_drivers()) {
            let picks = chosen_constructors.iter().chain(chosen_drivers.iter()).collect_vec();
            let cost: Fixed = picks.iter().map(|pick| rules.quantize_cost(pick.cost)).sum();
            if cost > budget {
                continue;
            }
            let score: Fixed = picks.iter().map(|pick| rules.quantize(pick.score)).sum();
            let Some(bonus) = chosen_drivers.iter().map(|pick| rules.quantize(pick.score)).max() else {
                continue;
            };
            let objective = score + bonus;
            if best.map_or(true, |best| objective > best) {
                best = Some(objective);
            }
        }
    }
    best
}
