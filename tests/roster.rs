mod common;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use team_pick::{build_team, evaluate, optimize, Member, Rules, SolveOptions, Team, TeamError, ValidationError};

#[test]
fn season_team_totals() {
    let catalog = common::season_catalog();
    let (names, bonus) = common::season_team();
    let team = build_team(&names, bonus, &catalog).unwrap();
    assert_eq!(team.validate(&Rules::default()), Ok(()));
    let totals = evaluate(&team);
    assert_eq!(totals.score, 96.0 * 2.0 + 62.0 + 64.0 + 3.0 + 21.0 + 173.0 + 75.0);
    assert!((totals.cost - 99.5).abs() < 1e-9);
}

#[test]
fn user_team_never_beats_the_optimum() {
    let catalog = common::season_catalog();
    let (names, bonus) = common::season_team();
    let team = build_team(&names, bonus, &catalog).unwrap();
    let solution = optimize(&catalog, &Rules::default(), &SolveOptions::default()).unwrap();
    assert!(evaluate(&team).score <= evaluate(&solution.team).score);
}

#[test]
fn building_does_not_leak_bonus_between_teams() {
    let catalog = common::season_catalog();
    let (names, _) = common::season_team();
    let first = build_team(&names, "Max Verstappen", &catalog).unwrap();
    let second = build_team(&names, "Fernando Alonso", &catalog).unwrap();
    assert_eq!(first.bonus().unwrap().pick.name, "Max Verstappen");
    assert_eq!(second.bonus().unwrap().pick.name, "Fernando Alonso");
    assert_eq!(evaluate(&first).score - evaluate(&second).score, 96.0 - 62.0);
}

#[test]
fn constructor_bonus_outside_the_list_is_rejected() {
    let catalog = common::season_catalog();
    let (names, _) = common::season_team();
    let err = build_team(&names, "Ferrari", &catalog).unwrap_err();
    assert_eq!(err, TeamError::Validation(ValidationError::BonusIsConstructor("Ferrari".to_string())));
}

#[test]
fn wrong_composition_is_caught_by_validate() {
    let catalog = common::season_catalog();
    let names = [
        "Max Verstappen", "Fernando Alonso", "Sergio Perez", "Lance Stroll",
        "Zhou Guanyu", "Logan Sargeant", "Aston Martin",
    ];
    let team = build_team(&names, "Max Verstappen", &catalog).unwrap();
    assert!(matches!(team.validate(&Rules::default()), Err(ValidationError::WrongComposition { .. })));
}

#[test]
fn evaluate_is_linear_in_members() {
    let catalog = common::season_catalog();
    let mut rng = SmallRng::seed_from_u64(11);
    let picks: Vec<_> = catalog.iter().collect();
    for _ in 0..50 {
        let chosen: Vec<_> = picks.choose_multiple(&mut rng, 7).copied().collect();
        let Some(bonus) = chosen.iter().find(|pick| pick.is_driver()) else {
            continue;
        };
        let team = Team::new(chosen.iter().map(|pick| Member { pick: *pick, is_bonus: pick.id == bonus.id }).collect());
        let plain: f64 = chosen.iter().map(|pick| pick.score).sum();
        assert!((evaluate(&team).score - (plain + bonus.score)).abs() < 1e-9);
    }
}
