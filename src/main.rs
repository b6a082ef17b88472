//! Command line front end: loads a player feed, optionally rescores it for a
//! race result, then prints the best team or scores a team given by name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use team_pick::config::{default_config_template, Config};
use team_pick::feed::parse_feed;
use team_pick::{build_team, evaluate, optimize, rescored, Catalog, RaceResult, Team};

#[derive(Parser)]
#[command(name = "team-pick")]
#[command(about = "Find the highest scoring fantasy team within budget", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the optimal team
    Optimize {
        /// Player feed JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Configuration file (TOML)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Race result JSON file; picks are rescored for this race only
        #[arg(long)]
        result: Option<PathBuf>,
    },

    /// Score a team given by names
    Evaluate {
        /// Player feed JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Comma-separated pick names
        #[arg(long, value_delimiter = ',')]
        team: Vec<String>,

        /// Name of the bonus driver
        #[arg(long)]
        bonus: String,

        /// Configuration file (TOML)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Race result JSON file; picks are rescored for this race only
        #[arg(long)]
        result: Option<PathBuf>,
    },

    /// Print a configuration file with the default settings
    Config,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path).with_context(|| format!("loading config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn load_catalog(path: &Path, result: Option<&Path>, config: &Config) -> Result<Catalog> {
    let json = fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog = parse_feed(&json).with_context(|| format!("decoding catalog {}", path.display()))?;
    info!("loaded {} picks from {}", catalog.len(), path.display());
    let Some(result) = result else {
        return Ok(catalog);
    };
    let json = fs::read_to_string(result).with_context(|| format!("reading race result {}", result.display()))?;
    let race: RaceResult = serde_json::from_str(&json).with_context(|| format!("decoding race result {}", result.display()))?;
    let catalog = rescored(&catalog, &race, &config.points)?;
    print_ranking(&catalog);
    Ok(catalog)
}

fn print_ranking(catalog: &Catalog) {
    println!("Simulation result:");
    let mut picks: Vec<_> = catalog.iter().collect();
    picks.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.name.cmp(&b.name)));
    for pick in picks {
        println!("{}: {} Pts", pick.name, pick.score);
    }
    println!();
}

fn print_team(team: &Team) {
    print!("{}", team);
    println!("{}", evaluate(team));
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize { catalog, config, result } => {
            let config = load_config(config.as_deref())?;
            let catalog = load_catalog(&catalog, result.as_deref(), &config)?;
            let solution = optimize(&catalog, &config.rules, &config.solve_options())?;
            println!("Best team:");
            print_team(&solution.team);
        }
        Commands::Evaluate { catalog, team, bonus, config, result } => {
            let config = load_config(config.as_deref())?;
            let catalog = load_catalog(&catalog, result.as_deref(), &config)?;
            let team = build_team(team.as_slice(), &bonus, &catalog)?;
            team.validate(&config.rules).context("team breaks the selection rules")?;
            println!("Your team:");
            print_team(&team);
        }
        Commands::Config => {
            print!("{}", default_config_template());
        }
    }

    Ok(())
}
