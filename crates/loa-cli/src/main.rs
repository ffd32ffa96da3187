//! `loa-sim`: play two teams loaded from JSON files and print the tally.
//!
//! A team file looks like:
//!
//! ```json
//! { "name": "red", "units": [ { "name": "knight", "hp": 30, "att": 8, "arm": 2, "evs": 0 } ] }
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use loa_core::{
    AttackPolicy, MaxSurvivalJudge, Roster, Simulator, SimulatorConfig, Team, Unit, UnitStats,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Basic,
    Evasion,
    ArrangeOnly,
}

#[derive(Debug, Parser)]
#[command(name = "loa-sim", about = "Play two LOA teams against each other")]
struct Args {
    /// First team file
    team1: PathBuf,
    /// Second team file
    team2: PathBuf,
    /// Simulator config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Attack policy
    #[arg(long, value_enum, default_value_t = PolicyArg::Basic)]
    policy: PolicyArg,
    /// Override the turn cap
    #[arg(long)]
    turns: Option<usize>,
    /// Override the number of repeats
    #[arg(long)]
    repeats: Option<usize>,
    /// Override the seed
    #[arg(long)]
    seed: Option<u64>,
    /// Roster file for arrange-only play, one per repeat
    #[arg(long = "roster")]
    rosters: Vec<PathBuf>,
    /// Run repeats in parallel
    #[arg(long)]
    parallel: bool,
    /// Print the tally as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Deserialize)]
struct TeamFile {
    name: String,
    units: Vec<UnitStats>,
}

fn read_team(path: &Path) -> Result<TeamFile> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_team(path: &Path) -> Result<Team> {
    let file = read_team(path)?;
    Ok(Team::from_stats(file.name, file.units))
}

fn load_roster(path: &Path) -> Result<Roster> {
    Ok(read_team(path)?.units.into_iter().map(Unit::new).collect())
}

fn load_config(args: &Args) -> Result<SimulatorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimulatorConfig::default(),
    };
    if let Some(turns) = args.turns {
        config.num_turns = turns;
    }
    if let Some(repeats) = args.repeats {
        config.num_repeats = repeats;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn build_policy(args: &Args) -> Result<AttackPolicy> {
    match args.policy {
        PolicyArg::Basic => Ok(AttackPolicy::Basic),
        PolicyArg::Evasion => Ok(AttackPolicy::Evasion),
        PolicyArg::ArrangeOnly => {
            if args.rosters.is_empty() {
                bail!("arrange-only play needs at least one --roster file");
            }
            let rosters = args
                .rosters
                .iter()
                .map(|path| load_roster(path))
                .collect::<Result<Vec<_>>>()?;
            Ok(AttackPolicy::ArrangeOnly { rosters })
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let policy = build_policy(&args)?;
    let team1 = load_team(&args.team1)?;
    let team2 = load_team(&args.team2)?;

    tracing::debug!(?config, ?policy, "loaded simulator setup");

    let mut sim = Simulator::new(config, policy);
    let tally = if args.parallel {
        sim.play_parallel(&team1, &team2, MaxSurvivalJudge::new)
    } else {
        sim.play(&team1, &team2, &mut MaxSurvivalJudge::new())
    }
    .with_context(|| format!("{} vs {}", team1.name(), team2.name()))?;

    if args.json {
        println!("{}", serde_json::to_string(&tally)?);
    } else {
        println!("{} vs {}: {tally}", team1.name(), team2.name());
    }
    Ok(())
}
