use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::Context;
use chrono::Utc;
use dugout_evaluator::BalanceEvaluator;
use dugout_model::Roster;
use dugout_search::{Optimizer, SearchParams};
use log::{info, warn};

use crate::{
    model::{export::AssignmentExport, roster_csv},
    report, util,
};

/// Players needed for one full lineup.
const FULL_ROSTER: usize = 9;

/// Generations between progress messages.
const PROGRESS_INTERVAL: usize = 50;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct OptimizeArg {
    /// Roster CSV file
    csv_file: PathBuf,
    /// Number of teams to create
    num_teams: usize,
    /// Population size [default: 300]
    #[arg(long)]
    population: Option<usize>,
    /// Number of generations to run [default: 500]
    #[arg(long)]
    generations: Option<usize>,
    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file with search parameters; command-line options take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output JSON file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Only log warnings and errors
    #[arg(long)]
    quiet: bool,
}

impl OptimizeArg {
    pub(crate) fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn search_params(&self) -> anyhow::Result<SearchParams> {
        let mut params = match &self.config {
            Some(path) => util::read_search_params_file(path)?,
            None => SearchParams::default(),
        };
        if let Some(population) = self.population {
            params.population_size = population;
        }
        if let Some(generations) = self.generations {
            params.generations = generations;
        }
        if let Some(seed) = self.seed {
            params.seed = Some(seed);
        }
        Ok(params)
    }
}

pub(crate) fn run(arg: &OptimizeArg) -> anyhow::Result<()> {
    let params = arg.search_params()?;

    let roster_file = roster_csv::load_roster_file(&arg.csv_file)?;
    let num_players = roster_file.players.len();
    info!(
        "loaded {num_players} players from {}",
        arg.csv_file.display()
    );
    if num_players < arg.num_teams * FULL_ROSTER {
        warn!(
            "only {num_players} players for {} teams ({} recommended for full rosters)",
            arg.num_teams,
            arg.num_teams * FULL_ROSTER
        );
    }

    let roster = Roster::new(roster_file.players, arg.num_teams)
        .context("Cannot build teams from this roster")?;
    let evaluator = BalanceEvaluator::default();
    let optimizer = Optimizer::new(&roster, &evaluator, params)
        .context("Invalid search parameters")?;

    let generations = optimizer.params().generations;
    let outcome = optimizer.run_with(|stats, _best| {
        let last = stats.generation == generations;
        if !arg.quiet && (stats.generation % PROGRESS_INTERVAL == 0 || last) {
            info!(
                "generation {}/{generations}: best {:.2}, mean {:.2}",
                stats.generation, stats.best_fitness, stats.mean
            );
        }
    });

    let teams = outcome.teams(&roster);
    let breakdown = evaluator.breakdown(&roster, outcome.best_assignment());
    if breakdown.hard_penalty() > 0.0 {
        warn!(
            "best assignment still violates hard constraints (penalty {:.0})",
            breakdown.hard_penalty()
        );
    }

    let mut stdout = io::stdout().lock();
    report::write_summary(&mut stdout, &teams, &breakdown)
        .and_then(|()| stdout.flush())
        .context("Failed to write summary")?;

    if let Some(path) = &arg.output {
        let export = AssignmentExport::new(&teams, &breakdown, Utc::now());
        util::save_json("result", &export, path)?;
        eprintln!();
        eprintln!("Results exported to {}", path.display());
    }

    Ok(())
}
