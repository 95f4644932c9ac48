use std::{collections::BTreeMap, path::PathBuf};

use dugout_evaluator::requirements::MIN_OUTFIELDERS;
use dugout_model::{CoAssignGroups, GroupId, Player, Position, PositionCoverage};
use log::warn;

use crate::model::roster_csv::{self, RosterFile};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    /// Roster CSV file
    csv_file: PathBuf,
    /// Check whether the roster can cover this many teams
    #[arg(long)]
    teams: Option<usize>,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let RosterFile {
        players,
        league_average,
    } = roster_csv::load_roster_file(&arg.csv_file)?;

    println!("Roster: {}", arg.csv_file.display());
    println!("Players: {}", players.len());

    let coverage = roster_coverage(&players);
    println!();
    println!("Positions:");
    for (pos, count) in coverage.iter() {
        println!("  {:<3} {count:3}", pos.code());
    }

    let coaches = players.iter().filter(|p| p.is_coach()).count();
    println!();
    println!("Coaches: {coaches}");
    for coach in players.iter().filter(|p| p.is_coach()) {
        println!("  {}", coach.name());
    }

    let groups = group_names(&players);
    println!();
    println!("Co-assignment groups: {}", groups.len());
    for (id, names) in &groups {
        println!("  Group {id}: {}", names.join(", "));
    }

    if let Some(avg) = league_average {
        println!();
        println!("League Average:");
        println!("  Offense:     {:.1}", avg.offensive_total);
        println!("  Defense:     {:.1}", avg.defensive_total);
        println!("  Base running: {:.1}", avg.base_running);
        println!("  Total:       {:.1}", avg.total_score);
        println!("  Total w/Att: {:.1}", avg.total_with_attendance);
    }

    if let Some(num_teams) = arg.teams {
        for (pos, needed, available) in shortfalls(&coverage, num_teams) {
            warn!("{pos}: {available} available, {needed} needed to cover {num_teams} teams");
        }
    }

    Ok(())
}

fn roster_coverage(players: &[Player]) -> PositionCoverage {
    let mut coverage = PositionCoverage::new();
    for player in players {
        coverage.add(player.position());
    }
    coverage
}

/// Member names per group id, in roster order.
fn group_names(players: &[Player]) -> BTreeMap<GroupId, Vec<&str>> {
    let groups = CoAssignGroups::from_players(players);
    groups
        .iter()
        .map(|group| {
            let names = group
                .members()
                .iter()
                .map(|&i| players[i].name())
                .collect();
            (group.id(), names)
        })
        .collect()
}

/// Positions with too few players to give every team its minimum.
fn shortfalls(coverage: &PositionCoverage, num_teams: usize) -> Vec<(Position, usize, usize)> {
    Position::COVERAGE_ORDER
        .into_iter()
        .filter_map(|pos| {
            let per_team = if pos == Position::Outfield {
                MIN_OUTFIELDERS
            } else {
                1
            };
            let needed = per_team * num_teams;
            let available = coverage.get(pos);
            (available < needed).then_some((pos, needed, available))
        })
        .collect()
}
