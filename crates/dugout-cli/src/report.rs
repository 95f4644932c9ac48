//! Plain-text summary of an optimized assignment.

use std::io::{self, Write};

use dugout_evaluator::FitnessBreakdown;
use dugout_model::Team;

const RULE_WIDTH: usize = 80;

fn rule<W>(w: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "{}", "=".repeat(RULE_WIDTH))
}

fn heading<W>(w: &mut W, title: &str) -> io::Result<()>
where
    W: Write,
{
    writeln!(w)?;
    rule(w)?;
    writeln!(w, "{title}")?;
    rule(w)
}

/// Writes per-team details, overall balance, and the fitness breakdown.
pub fn write_summary<W>(w: &mut W, teams: &[Team<'_>], breakdown: &FitnessBreakdown) -> io::Result<()>
where
    W: Write,
{
    heading(w, "TEAM ASSIGNMENTS")?;
    for team in teams {
        write_team(w, team)?;
    }
    write_balance(w, teams)?;
    write_breakdown(w, breakdown)
}

fn write_team<W>(w: &mut W, team: &Team<'_>) -> io::Result<()>
where
    W: Write,
{
    heading(w, &format!("TEAM {}", team.id() + 1))?;
    writeln!(w, "Players: {}", team.len())?;
    writeln!(w, "Average Skill: {:.2}", team.average_skill())?;
    writeln!(w, "Average Attendance: {:.1}%", team.average_attendance() * 100.0)?;
    writeln!(w, "Skill Variance: {:.2}", team.skill_variance())?;
    writeln!(w, "Has Coach: {}", if team.has_coach() { "Yes" } else { "No" })?;

    writeln!(w)?;
    writeln!(w, "Position Coverage:")?;
    for (pos, count) in team.coverage().iter() {
        let status = if count >= 1 { "✓" } else { "✗" };
        writeln!(w, "  {pos}: {count} {status}")?;
    }

    writeln!(w)?;
    writeln!(w, "Roster:")?;
    let mut players = team.players().to_vec();
    players.sort_by(|a, b| {
        a.position()
            .code()
            .cmp(b.position().code())
            .then(b.total_score().total_cmp(&a.total_score()))
    });
    for player in players {
        let coach = if player.is_coach() { " (COACH)" } else { "" };
        let group = player
            .co_assign_group()
            .map(|g| format!(" [Group {g}]"))
            .unwrap_or_default();
        writeln!(
            w,
            "  {:30} {:3} | Skill: {:5.1} | Att: {:5.1}%{coach}{group}",
            player.name(),
            player.position().code(),
            player.total_score(),
            player.attendance() * 100.0,
        )?;
    }
    Ok(())
}

fn write_balance<W>(w: &mut W, teams: &[Team<'_>]) -> io::Result<()>
where
    W: Write,
{
    heading(w, "OVERALL STATISTICS")?;

    let (skill_min, skill_max) = min_max(teams.iter().map(Team::average_skill));
    writeln!(w)?;
    writeln!(w, "Skill Balance:")?;
    writeln!(w, "  Min team average: {skill_min:.2}")?;
    writeln!(w, "  Max team average: {skill_max:.2}")?;
    writeln!(w, "  Difference: {:.2}", skill_max - skill_min)?;

    let (att_min, att_max) = min_max(teams.iter().map(Team::average_attendance));
    writeln!(w)?;
    writeln!(w, "Attendance Balance:")?;
    writeln!(w, "  Min team average: {:.1}%", att_min * 100.0)?;
    writeln!(w, "  Max team average: {:.1}%", att_max * 100.0)?;
    writeln!(w, "  Difference: {:.1}%", (att_max - att_min) * 100.0)?;

    writeln!(w)?;
    writeln!(w, "Team Sizes:")?;
    for team in teams {
        writeln!(w, "  Team {}: {} players", team.id() + 1, team.len())?;
    }
    Ok(())
}

fn write_breakdown<W>(w: &mut W, b: &FitnessBreakdown) -> io::Result<()>
where
    W: Write,
{
    heading(w, "FITNESS")?;
    let terms = [
        ("Missing positions", b.missing_positions),
        ("Pitcher rule", b.pitcher_rule),
        ("Outfield shortfall", b.outfield_shortfall),
        ("Roster size", b.roster_size),
        ("Split groups", b.split_groups),
        ("Size spread", b.size_spread),
        ("Skill balance", b.skill_balance),
        ("Attendance balance", b.attendance_balance),
        ("Within-team variance", b.within_team_variance),
        ("Coach distribution", b.coach_distribution),
    ];
    for (label, value) in terms {
        writeln!(w, "  {label:<22} {value:>12.3}")?;
    }
    writeln!(w, "  {:<22} {:>12.3}", "Hard penalty", b.hard_penalty())?;
    writeln!(w, "  {:<22} {:>12.3}", "Total", b.total())?;
    Ok(())
}

fn min_max<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}
