//! Fitness function: one scalar per assignment, lower is better.
//!
//! # Terms
//!
//! Hard-constraint penalties (defaults in [`FitnessWeights::default`]):
//!
//! ```text
//! missing_positions  = 10000 × (missing singleton positions, summed over teams)
//! pitcher_rule       = 10000 × (teams failing the pitcher rule)
//! outfield_shortfall = 5000 × Σ max(3 - outfielders, 0)
//! roster_size        = 2000 × Σ max(9 - team size, 0)
//! split_groups       = 500 × (co-assignment groups spread over several teams)
//! size_spread        = 3000 × max(largest - smallest - 1, 0)
//! ```
//!
//! Soft balance objectives:
//!
//! ```text
//! skill_balance        = 50 × Var(team average skill)
//! attendance_balance   = 10 × Var(team average attendance)
//! within_team_variance = 0.5 × mean(team skill variance)
//! coach_distribution   = with coaches >= teams: 50 per coachless team + 30 per extra coach
//!                        with coaches <  teams: 50 per extra coach
//! ```
//!
//! All variances are population variances. The hard penalties dominate any
//! realistic soft score, so a search minimizing the total first drives the
//! penalties to zero and then balances the teams.
//!
//! Split groups cannot arise from the repair-aware operators, but hand-built or
//! unrepaired assignments can still contain them, so they are penalized here too.

use dugout_model::{Assignment, Position, Roster, Team};
use dugout_stats::{mean, population_variance};
use serde::{Deserialize, Serialize};

use crate::requirements::{CoverageGap, MIN_OUTFIELDERS, coverage_gaps, satisfies_pitcher_rule};

/// Scores assignments of a roster.
///
/// Implementations must be pure functions of their inputs: the search evaluates
/// individuals on worker threads and relies on equal assignments scoring equally.
pub trait AssignmentEvaluator: Send + Sync {
    /// Fitness of `assignment`; lower is better.
    fn evaluate(&self, roster: &Roster, assignment: &Assignment) -> f64;
}

/// Coefficients of the fitness terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    pub missing_position: f64,
    pub pitcher_rule: f64,
    pub outfield_shortfall: f64,
    pub min_team_size: usize,
    pub roster_shortfall: f64,
    pub split_group: f64,
    pub size_spread: f64,
    pub skill_balance: f64,
    pub attendance_balance: f64,
    pub within_team_variance: f64,
    pub coachless_team: f64,
    pub extra_coach: f64,
    pub extra_coach_when_scarce: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            missing_position: 10_000.0,
            pitcher_rule: 10_000.0,
            outfield_shortfall: 5_000.0,
            min_team_size: 9,
            roster_shortfall: 2_000.0,
            split_group: 500.0,
            size_spread: 3_000.0,
            skill_balance: 50.0,
            attendance_balance: 10.0,
            within_team_variance: 0.5,
            coachless_team: 50.0,
            extra_coach: 30.0,
            extra_coach_when_scarce: 50.0,
        }
    }
}

/// Individual terms of a fitness score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FitnessBreakdown {
    pub missing_positions: f64,
    pub pitcher_rule: f64,
    pub outfield_shortfall: f64,
    pub roster_size: f64,
    pub split_groups: f64,
    pub size_spread: f64,
    pub skill_balance: f64,
    pub attendance_balance: f64,
    pub within_team_variance: f64,
    pub coach_distribution: f64,
}

impl FitnessBreakdown {
    /// Sum of the hard-constraint penalties.
    #[must_use]
    pub fn hard_penalty(&self) -> f64 {
        self.missing_positions
            + self.pitcher_rule
            + self.outfield_shortfall
            + self.roster_size
            + self.split_groups
            + self.size_spread
    }

    /// Sum of the soft balance terms.
    #[must_use]
    pub fn soft_score(&self) -> f64 {
        self.skill_balance
            + self.attendance_balance
            + self.within_team_variance
            + self.coach_distribution
    }

    /// The fitness value.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.hard_penalty() + self.soft_score()
    }
}

/// The team balance fitness function.
#[derive(Debug, Clone, Default)]
pub struct BalanceEvaluator {
    weights: FitnessWeights,
}

impl BalanceEvaluator {
    #[must_use]
    pub fn new(weights: FitnessWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Computes every term of the fitness of `assignment`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn breakdown(&self, roster: &Roster, assignment: &Assignment) -> FitnessBreakdown {
        let w = &self.weights;
        let teams = roster.decode(assignment);
        let mut b = FitnessBreakdown::default();

        for team in &teams {
            let tally = team.tally();
            let missing = coverage_gaps(&tally)
                .filter(|gap| matches!(gap, CoverageGap::MissingPosition(_)))
                .count();
            b.missing_positions += w.missing_position * missing as f64;
            if !satisfies_pitcher_rule(&tally) {
                b.pitcher_rule += w.pitcher_rule;
            }
            let outfielders = tally.position_count(Position::Outfield);
            b.outfield_shortfall +=
                w.outfield_shortfall * MIN_OUTFIELDERS.saturating_sub(outfielders) as f64;
            b.roster_size += w.roster_shortfall * w.min_team_size.saturating_sub(team.len()) as f64;
        }

        b.split_groups = w.split_group * roster.groups().count_split(assignment) as f64;

        let spread = roster.tally(assignment).size_spread();
        b.size_spread = w.size_spread * spread.saturating_sub(1) as f64;

        b.skill_balance =
            w.skill_balance * population_variance(teams.iter().map(Team::average_skill)).unwrap_or(0.0);
        b.attendance_balance = w.attendance_balance
            * population_variance(teams.iter().map(Team::average_attendance)).unwrap_or(0.0);
        b.within_team_variance =
            w.within_team_variance * mean(teams.iter().map(Team::skill_variance)).unwrap_or(0.0);
        b.coach_distribution = self.coach_penalty(roster, &teams);

        b
    }

    #[expect(clippy::cast_precision_loss)]
    fn coach_penalty(&self, roster: &Roster, teams: &[Team<'_>]) -> f64 {
        let w = &self.weights;
        let total_coaches = roster.coach_count();
        if total_coaches == 0 {
            return 0.0;
        }
        let enough_coaches = total_coaches >= roster.num_teams();
        teams
            .iter()
            .map(|team| match (team.coach_count(), enough_coaches) {
                (0, true) => w.coachless_team,
                (0 | 1, _) => 0.0,
                (count, true) => w.extra_coach * (count - 1) as f64,
                (count, false) => w.extra_coach_when_scarce * (count - 1) as f64,
            })
            .sum()
    }
}

impl AssignmentEvaluator for BalanceEvaluator {
    fn evaluate(&self, roster: &Roster, assignment: &Assignment) -> f64 {
        self.breakdown(roster, assignment).total()
    }
}

#[cfg(test)]
mod tests {
    use dugout_model::Player;

    use super::*;

    const LINEUP: [Position; 9] = [
        Position::Shortstop,
        Position::CenterField,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Pitcher,
        Position::FirstBase,
        Position::Catcher,
        Position::Outfield,
        Position::Outfield,
    ];

    /// Two full nine-player lineups; every player rated 50 with perfect attendance.
    fn two_lineups() -> Vec<Player> {
        LINEUP
            .iter()
            .chain(LINEUP.iter())
            .enumerate()
            .map(|(i, &pos)| Player::new(format!("p{i}"), pos, 50.0, 1.0))
            .collect()
    }

    fn split_in_half(num_players: usize) -> Assignment {
        Assignment::new((0..num_players).map(|i| i * 2 / num_players).collect())
    }

    fn evaluate(players: Vec<Player>, assignment: &Assignment) -> FitnessBreakdown {
        let roster = Roster::new(players, 2).unwrap();
        BalanceEvaluator::default().breakdown(&roster, assignment)
    }

    #[test]
    fn test_perfect_split_scores_zero() {
        let b = evaluate(two_lineups(), &split_in_half(18));
        assert_eq!(b, FitnessBreakdown::default());
        assert_eq!(b.total(), 0.0);
    }

    #[test]
    fn test_evaluate_equals_breakdown_total() {
        let players = two_lineups();
        let roster = Roster::new(players, 2).unwrap();
        let assignment = Assignment::new((0..18).map(|i| usize::from(i % 3 == 0)).collect());
        let evaluator = BalanceEvaluator::default();
        assert_eq!(
            evaluator.evaluate(&roster, &assignment),
            evaluator.breakdown(&roster, &assignment).total()
        );
    }

    #[test]
    fn test_missing_position_costs_at_least_10000() {
        // team 0 has an extra OF; turning that player into the team's only SS
        // changes nothing else
        let mut players = two_lineups();
        players[0] = Player::new("p0", Position::Outfield, 50.0, 1.0);
        let missing = evaluate(players.clone(), &split_in_half(18));

        players[0] = Player::new("p0", Position::Shortstop, 50.0, 1.0);
        let filled = evaluate(players, &split_in_half(18));

        assert_eq!(missing.missing_positions, 10_000.0);
        assert!(missing.total() - filled.total() >= 10_000.0);
    }

    #[test]
    fn test_pitcher_rule_penalty() {
        let test_cases = vec![
            ("perfect attendance pitcher", 1.0, None, 0.0),
            ("imperfect pitcher", 0.99, None, 10_000.0),
            ("second pitcher added", 0.99, Some(0.5), 0.0),
        ];
        for (name, attendance, second, expected) in test_cases {
            let mut players = two_lineups();
            players[4] = Player::new("p4", Position::Pitcher, 50.0, attendance);
            if let Some(second) = second {
                // replace team 0's second OF with a pitcher
                players[8] = Player::new("p8", Position::Pitcher, 50.0, second);
            }
            let b = evaluate(players, &split_in_half(18));
            assert_eq!(b.pitcher_rule, expected, "{name}");
        }
    }

    #[test]
    fn test_outfield_and_size_penalties() {
        // team 0: SS, CF, 2B, 3B, P, 1B, C (7 players, 1 outfielder)
        // team 1: the rest (11 players)
        let assignment = Assignment::new((0..18).map(|i| usize::from(i >= 7)).collect());
        let b = evaluate(two_lineups(), &assignment);
        assert_eq!(b.outfield_shortfall, 5_000.0 * 2.0);
        assert_eq!(b.roster_size, 2_000.0 * 2.0);
        assert_eq!(b.size_spread, 3_000.0 * 3.0);
        assert_eq!(b.missing_positions, 0.0);
    }

    #[test]
    fn test_split_group_penalty() {
        let mut players = two_lineups();
        players[7] = players[7].clone().with_co_assign_group(Some(1));
        players[16] = players[16].clone().with_co_assign_group(Some(1));
        let b = evaluate(players, &split_in_half(18));
        assert_eq!(b.split_groups, 500.0);
    }

    #[test]
    fn test_soft_terms() {
        let mut players = two_lineups();
        // team 0 averages 52, team 1 averages 50
        players[0] = Player::new("p0", Position::Shortstop, 68.0, 1.0);
        // team 1 attendance average drops by 0.9 / 9 = 0.1
        players[9] = Player::new("p9", Position::Shortstop, 50.0, 0.1);
        let b = evaluate(players, &split_in_half(18));

        // Var([52, 50]) = 1
        assert!((b.skill_balance - 50.0).abs() < 1e-9);
        // Var([1.0, 0.9]) = 0.0025
        assert!((b.attendance_balance - 0.025).abs() < 1e-9);
        // team 0 variance: (16² + 8 × 2²) / 9 = 288 / 9 = 32; team 1: 0
        assert!((b.within_team_variance - 0.5 * 16.0).abs() < 1e-9);
        assert_eq!(b.hard_penalty(), 0.0);
    }

    #[test]
    fn test_coach_distribution() {
        // (coach player indices, expected penalty)
        let test_cases: Vec<(&str, Vec<usize>, f64)> = vec![
            ("no coaches", vec![], 0.0),
            ("one coach per team", vec![0, 9], 0.0),
            ("both on team 0", vec![0, 1], 50.0 + 30.0),
            ("three on team 0", vec![0, 1, 2], 50.0 + 60.0),
            ("scarce single coach", vec![0], 0.0),
            ("enough coaches, spread 2 + 1", vec![0, 1, 9], 30.0),
        ];
        for (name, coaches, expected) in test_cases {
            let mut players = two_lineups();
            for &c in &coaches {
                players[c] = players[c].clone().with_coach(true);
            }
            let b = evaluate(players, &split_in_half(18));
            assert_eq!(b.coach_distribution, expected, "{name}");
        }
    }

    #[test]
    fn test_scarce_coaches_doubled_up() {
        // three teams, two coaches both on team 0
        let mut players = two_lineups();
        players[0] = players[0].clone().with_coach(true);
        players[1] = players[1].clone().with_coach(true);
        let roster = Roster::new(players, 3).unwrap();
        let assignment = Assignment::new((0..18).map(|i| i / 6).collect());
        let b = BalanceEvaluator::default().breakdown(&roster, &assignment);
        assert_eq!(b.coach_distribution, 50.0);
    }
}
