//! Constraint repair for assignment vectors.
//!
//! Repair edits an assignment in place until teams are balanced in size (largest
//! and smallest differ by at most one) and every team is fully covered (see
//! [`dugout_evaluator::requirements`]), or until it runs out of moves.
//!
//! # Algorithm
//!
//! Each iteration recomputes the per-team tallies and performs exactly one move:
//!
//! 1. **Size balance** - if the size spread exceeds one, move a player from the
//!    first largest team to the first smallest team. An ungrouped player is picked
//!    at random; if the team holds only grouped players, a random member's whole
//!    group moves instead.
//! 2. **Done** - if every team is fully covered, stop.
//! 3. **Coverage** - otherwise find the first gap (teams in id order, gaps in
//!    requirement order) that can be closed by pulling an ungrouped player able to
//!    play the needed position from a donor team. Donors with a surplus are
//!    preferred (more than one player for the position, more than three for OF);
//!    failing that any donor with a qualifying player is used (more than two for
//!    OF), even if that opens a gap there. If no gap can be closed, stop.
//!
//! The loop is bounded by [`Repairer::max_iterations`]. Whatever remains unresolved
//! is left for the fitness function to penalize.
//!
//! Grouped players are never separated: size balancing moves groups atomically
//! and coverage moves only consider ungrouped players.

use dugout_evaluator::requirements::{MIN_OUTFIELDERS, coverage_gaps, is_fully_covered};
use dugout_model::{Assignment, Position, Roster, RosterTally, TeamId};
use log::trace;
use rand::{Rng, seq::IndexedRandom as _};

/// How a repair pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RepairStatus {
    /// Sizes balanced and every team fully covered.
    Satisfied,
    /// Sizes balanced, but no remaining coverage gap could be closed.
    Stuck,
    /// The iteration budget ran out.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairOutcome {
    pub status: RepairStatus,
    /// Number of moves performed.
    pub moves: usize,
}

/// Bounded iterative repair of assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repairer {
    max_iterations: usize,
}

impl Default for Repairer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ITERATIONS)
    }
}

impl Repairer {
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    #[must_use]
    pub const fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    #[must_use]
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Repairs `assignment` in place.
    pub fn repair<R>(&self, roster: &Roster, assignment: &mut Assignment, rng: &mut R) -> RepairOutcome
    where
        R: Rng + ?Sized,
    {
        debug_assert!(roster.check_assignment(assignment).is_ok());
        for moves in 0..self.max_iterations {
            let tally = roster.tally(assignment);

            if tally.size_spread() > 1 {
                move_player(
                    roster,
                    assignment,
                    tally.largest_team(),
                    tally.smallest_team(),
                    rng,
                );
                continue;
            }

            if tally.teams().iter().all(is_fully_covered) {
                return finish(RepairStatus::Satisfied, moves);
            }

            if !close_first_gap(roster, assignment, &tally, rng) {
                return finish(RepairStatus::Stuck, moves);
            }
        }
        finish(RepairStatus::Exhausted, self.max_iterations)
    }
}

fn finish(status: RepairStatus, moves: usize) -> RepairOutcome {
    trace!("repair finished: {status:?} after {moves} moves");
    RepairOutcome { status, moves }
}

/// Moves one ungrouped player, or failing that one whole group, from `from` to `to`.
fn move_player<R>(roster: &Roster, assignment: &mut Assignment, from: TeamId, to: TeamId, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let groups = roster.groups();
    let members = assignment.members_of(from).collect::<Vec<_>>();
    let ungrouped = members
        .iter()
        .copied()
        .filter(|&p| !groups.is_grouped(p))
        .collect::<Vec<_>>();

    if let Some(&player) = ungrouped.choose(rng) {
        assignment.assign(player, to);
        return;
    }
    if let Some(&player) = members.choose(rng) {
        match groups.group_of(player) {
            Some(group) => assignment.assign_all(group.members(), to),
            None => assignment.assign(player, to),
        }
    }
}

fn close_first_gap<R>(roster: &Roster, assignment: &mut Assignment, tally: &RosterTally, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    for (needy, team) in tally.teams().iter().enumerate() {
        for gap in coverage_gaps(team) {
            if pull_player(roster, assignment, tally, needy, gap.needed_position(), rng) {
                return true;
            }
        }
    }
    false
}

/// Moves an ungrouped player able to play `position` onto `needy` from another team.
fn pull_player<R>(
    roster: &Roster,
    assignment: &mut Assignment,
    tally: &RosterTally,
    needy: TeamId,
    position: Position,
    rng: &mut R,
) -> bool
where
    R: Rng + ?Sized,
{
    // a donor qualifies when its count exceeds the threshold
    let (surplus, forced) = if position == Position::Outfield {
        (MIN_OUTFIELDERS, MIN_OUTFIELDERS - 1)
    } else {
        (1, 0)
    };

    for threshold in [surplus, forced] {
        for donor in 0..roster.num_teams() {
            if donor == needy || tally.team(donor).position_count(position) <= threshold {
                continue;
            }
            let candidates = assignment
                .members_of(donor)
                .filter(|&p| !roster.groups().is_grouped(p) && roster.player(p).can_play(position))
                .collect::<Vec<_>>();
            if let Some(&player) = candidates.choose(rng) {
                assignment.assign(player, needy);
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use dugout_model::{GroupId, Player};
    use rand::{SeedableRng as _, rngs::StdRng};

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

    fn lineups(count: usize) -> Vec<Player> {
        (0..count)
            .flat_map(|_| LINEUP)
            .enumerate()
            .map(|(i, pos)| Player::new(format!("p{i}"), pos, 50.0, 1.0))
            .collect()
    }

    fn catchers(groups: &[Option<GroupId>]) -> Vec<Player> {
        groups
            .iter()
            .enumerate()
            .map(|(i, &g)| {
                Player::new(format!("c{i}"), Position::Catcher, 50.0, 1.0).with_co_assign_group(g)
            })
            .collect()
    }

    fn groups_intact(roster: &Roster, assignment: &Assignment) -> bool {
        roster.groups().count_split(assignment) == 0
    }

    #[test]
    fn test_balances_sizes_from_any_start() {
        // catchers only: coverage can never be met, so repair balances and then gets stuck
        let roster = Roster::new(catchers(&[None; 23]), 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let starts = vec![
            vec![0; 23],
            vec![3; 23],
            (0..23).map(|i| usize::from(i >= 20) * 2).collect(),
            (0..23).map(|i| i % 2).collect(),
        ];
        for start in starts {
            let mut assignment = Assignment::new(start);
            let outcome = Repairer::default().repair(&roster, &mut assignment, &mut rng);
            assert_eq!(outcome.status, RepairStatus::Stuck);
            assert!(roster.tally(&assignment).size_spread() <= 1, "{assignment:?}");
        }
    }

    #[test]
    fn test_balanced_random_starts() {
        let roster = Roster::new(catchers(&[None; 31]), 5).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let mut assignment =
                Assignment::new((0..31).map(|_| rng.random_range(0..5)).collect());
            Repairer::default().repair(&roster, &mut assignment, &mut rng);
            assert!(roster.tally(&assignment).size_spread() <= 1);
        }
    }

    #[test]
    fn test_prefers_ungrouped_player_when_balancing() {
        // team 0: grouped pair plus one ungrouped player; team 1 empty
        let roster = Roster::new(catchers(&[Some(1), Some(1), None]), 2).unwrap();
        let mut assignment = Assignment::new(vec![0, 0, 0]);
        let mut rng = StdRng::seed_from_u64(3);
        Repairer::default().repair(&roster, &mut assignment, &mut rng);
        assert_eq!(assignment.as_slice(), &[0, 0, 1]);
    }

    #[test]
    fn test_moves_whole_group_when_no_ungrouped_player() {
        let roster = Roster::new(catchers(&[Some(1), Some(1), Some(2), Some(2)]), 2).unwrap();
        let mut assignment = Assignment::new(vec![0, 0, 0, 0]);
        let mut rng = StdRng::seed_from_u64(4);
        Repairer::default().repair(&roster, &mut assignment, &mut rng);
        assert!(groups_intact(&roster, &assignment));
        assert_eq!(assignment.team_sizes(2), vec![2, 2]);
    }

    #[test]
    fn test_groups_never_split() {
        let mut groups = vec![None; 30];
        for (i, g) in [(0, 1), (5, 1), (11, 2), (12, 2), (13, 2), (20, 3), (29, 3)] {
            groups[i] = Some(g);
        }
        let roster = Roster::new(catchers(&groups), 3).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let mut assignment = Assignment::new(vec![0; 30]);
            for group in roster.groups().iter() {
                assignment.assign_all(group.members(), rng.random_range(0..3));
            }
            for &p in roster.groups().ungrouped() {
                assignment.assign(p, rng.random_range(0..3));
            }
            Repairer::default().repair(&roster, &mut assignment, &mut rng);
            assert!(groups_intact(&roster, &assignment));
        }
    }

    #[test]
    fn test_feasible_assignment_is_left_alone() {
        let roster = Roster::new(lineups(2), 2).unwrap();
        let original = Assignment::new((0..18).map(|i| i / 9).collect());
        let mut assignment = original.clone();
        let outcome = Repairer::default().repair(&roster, &mut assignment, &mut StdRng::seed_from_u64(6));
        assert_eq!(
            outcome,
            RepairOutcome {
                status: RepairStatus::Satisfied,
                moves: 0
            }
        );
        assert_eq!(assignment, original);
    }

    #[test]
    fn test_pulls_from_surplus_donor() {
        // team 0 gets both shortstops, team 1 both catchers
        let roster = Roster::new(lineups(2), 2).unwrap();
        let mut teams = (0..18).map(|i| i / 9).collect::<Vec<_>>();
        teams[9] = 0; // second SS to team 0
        teams[6] = 1; // first C to team 1
        let mut assignment = Assignment::new(teams);

        let mut rng = StdRng::seed_from_u64(7);
        let tally = roster.tally(&assignment);
        assert!(close_first_gap(&roster, &mut assignment, &tally, &mut rng));
        // team 0's first gap is the missing catcher; team 1 has two, so one is pulled
        let tally = roster.tally(&assignment);
        assert_eq!(tally.team(0).position_count(Position::Catcher), 1);
        assert_eq!(tally.team(1).position_count(Position::Catcher), 1);
        assert_eq!(tally.team(0).size(), 10);
    }

    #[test]
    fn test_forced_pull_without_surplus() {
        // one shortstop in the whole roster, on team 1; team 0 needs it
        let mut players = lineups(2);
        players[0] = Player::new("p0", Position::Catcher, 50.0, 1.0);
        let roster = Roster::new(players, 2).unwrap();
        let mut assignment = Assignment::new((0..18).map(|i| i / 9).collect());

        let tally = roster.tally(&assignment);
        assert!(close_first_gap(&roster, &mut assignment, &tally, &mut StdRng::seed_from_u64(8)));
        assert_eq!(assignment.team_of(9), 0);
    }

    #[test]
    fn test_forced_outfield_pull_keeps_two() {
        let roster = Roster::new(lineups(2), 2).unwrap();
        // team 0 loses one OF to team 1: team 0 has 2 outfielders, team 1 has 4
        let mut teams = (0..18).map(|i| i / 9).collect::<Vec<_>>();
        teams[8] = 1;
        let mut assignment = Assignment::new(teams);
        let tally = roster.tally(&assignment);
        assert!(close_first_gap(&roster, &mut assignment, &tally, &mut StdRng::seed_from_u64(9)));
        let tally = roster.tally(&assignment);
        assert_eq!(tally.team(0).position_count(Position::Outfield), 3);
        assert_eq!(tally.team(1).position_count(Position::Outfield), 3);
    }

    #[test]
    fn test_stuck_when_no_donor_exists() {
        // nobody plays SS
        let players = lineups(2)
            .into_iter()
            .map(|p| {
                if p.position() == Position::Shortstop {
                    Player::new(p.name(), Position::Outfield, 50.0, 1.0)
                } else {
                    p
                }
            })
            .collect();
        let roster = Roster::new(players, 2).unwrap();
        let mut assignment = Assignment::new((0..18).map(|i| i / 9).collect());
        let outcome =
            Repairer::default().repair(&roster, &mut assignment, &mut StdRng::seed_from_u64(10));
        assert!(outcome.status.is_stuck());
        assert!(roster.tally(&assignment).size_spread() <= 1);
    }

    #[test]
    fn test_grouped_players_are_not_pulled_for_coverage() {
        // the only spare SS is grouped, so team 0's missing SS cannot be fixed
        let mut players = lineups(2);
        players[0] = Player::new("p0", Position::Catcher, 50.0, 1.0);
        players[9] = players[9].clone().with_co_assign_group(Some(4));
        players[10] = players[10].clone().with_co_assign_group(Some(4));
        let roster = Roster::new(players, 2).unwrap();
        let mut assignment = Assignment::new((0..18).map(|i| i / 9).collect());
        let tally = roster.tally(&assignment);
        let before = assignment.clone();
        assert!(!close_first_gap(&roster, &mut assignment, &tally, &mut StdRng::seed_from_u64(11)));
        assert_eq!(assignment, before);
    }

    #[test]
    fn test_budget_exhaustion() {
        let roster = Roster::new(catchers(&[None; 10]), 2).unwrap();
        let mut assignment = Assignment::new(vec![0; 10]);
        let outcome = Repairer::new(2).repair(&roster, &mut assignment, &mut StdRng::seed_from_u64(12));
        assert_eq!(
            outcome,
            RepairOutcome {
                status: RepairStatus::Exhausted,
                moves: 2
            }
        );
        assert_eq!(assignment.team_sizes(2), vec![8, 2]);
    }

    #[test]
    fn test_converges_to_feasible_lineups() {
        let roster = Roster::new(lineups(3), 2).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let mut satisfied = 0;
        for _ in 0..40 {
            let mut assignment =
                Assignment::new((0..27).map(|_| rng.random_range(0..2)).collect());
            let outcome = Repairer::default().repair(&roster, &mut assignment, &mut rng);
            if outcome.status.is_satisfied() {
                let tally = roster.tally(&assignment);
                assert!(tally.teams().iter().all(is_fully_covered));
                assert!(tally.size_spread() <= 1);
                satisfied += 1;
            }
        }
        assert!(satisfied > 0);
    }
}
