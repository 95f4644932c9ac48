//! Entity layer of the team balancer: players, teams, and assignment vectors.
//!
//! # Overview
//!
//! - [`Player`] - an immutable roster entry (position, skill, attendance, coach flag,
//!   optional co-assignment group)
//! - [`Roster`] - the validated input of a run: all players plus the team count, with
//!   the derived [`CoAssignGroups`] partition
//! - [`Assignment`] - one team id per player index; the unit the search manipulates
//! - [`Team`] - a transient view grouping player references, with derived statistics
//!   (average skill, average attendance, skill variance, position coverage)
//! - [`TeamTally`] / [`RosterTally`] - allocation-light per-team counts used on hot
//!   paths where full teams are not needed
//!
//! Nothing here knows about fitness or feasibility. Decoding never fails on an
//! infeasible assignment; judging it is the evaluator's job.
//!
//! # Example
//!
//! ```
//! use dugout_model::{Assignment, Player, Position, Roster};
//!
//! let players = vec![
//!     Player::new("Avery", Position::Pitcher, 55.0, 1.0).with_co_assign_group(Some(1)),
//!     Player::new("Blake", Position::Catcher, 45.0, 0.8).with_co_assign_group(Some(1)),
//!     Player::new("Cameron", Position::Shortstop, 60.0, 0.9).with_coach(true),
//!     Player::new("Devon", Position::CenterField, 40.0, 0.7),
//! ];
//! let roster = Roster::new(players, 2).unwrap();
//! assert_eq!(roster.groups().len(), 1);
//!
//! let assignment = Assignment::new(vec![0, 0, 1, 1]);
//! let teams = roster.decode(&assignment);
//! assert_eq!(teams[0].average_skill(), 50.0);
//! assert!(teams[1].has_coach());
//! assert_eq!(roster.groups().count_split(&assignment), 0);
//! ```

pub use self::{assignment::*, player::*, position::*, roster::*, tally::*, team::*};

mod assignment;
mod player;
mod position;
mod roster;
mod tally;
mod team;

/// A run configuration that cannot be optimized.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RosterError {
    #[display("at least 2 teams are required (got {num_teams})")]
    TooFewTeams { num_teams: usize },
    #[display("no players to assign")]
    EmptyRoster,
    #[display("{num_teams} teams requested but only {num_players} players available")]
    MoreTeamsThanPlayers { num_teams: usize, num_players: usize },
}

/// A structurally malformed assignment vector.
///
/// The genetic operators never produce one; seeing this error means a caller built
/// an assignment by hand for the wrong roster.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AssignmentError {
    #[display("assignment has {actual} entries but the roster has {expected} players")]
    WrongLength { expected: usize, actual: usize },
    #[display("player {player} assigned to team {team}, but there are only {num_teams} teams")]
    TeamOutOfRange {
        player: usize,
        team: usize,
        num_teams: usize,
    },
}
