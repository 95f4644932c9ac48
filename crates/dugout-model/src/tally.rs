use crate::{Assignment, Player, Position, PositionCoverage, Roster, TeamId};

/// Counts describing one team, without holding references to its players.
///
/// Computing a [`RosterTally`] is a single pass over the assignment and does not
/// allocate per team, which makes it suitable for the repair loop where the counts
/// are recomputed after every move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamTally {
    size: usize,
    coverage: PositionCoverage,
    perfect_attendance_pitchers: usize,
    coaches: usize,
}

impl TeamTally {
    pub fn add(&mut self, player: &Player) {
        self.size += 1;
        self.coverage.add(player.position());
        if player.is_pitcher() && player.has_perfect_attendance() {
            self.perfect_attendance_pitchers += 1;
        }
        if player.is_coach() {
            self.coaches += 1;
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn coverage(&self) -> PositionCoverage {
        self.coverage
    }

    #[must_use]
    pub fn position_count(&self, position: Position) -> usize {
        self.coverage.get(position)
    }

    #[must_use]
    pub fn pitchers(&self) -> usize {
        self.coverage.get(Position::Pitcher)
    }

    #[must_use]
    pub fn perfect_attendance_pitchers(&self) -> usize {
        self.perfect_attendance_pitchers
    }

    #[must_use]
    pub fn coaches(&self) -> usize {
        self.coaches
    }
}

/// Per-team tallies for a whole assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTally {
    teams: Vec<TeamTally>,
}

impl RosterTally {
    #[must_use]
    pub fn new(roster: &Roster, assignment: &Assignment) -> Self {
        debug_assert!(roster.check_assignment(assignment).is_ok());
        let mut teams = vec![TeamTally::default(); roster.num_teams()];
        for (player, &team) in roster.players().iter().zip(assignment.as_slice()) {
            teams[team].add(player);
        }
        Self { teams }
    }

    #[must_use]
    pub fn teams(&self) -> &[TeamTally] {
        &self.teams
    }

    #[must_use]
    pub fn team(&self, team: TeamId) -> &TeamTally {
        &self.teams[team]
    }

    /// First team with the most players.
    #[must_use]
    pub fn largest_team(&self) -> TeamId {
        let max = self.teams.iter().map(TeamTally::size).max().unwrap_or(0);
        self.teams.iter().position(|t| t.size == max).unwrap_or(0)
    }

    /// First team with the fewest players.
    #[must_use]
    pub fn smallest_team(&self) -> TeamId {
        let min = self.teams.iter().map(TeamTally::size).min().unwrap_or(0);
        self.teams.iter().position(|t| t.size == min).unwrap_or(0)
    }

    /// Difference between the largest and the smallest team size.
    #[must_use]
    pub fn size_spread(&self) -> usize {
        let sizes = self.teams.iter().map(TeamTally::size);
        let max = sizes.clone().max().unwrap_or(0);
        let min = sizes.min().unwrap_or(0);
        max - min
    }
}
