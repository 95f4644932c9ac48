use crate::{Assignment, AssignmentError, GroupId, Player, RosterError, RosterTally, Team, TeamId};

/// Players sharing a co-assignment group id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoAssignGroup {
    id: GroupId,
    members: Vec<usize>,
}

impl CoAssignGroup {
    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Player indices of the members, ascending.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Returns `true` if the members are not all on the same team.
    #[must_use]
    pub fn is_split(&self, assignment: &Assignment) -> bool {
        let mut teams = self.members.iter().map(|&m| assignment.team_of(m));
        let Some(first) = teams.next() else {
            return false;
        };
        teams.any(|t| t != first)
    }
}

/// Partition of the grouped players, plus the list of players in no group.
///
/// Groups are ordered by the first appearance of their id in the player list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoAssignGroups {
    groups: Vec<CoAssignGroup>,
    group_of: Vec<Option<usize>>,
    ungrouped: Vec<usize>,
}

impl CoAssignGroups {
    #[must_use]
    pub fn from_players(players: &[Player]) -> Self {
        let mut groups: Vec<CoAssignGroup> = vec![];
        let mut group_of = Vec::with_capacity(players.len());
        let mut ungrouped = vec![];
        for (index, player) in players.iter().enumerate() {
            let Some(id) = player.co_assign_group() else {
                group_of.push(None);
                ungrouped.push(index);
                continue;
            };
            let slot = match groups.iter().position(|g| g.id == id) {
                Some(slot) => slot,
                None => {
                    groups.push(CoAssignGroup {
                        id,
                        members: vec![],
                    });
                    groups.len() - 1
                }
            };
            groups[slot].members.push(index);
            group_of.push(Some(slot));
        }
        Self {
            groups,
            group_of,
            ungrouped,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoAssignGroup> + '_ {
        self.groups.iter()
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> &CoAssignGroup {
        &self.groups[slot]
    }

    /// The group containing `player`, if any.
    #[must_use]
    pub fn group_of(&self, player: usize) -> Option<&CoAssignGroup> {
        self.group_of[player].map(|slot| &self.groups[slot])
    }

    #[must_use]
    pub fn is_grouped(&self, player: usize) -> bool {
        self.group_of[player].is_some()
    }

    /// Player indices belonging to no group, ascending.
    #[must_use]
    pub fn ungrouped(&self) -> &[usize] {
        &self.ungrouped
    }

    /// Number of groups whose members are spread over more than one team.
    #[must_use]
    pub fn count_split(&self, assignment: &Assignment) -> usize {
        self.groups.iter().filter(|g| g.is_split(assignment)).count()
    }
}

/// The fixed input of an optimization run: the players and the number of teams.
///
/// Construction checks the run preconditions, so every `Roster` has at least two
/// teams, at least one player, and no more teams than players.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    players: Vec<Player>,
    num_teams: usize,
    groups: CoAssignGroups,
}

impl Roster {
    pub fn new(players: Vec<Player>, num_teams: usize) -> Result<Self, RosterError> {
        if num_teams < 2 {
            return Err(RosterError::TooFewTeams { num_teams });
        }
        if players.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        if num_teams > players.len() {
            return Err(RosterError::MoreTeamsThanPlayers {
                num_teams,
                num_players: players.len(),
            });
        }
        let groups = CoAssignGroups::from_players(&players);
        Ok(Self {
            players,
            num_teams,
            groups,
        })
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn num_teams(&self) -> usize {
        self.num_teams
    }

    #[must_use]
    pub fn groups(&self) -> &CoAssignGroups {
        &self.groups
    }

    #[must_use]
    pub fn coach_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_coach()).count()
    }

    /// Verifies that `assignment` has one entry per player and every entry names a team.
    pub fn check_assignment(&self, assignment: &Assignment) -> Result<(), AssignmentError> {
        if assignment.len() != self.players.len() {
            return Err(AssignmentError::WrongLength {
                expected: self.players.len(),
                actual: assignment.len(),
            });
        }
        if let Some((player, &team)) = assignment
            .as_slice()
            .iter()
            .enumerate()
            .find(|&(_, &team)| team >= self.num_teams)
        {
            return Err(AssignmentError::TeamOutOfRange {
                player,
                team,
                num_teams: self.num_teams,
            });
        }
        Ok(())
    }

    /// Groups the players into `num_teams` teams as named by `assignment`.
    ///
    /// Infeasible assignments (unbalanced sizes, uncovered positions, split groups)
    /// decode without complaint. The assignment must be structurally valid; see
    /// [`Roster::check_assignment`].
    ///
    /// ```
    /// use dugout_model::{Assignment, Player, Position, Roster};
    ///
    /// let players = vec![
    ///     Player::new("a", Position::Pitcher, 40.0, 1.0),
    ///     Player::new("b", Position::Catcher, 60.0, 1.0),
    ///     Player::new("c", Position::Outfield, 50.0, 1.0),
    /// ];
    /// let roster = Roster::new(players, 2).unwrap();
    /// let teams = roster.decode(&Assignment::new(vec![1, 0, 1]));
    ///
    /// assert_eq!(teams.len(), 2);
    /// assert_eq!(teams[0].players()[0].name(), "b");
    /// assert_eq!(teams[1].average_skill(), 45.0);
    /// ```
    #[must_use]
    pub fn decode(&self, assignment: &Assignment) -> Vec<Team<'_>> {
        debug_assert!(self.check_assignment(assignment).is_ok());
        let capacity = self.players.len() / self.num_teams + 1;
        let mut teams = (0..self.num_teams)
            .map(|id| Team::with_capacity(id, capacity))
            .collect::<Vec<_>>();
        for (player, &team) in self.players.iter().zip(assignment.as_slice()) {
            teams[team].add_player(player);
        }
        teams
    }

    #[must_use]
    pub fn tally(&self, assignment: &Assignment) -> RosterTally {
        RosterTally::new(self, assignment)
    }

    /// Team ids of the members of each group that is split by `assignment`.
    #[must_use]
    pub fn split_groups(&self, assignment: &Assignment) -> Vec<(GroupId, Vec<TeamId>)> {
        self.groups
            .iter()
            .filter(|g| g.is_split(assignment))
            .map(|g| {
                let mut teams = g
                    .members()
                    .iter()
                    .map(|&m| assignment.team_of(m))
                    .collect::<Vec<_>>();
                teams.sort_unstable();
                teams.dedup();
                (g.id(), teams)
            })
            .collect()
    }
}
