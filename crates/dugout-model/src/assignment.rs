use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Index of a team, in `0..num_teams`.
pub type TeamId = usize;

/// One team id per player, by player index.
///
/// This is the individual manipulated by the search: crossover and mutation edit
/// entries in place, and [`Roster::decode`](crate::Roster::decode) turns it into
/// teams only when statistics are needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(Vec<TeamId>);

impl Assignment {
    #[must_use]
    pub fn new(teams: Vec<TeamId>) -> Self {
        Self(teams)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn team_of(&self, player: usize) -> TeamId {
        self.0[player]
    }

    pub fn assign(&mut self, player: usize, team: TeamId) {
        self.0[player] = team;
    }

    /// Puts every listed player on `team`.
    pub fn assign_all(&mut self, players: &[usize], team: TeamId) {
        for &player in players {
            self.0[player] = team;
        }
    }

    /// Exchanges the entries for `player` between two assignments.
    pub fn swap_with(&mut self, other: &mut Self, player: usize) {
        std::mem::swap(&mut self.0[player], &mut other.0[player]);
    }

    /// Indices of the players assigned to `team`, in ascending order.
    pub fn members_of(&self, team: TeamId) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(move |(player, &t)| (t == team).then_some(player))
    }

    /// Number of players on each of `num_teams` teams.
    ///
    /// Entries outside `0..num_teams` are ignored.
    #[must_use]
    pub fn team_sizes(&self, num_teams: usize) -> Vec<usize> {
        let mut sizes = vec![0; num_teams];
        for &team in &self.0 {
            if let Some(size) = sizes.get_mut(team) {
                *size += 1;
            }
        }
        sizes
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TeamId] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<TeamId> {
        self.0
    }
}

impl From<Vec<TeamId>> for Assignment {
    fn from(teams: Vec<TeamId>) -> Self {
        Self(teams)
    }
}

impl Index<usize> for Assignment {
    type Output = TeamId;

    fn index(&self, player: usize) -> &Self::Output {
        &self.0[player]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_sizes() {
        let assignment = Assignment::new(vec![0, 2, 2, 1, 2]);
        assert_eq!(assignment.team_sizes(3), vec![1, 1, 3]);
        assert_eq!(assignment.team_sizes(4), vec![1, 1, 3, 0]);
    }

    #[test]
    fn test_members_of() {
        let assignment = Assignment::new(vec![1, 0, 1, 1]);
        assert_eq!(assignment.members_of(1).collect::<Vec<_>>(), vec![0, 2, 3]);
        assert_eq!(assignment.members_of(2).count(), 0);
    }

    #[test]
    fn test_swap_with() {
        let mut a = Assignment::new(vec![0, 0, 0]);
        let mut b = Assignment::new(vec![1, 1, 1]);
        a.swap_with(&mut b, 1);
        assert_eq!(a.as_slice(), &[0, 1, 0]);
        assert_eq!(b.as_slice(), &[1, 0, 1]);
    }

    #[test]
    fn test_assign_all() {
        let mut assignment = Assignment::new(vec![0; 5]);
        assignment.assign_all(&[1, 3], 2);
        assert_eq!(assignment.as_slice(), &[0, 2, 0, 2, 0]);
        assert_eq!(assignment[3], 2);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let assignment = Assignment::new(vec![1, 0, 1]);
        assert_eq!(serde_json::to_string(&assignment).unwrap(), "[1,0,1]");
    }
}
