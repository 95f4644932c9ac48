use dugout_stats::{mean, population_variance};

use crate::{Player, Position, PositionCoverage, TeamId, TeamTally};

/// A team: an id and references to the players assigned to it.
///
/// Teams are transient views over an [`Assignment`](crate::Assignment). Every
/// statistic is derived from the member list on demand, so two teams decoded from
/// the same assignment always report identical values.
#[derive(Debug, Clone, PartialEq)]
pub struct Team<'a> {
    id: TeamId,
    players: Vec<&'a Player>,
}

impl<'a> Team<'a> {
    #[must_use]
    pub fn new(id: TeamId, players: Vec<&'a Player>) -> Self {
        Self { id, players }
    }

    pub(crate) fn with_capacity(id: TeamId, capacity: usize) -> Self {
        Self {
            id,
            players: Vec::with_capacity(capacity),
        }
    }

    pub fn add_player(&mut self, player: &'a Player) {
        self.players.push(player);
    }

    #[must_use]
    pub fn id(&self) -> TeamId {
        self.id
    }

    #[must_use]
    pub fn players(&self) -> &[&'a Player] {
        &self.players
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Mean total score of the members; 0.0 for an empty team.
    #[must_use]
    pub fn average_skill(&self) -> f64 {
        mean(self.players.iter().map(|p| p.total_score())).unwrap_or(0.0)
    }

    /// Mean attendance of the members; 0.0 for an empty team.
    #[must_use]
    pub fn average_attendance(&self) -> f64 {
        mean(self.players.iter().map(|p| p.attendance())).unwrap_or(0.0)
    }

    /// Population variance of the members' total scores; 0.0 for fewer than two players.
    #[must_use]
    pub fn skill_variance(&self) -> f64 {
        if self.players.len() < 2 {
            return 0.0;
        }
        population_variance(self.players.iter().map(|p| p.total_score())).unwrap_or(0.0)
    }

    /// Number of members able to play `position`.
    #[must_use]
    pub fn position_count(&self, position: Position) -> usize {
        self.players.iter().filter(|p| p.can_play(position)).count()
    }

    #[must_use]
    pub fn coverage(&self) -> PositionCoverage {
        self.tally().coverage()
    }

    #[must_use]
    pub fn coach_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_coach()).count()
    }

    #[must_use]
    pub fn has_coach(&self) -> bool {
        self.players.iter().any(|p| p.is_coach())
    }

    pub fn pitchers(&self) -> impl Iterator<Item = &'a Player> + '_ {
        self.players.iter().copied().filter(|p| p.is_pitcher())
    }

    /// Size, coverage, pitcher and coach counts of this team.
    #[must_use]
    pub fn tally(&self) -> TeamTally {
        let mut tally = TeamTally::default();
        for player in &self.players {
            tally.add(player);
        }
        tally
    }
}
