use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Position;

/// Identifier shared by players who must end up on the same team (car pools, siblings).
pub type GroupId = i64;

/// Rating sub-scores from the roster sheet.
///
/// These are carried through to reports; only [`Player::total_score`] drives the
/// optimizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBreakdown {
    pub batting_average: i32,
    pub slugging: i32,
    pub offensive_total: i32,
    pub efficiency: i32,
    pub range: i32,
    pub defensive_total: i32,
    pub base_running: i32,
}

/// A rostered player.
///
/// Players are immutable once loaded; teams and assignment vectors refer to them by
/// reference or by index into the [`Roster`](crate::Roster).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    position: Position,
    skills: SkillBreakdown,
    total_score: f64,
    attendance: f64,
    total_with_attendance: f64,
    is_coach: bool,
    co_assign_group: Option<GroupId>,
}

impl Player {
    /// Creates a player with the fields the optimizer reads.
    ///
    /// Sub-scores default to zero, the player is not a coach, and belongs to no
    /// co-assignment group.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position, total_score: f64, attendance: f64) -> Self {
        Self {
            name: name.into(),
            position,
            skills: SkillBreakdown::default(),
            total_score,
            attendance,
            total_with_attendance: 0.0,
            is_coach: false,
            co_assign_group: None,
        }
    }

    #[must_use]
    pub fn with_skills(mut self, skills: SkillBreakdown) -> Self {
        self.skills = skills;
        self
    }

    #[must_use]
    pub fn with_total_with_attendance(mut self, total_with_attendance: f64) -> Self {
        self.total_with_attendance = total_with_attendance;
        self
    }

    #[must_use]
    pub fn with_coach(mut self, is_coach: bool) -> Self {
        self.is_coach = is_coach;
        self
    }

    #[must_use]
    pub fn with_co_assign_group(mut self, group: Option<GroupId>) -> Self {
        self.co_assign_group = group;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn skills(&self) -> &SkillBreakdown {
        &self.skills
    }

    /// Aggregate skill rating. Higher is better.
    #[must_use]
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Fraction of games attended, normally in `[0, 1]`.
    #[must_use]
    pub fn attendance(&self) -> f64 {
        self.attendance
    }

    #[must_use]
    pub fn total_with_attendance(&self) -> f64 {
        self.total_with_attendance
    }

    #[must_use]
    pub fn is_coach(&self) -> bool {
        self.is_coach
    }

    #[must_use]
    pub fn co_assign_group(&self) -> Option<GroupId> {
        self.co_assign_group
    }

    #[must_use]
    pub fn is_outfielder(&self) -> bool {
        self.position.is_outfielder()
    }

    #[must_use]
    pub fn is_pitcher(&self) -> bool {
        self.position == Position::Pitcher
    }

    /// Attendance of at least 1.0 marks a player who never misses a game.
    #[must_use]
    pub fn has_perfect_attendance(&self) -> bool {
        self.attendance >= 1.0
    }

    /// Returns `true` if this player can fill `position` (see [`Position::satisfies`]).
    #[must_use]
    pub fn can_play(&self, position: Position) -> bool {
        self.position.satisfies(position)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.position)?;
        if self.is_coach {
            write!(f, " (Coach)")?;
        }
        if let Some(group) = self.co_assign_group {
            write!(f, " [Group {group}]")?;
        }
        write!(
            f,
            " - Total: {:.1}, Att: {:.1}%",
            self.total_score,
            self.attendance * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_play() {
        let cf = Player::new("Casey", Position::CenterField, 50.0, 0.9);
        assert!(cf.can_play(Position::CenterField));
        assert!(cf.can_play(Position::Outfield));
        assert!(!cf.can_play(Position::Shortstop));

        let of = Player::new("Robin", Position::Outfield, 50.0, 0.9);
        assert!(of.can_play(Position::Outfield));
        assert!(!of.can_play(Position::CenterField));
    }

    #[test]
    fn test_perfect_attendance_boundary() {
        assert!(Player::new("a", Position::Pitcher, 0.0, 1.0).has_perfect_attendance());
        assert!(!Player::new("b", Position::Pitcher, 0.0, 0.99).has_perfect_attendance());
    }

    #[test]
    fn test_display() {
        let player = Player::new("Jordan", Position::SecondBase, 61.4, 0.875)
            .with_coach(true)
            .with_co_assign_group(Some(4));
        assert_eq!(
            player.to_string(),
            "Jordan (2B) (Coach) [Group 4] - Total: 61.4, Att: 87.5%"
        );
    }
}
