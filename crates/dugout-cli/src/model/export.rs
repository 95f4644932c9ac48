use chrono::{DateTime, Utc};
use dugout_evaluator::FitnessBreakdown;
use dugout_model::{GroupId, Player, Position, PositionCoverage, Team};
use serde::Serialize;

/// JSON document written by `optimize --output`.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentExport {
    pub generated_at: DateTime<Utc>,
    pub fitness: f64,
    pub hard_penalty: f64,
    pub teams: Vec<TeamExport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamExport {
    /// 1-based team number
    pub team_id: usize,
    pub players: Vec<PlayerExport>,
    pub avg_skill: f64,
    pub avg_attendance: f64,
    pub skill_variance: f64,
    pub has_coach: bool,
    pub position_coverage: PositionCoverage,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerExport {
    pub name: String,
    pub position: Position,
    pub total_score: f64,
    pub attendance: f64,
    pub is_coach: bool,
    pub co_assign_group: Option<GroupId>,
}

impl AssignmentExport {
    #[must_use]
    pub fn new(teams: &[Team<'_>], breakdown: &FitnessBreakdown, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            fitness: breakdown.total(),
            hard_penalty: breakdown.hard_penalty(),
            teams: teams.iter().map(TeamExport::new).collect(),
        }
    }
}

impl TeamExport {
    fn new(team: &Team<'_>) -> Self {
        Self {
            team_id: team.id() + 1,
            players: team.players().iter().map(|p| PlayerExport::new(p)).collect(),
            avg_skill: team.average_skill(),
            avg_attendance: team.average_attendance(),
            skill_variance: team.skill_variance(),
            has_coach: team.has_coach(),
            position_coverage: team.coverage(),
        }
    }
}

impl PlayerExport {
    fn new(player: &Player) -> Self {
        Self {
            name: player.name().to_owned(),
            position: player.position(),
            total_score: player.total_score(),
            attendance: player.attendance(),
            is_coach: player.is_coach(),
            co_assign_group: player.co_assign_group(),
        }
    }
}
