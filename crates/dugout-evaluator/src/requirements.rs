//! Position coverage rules every team must satisfy.
//!
//! A team is fully covered when it has:
//!
//! - at least one player for each of SS, CF, 2B, 3B, P, 1B, C
//! - at least [`MIN_OUTFIELDERS`] players able to play OF (CF players count)
//! - a pitching staff that passes the pitcher rule: a team with any pitcher needs
//!   either a pitcher with perfect attendance or at least two pitchers
//!
//! Gaps are reported in a fixed order (singletons in [`Position::REQUIRED_SINGLETONS`]
//! order, then OF, then the pitcher rule). The repair engine fixes the first gap it
//! can, so this order decides which deficit gets attention first.

use std::fmt;

use dugout_model::{Position, TeamTally};

/// Minimum number of outfield-capable players per team.
pub const MIN_OUTFIELDERS: usize = 3;

/// Pitchers needed on a team when none of them has perfect attendance.
pub const MIN_PITCHERS_WITHOUT_PERFECT_ATTENDANCE: usize = 2;

/// One unmet coverage requirement of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageGap {
    /// No player for a singleton position.
    MissingPosition(Position),
    /// Fewer than [`MIN_OUTFIELDERS`] outfielders.
    OutfieldShortfall { count: usize },
    /// Pitchers present, but only one and without perfect attendance.
    PitcherRule,
}

impl CoverageGap {
    /// The position a player must be able to play to close this gap.
    #[must_use]
    pub fn needed_position(self) -> Position {
        match self {
            Self::MissingPosition(position) => position,
            Self::OutfieldShortfall { .. } => Position::Outfield,
            Self::PitcherRule => Position::Pitcher,
        }
    }
}

impl fmt::Display for CoverageGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPosition(position) => write!(f, "no {position}"),
            Self::OutfieldShortfall { count } => {
                write!(f, "only {count} of {MIN_OUTFIELDERS} outfielders")
            }
            Self::PitcherRule => f.write_str("single pitcher without perfect attendance"),
        }
    }
}

/// Returns `true` if the team's pitchers pass the pitcher rule.
///
/// A team without pitchers passes; the missing pitcher is reported as a missing
/// position instead.
#[must_use]
pub fn satisfies_pitcher_rule(tally: &TeamTally) -> bool {
    tally.pitchers() == 0
        || tally.perfect_attendance_pitchers() > 0
        || tally.pitchers() >= MIN_PITCHERS_WITHOUT_PERFECT_ATTENDANCE
}

/// Unmet requirements of a team, in repair order.
pub fn coverage_gaps(tally: &TeamTally) -> impl Iterator<Item = CoverageGap> + '_ {
    let missing = Position::REQUIRED_SINGLETONS
        .into_iter()
        .filter(move |&pos| tally.position_count(pos) < 1)
        .map(CoverageGap::MissingPosition);
    let outfielders = tally.position_count(Position::Outfield);
    let outfield = (outfielders < MIN_OUTFIELDERS)
        .then_some(CoverageGap::OutfieldShortfall { count: outfielders });
    let pitcher = (!satisfies_pitcher_rule(tally)).then_some(CoverageGap::PitcherRule);
    missing.chain(outfield).chain(pitcher)
}

#[must_use]
pub fn is_fully_covered(tally: &TeamTally) -> bool {
    coverage_gaps(tally).next().is_none()
}
