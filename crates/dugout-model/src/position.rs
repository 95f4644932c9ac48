use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, ser::SerializeMap as _};

/// A fielding position as written on the roster sheet.
///
/// `CF` and `OF` players both count as outfielders; see [`Position::satisfies`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
pub enum Position {
    #[display("SS")]
    #[serde(rename = "SS")]
    Shortstop,
    #[display("CF")]
    #[serde(rename = "CF")]
    CenterField,
    #[display("OF")]
    #[serde(rename = "OF")]
    Outfield,
    #[display("2B")]
    #[serde(rename = "2B")]
    SecondBase,
    #[display("3B")]
    #[serde(rename = "3B")]
    ThirdBase,
    #[display("P")]
    #[serde(rename = "P")]
    Pitcher,
    #[display("1B")]
    #[serde(rename = "1B")]
    FirstBase,
    #[display("C")]
    #[serde(rename = "C")]
    Catcher,
}

impl Position {
    pub const LEN: usize = 8;

    /// All positions in roster-sheet order.
    pub const ALL: [Self; Self::LEN] = [
        Self::Shortstop,
        Self::CenterField,
        Self::Outfield,
        Self::SecondBase,
        Self::ThirdBase,
        Self::Pitcher,
        Self::FirstBase,
        Self::Catcher,
    ];

    /// Positions every team needs at least one player for, in the order they are checked.
    pub const REQUIRED_SINGLETONS: [Self; 7] = [
        Self::Shortstop,
        Self::CenterField,
        Self::SecondBase,
        Self::ThirdBase,
        Self::Pitcher,
        Self::FirstBase,
        Self::Catcher,
    ];

    /// Order in which position coverage is reported: the singletons, then `OF`.
    pub const COVERAGE_ORDER: [Self; Self::LEN] = [
        Self::Shortstop,
        Self::CenterField,
        Self::SecondBase,
        Self::ThirdBase,
        Self::Pitcher,
        Self::FirstBase,
        Self::Catcher,
        Self::Outfield,
    ];

    /// Roster-sheet code of this position (`"SS"`, `"2B"`, ...).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Shortstop => "SS",
            Self::CenterField => "CF",
            Self::Outfield => "OF",
            Self::SecondBase => "2B",
            Self::ThirdBase => "3B",
            Self::Pitcher => "P",
            Self::FirstBase => "1B",
            Self::Catcher => "C",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_outfielder(self) -> bool {
        matches!(self, Self::CenterField | Self::Outfield)
    }

    /// Returns `true` if a player whose primary position is `self` can fill `required`.
    ///
    /// Outfield coverage accepts both `CF` and `OF` players; every other position
    /// requires an exact match.
    ///
    /// ```
    /// use dugout_model::Position;
    ///
    /// assert!(Position::CenterField.satisfies(Position::Outfield));
    /// assert!(Position::CenterField.satisfies(Position::CenterField));
    /// assert!(!Position::Outfield.satisfies(Position::CenterField));
    /// ```
    #[must_use]
    pub const fn satisfies(self, required: Self) -> bool {
        match required {
            Self::Outfield => self.is_outfielder(),
            _ => self.index() == required.index(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown position code '{code}' (expected one of SS, CF, OF, 2B, 3B, P, 1B, C)")]
pub struct ParsePositionError {
    code: String,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|pos| pos.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ParsePositionError {
                code: code.to_owned(),
            })
    }
}

/// Number of players able to fill each position on a team.
///
/// The `OF` entry counts every outfielder, so `CF` players are included in it as
/// well as in the `CF` entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionCoverage {
    counts: [usize; Position::LEN],
}

impl PositionCoverage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; Position::LEN],
        }
    }

    /// Counts a player whose primary position is `position`.
    pub fn add(&mut self, position: Position) {
        self.counts[position.index()] += 1;
        if position == Position::CenterField {
            self.counts[Position::Outfield.index()] += 1;
        }
    }

    /// Number of players able to play `position`.
    #[must_use]
    pub const fn get(&self, position: Position) -> usize {
        self.counts[position.index()]
    }

    /// Iterates `(position, count)` pairs in [`Position::COVERAGE_ORDER`].
    pub fn iter(&self) -> impl Iterator<Item = (Position, usize)> + '_ {
        Position::COVERAGE_ORDER
            .into_iter()
            .map(|pos| (pos, self.get(pos)))
    }
}

impl Serialize for PositionCoverage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(Position::LEN))?;
        for (pos, count) in self.iter() {
            map.serialize_entry(pos.code(), &count)?;
        }
        map.end()
    }
}

impl fmt::Display for PositionCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (pos, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{pos}:{count}")?;
        }
        Ok(())
    }
}
