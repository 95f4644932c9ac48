//! Loader for the league roster spreadsheet export.
//!
//! The sheet has two header rows. The first names the columns; the rating groups
//! `Off` and `Def` span three columns each, with the second and third left blank:
//!
//! ```text
//! Player,Pos,Off,,,Def,,,BR,Total,Attend,Total w/Att,Coach,Co-assign
//! ,,BA,SLG,Tot,Eff,Rng,Tot,,,,,,
//! ```
//!
//! The second row only labels the sub-columns and is skipped. A `League Avg` row
//! holds league-wide averages rather than a player. Numeric cells are parsed
//! leniently; a blank or malformed cell falls back to a default instead of failing
//! the whole file. The position cell is the only one that must be valid.

use std::{io, path::Path};

use anyhow::{Context, bail};
use csv::StringRecord;
use dugout_model::{GroupId, Player, Position, SkillBreakdown};
use log::warn;

use crate::util;

const LEAGUE_AVERAGE_LABEL: &str = "League Avg";

/// Players and league averages read from a roster file.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterFile {
    pub players: Vec<Player>,
    pub league_average: Option<LeagueAverage>,
}

/// League-wide averages from the `League Avg` row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LeagueAverage {
    pub offensive_total: f64,
    pub defensive_total: f64,
    pub base_running: f64,
    pub total_score: f64,
    pub total_with_attendance: f64,
}

pub fn load_roster_file<P>(path: P) -> anyhow::Result<RosterFile>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = util::open_file("roster CSV", path)?;
    parse_roster(reader)
        .with_context(|| format!("Failed to parse roster CSV file: {}", path.display()))
}

pub fn parse_roster<R>(reader: R) -> anyhow::Result<RosterFile>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = reader.records();

    let header = records
        .next()
        .context("Roster file is empty")?
        .context("Failed to read header row")?;
    let columns = Columns::from_header(&header)?;
    if let Some(sub_header) = records.next() {
        sub_header.context("Failed to read second header row")?;
    }

    let mut players = vec![];
    let mut league_average = None;
    for (i, record) in records.enumerate() {
        // 1-based, counting both header rows
        let row = i + 3;
        let record = record.with_context(|| format!("Failed to read row {row}"))?;
        let name = cell(&record, Some(columns.name));
        if name.is_empty() {
            if record.iter().any(|c| !c.is_empty()) {
                warn!("row {row}: skipping row without a player name");
            }
            continue;
        }
        if name == LEAGUE_AVERAGE_LABEL {
            league_average = Some(columns.league_average(&record));
            continue;
        }
        let player = columns
            .player(&record)
            .with_context(|| format!("Invalid player on row {row}"))?;
        players.push(player);
    }

    Ok(RosterFile {
        players,
        league_average,
    })
}

/// Column indices resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    name: usize,
    position: usize,
    offense: Option<usize>,
    defense: Option<usize>,
    base_running: Option<usize>,
    total: Option<usize>,
    attendance: Option<usize>,
    total_with_attendance: Option<usize>,
    coach: Option<usize>,
    co_assign: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> anyhow::Result<Self> {
        let find = |label: &str| header.iter().position(|h| h.eq_ignore_ascii_case(label));
        let Some(name) = find("Player") else {
            bail!("Missing `Player` column in header row");
        };
        let Some(position) = find("Pos") else {
            bail!("Missing `Pos` column in header row");
        };
        Ok(Self {
            name,
            position,
            offense: find("Off"),
            defense: find("Def"),
            base_running: find("BR"),
            total: find("Total"),
            attendance: find("Attend"),
            total_with_attendance: find("Total w/Att"),
            coach: find("Coach"),
            co_assign: find("Co-assign"),
        })
    }

    fn player(&self, record: &StringRecord) -> anyhow::Result<Player> {
        let name = cell(record, Some(self.name));
        let position = cell(record, Some(self.position))
            .parse::<Position>()
            .with_context(|| format!("Invalid position for {name}"))?;

        let skills = SkillBreakdown {
            batting_average: parse_int(sub_cell(record, self.offense, 0)),
            slugging: parse_int(sub_cell(record, self.offense, 1)),
            offensive_total: parse_int(sub_cell(record, self.offense, 2)),
            efficiency: parse_int(sub_cell(record, self.defense, 0)),
            range: parse_int(sub_cell(record, self.defense, 1)),
            defensive_total: parse_int(sub_cell(record, self.defense, 2)),
            base_running: parse_int(cell(record, self.base_running)),
        };
        let total_score = parse_real(cell(record, self.total)).unwrap_or(0.0);
        let attendance = parse_real(cell(record, self.attendance)).unwrap_or(1.0);
        let total_with_attendance =
            parse_real(cell(record, self.total_with_attendance)).unwrap_or(0.0);
        let is_coach = cell(record, self.coach).eq_ignore_ascii_case("Y");
        let co_assign_group = parse_group(cell(record, self.co_assign));

        Ok(Player::new(name, position, total_score, attendance)
            .with_skills(skills)
            .with_total_with_attendance(total_with_attendance)
            .with_coach(is_coach)
            .with_co_assign_group(co_assign_group))
    }

    fn league_average(&self, record: &StringRecord) -> LeagueAverage {
        let real = |text: &str| parse_real(text).unwrap_or(0.0);
        LeagueAverage {
            offensive_total: real(sub_cell(record, self.offense, 2)),
            defensive_total: real(sub_cell(record, self.defense, 2)),
            base_running: real(cell(record, self.base_running)),
            total_score: real(cell(record, self.total)),
            total_with_attendance: real(cell(record, self.total_with_attendance)),
        }
    }
}

fn cell(record: &StringRecord, column: Option<usize>) -> &str {
    column.and_then(|c| record.get(c)).unwrap_or_default()
}

/// Cell `offset` columns to the right of a group's first column.
fn sub_cell(record: &StringRecord, group: Option<usize>, offset: usize) -> &str {
    cell(record, group.map(|c| c + offset))
}

/// Parses a real number; `95%` reads as `0.95`.
fn parse_real(cell: &str) -> Option<f64> {
    let value = match cell.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().ok()? / 100.0,
        None => cell.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Parses an integer, truncating decimals; blank or malformed cells read as 0.
#[expect(clippy::cast_possible_truncation)]
fn parse_int(cell: &str) -> i32 {
    cell.parse::<i32>()
        .ok()
        .or_else(|| parse_real(cell).map(|v| v.trunc() as i32))
        .unwrap_or(0)
}

#[expect(clippy::cast_possible_truncation, clippy::float_cmp)]
fn parse_group(cell: &str) -> Option<GroupId> {
    cell.parse::<GroupId>().ok().or_else(|| {
        let value = parse_real(cell)?;
        (value.trunc() == value).then_some(value as GroupId)
    })
}
