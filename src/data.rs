//! Loading of match records from CSV and JSON files.

use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use ordinalizer::Ordinal;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{MatchRecord, MinuteField, Odds, Score};
use crate::file;

const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column {0}")]
    MissingColumn(Column),

    #[error("unsupported file extension in {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Ordinal, EnumCount, EnumIter)]
pub enum Column {
    Id,
    Date,
    Country,
    Season,
    Home,
    Away,
    HomeGoalsFt,
    AwayGoalsFt,
    HomeGoalsHt,
    AwayGoalsHt,
    HomeMinutes,
    AwayMinutes,
    OddsHome,
    OddsDraw,
    OddsAway,
}
impl Column {
    /// Accepted header names, in normalised form.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::Id => &["id", "match_id"],
            Column::Date => &["date", "data"],
            Column::Country => &["country", "paese"],
            Column::Season => &["season", "stagione"],
            Column::Home => &["home", "home_team"],
            Column::Away => &["away", "away_team"],
            Column::HomeGoalsFt => &["home_goals_ft", "home_goal_ft"],
            Column::AwayGoalsFt => &["away_goals_ft", "away_goal_ft"],
            Column::HomeGoalsHt => &["home_goals_ht", "home_goal_ht", "home_goal_1t"],
            Column::AwayGoalsHt => &["away_goals_ht", "away_goal_ht", "away_goal_1t"],
            Column::HomeMinutes => &["home_minutes", "minuti_goal_segnato_home"],
            Column::AwayMinutes => &["away_minutes", "minuti_goal_segnato_away"],
            Column::OddsHome => &["odds_home", "odd_home"],
            Column::OddsDraw => &["odds_draw", "odd_draw"],
            Column::OddsAway => &["odds_away", "odd_away"],
        }
    }

    fn is_required(&self) -> bool {
        matches!(
            self,
            Column::Home | Column::Away | Column::HomeGoalsFt | Column::AwayGoalsFt
        )
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.aliases()[0])
    }
}

/// Lower-cases a header name and collapses runs of whitespace, underscores and hyphens into
/// a single underscore.
fn normalise_header(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Positions of the known columns within a header row.
#[derive(Debug)]
pub struct ColumnMap([Option<usize>; Column::COUNT]);
impl ColumnMap {
    pub fn from_header(header: &StringRecord) -> Result<Self, LoadError> {
        let normalised: Vec<_> = header.iter().map(normalise_header).collect();
        let mut positions = [None; Column::COUNT];
        for column in Column::iter() {
            positions[column.ordinal()] = normalised
                .iter()
                .position(|name| column.aliases().contains(&name.as_str()));
            if column.is_required() && positions[column.ordinal()].is_none() {
                return Err(LoadError::MissingColumn(column));
            }
        }
        Ok(Self(positions))
    }

    fn get<'a>(&self, row: &'a StringRecord, column: Column) -> Option<&'a str> {
        self.0[column.ordinal()]
            .and_then(|index| row.get(index))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Decodes one data row, or `None` if its teams or full-time goals are unusable. The half-time
    /// score is left unknown unless both of its cells hold goal counts.
    pub fn decode(&self, row: &StringRecord) -> Option<MatchRecord> {
        let home = self.get(row, Column::Home)?;
        let away = self.get(row, Column::Away)?;
        let full_time = Score::new(
            parse_goals(self.get(row, Column::HomeGoalsFt)?)?,
            parse_goals(self.get(row, Column::AwayGoalsFt)?)?,
        );
        let half_time = match (
            self.get(row, Column::HomeGoalsHt).and_then(parse_goals),
            self.get(row, Column::AwayGoalsHt).and_then(parse_goals),
        ) {
            (Some(home), Some(away)) => Some(Score::new(home, away)),
            _ => None,
        };
        let mut record = MatchRecord::new(
            home,
            away,
            full_time,
            Score::nil_all(),
            MinuteField::from(self.get(row, Column::HomeMinutes)),
            MinuteField::from(self.get(row, Column::AwayMinutes)),
        );
        record.half_time = half_time;
        record.date = self.get(row, Column::Date).and_then(parse_date);
        record.country = self.get(row, Column::Country).unwrap_or_default().to_string();
        record.season = self.get(row, Column::Season).unwrap_or_default().to_string();
        record.id = match self.get(row, Column::Id) {
            Some(id) => id.to_string(),
            None => record.fixture_id(),
        };
        record.odds = match (
            self.get(row, Column::OddsHome).and_then(parse_decimal),
            self.get(row, Column::OddsAway).and_then(parse_decimal),
        ) {
            (Some(home), Some(away)) => Some(Odds {
                home,
                draw: self.get(row, Column::OddsDraw).and_then(parse_decimal),
                away,
            }),
            _ => None,
        };
        Some(record)
    }
}

/// Goal counts are whole numbers, possibly written with a zero fraction (`2.0`).
fn parse_goals(text: &str) -> Option<u8> {
    text.parse().ok().or_else(|| {
        let value = parse_decimal(text)?;
        (value >= 0.0 && value.fract() == 0.0 && value <= u8::MAX as f64).then_some(value as u8)
    })
}

/// Parses a decimal accepting either `.` or `,` as the separator.
fn parse_decimal(text: &str) -> Option<f64> {
    text.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok());
    if date.is_none() {
        debug!("unparseable date '{text}'");
    }
    date
}

/// Reads records from any CSV source. The first row is the header. Rows that cannot be read or
/// decoded are skipped; only I/O failures abort the load.
pub fn read_csv<R: io::Read>(source: R) -> Result<Vec<MatchRecord>, LoadError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
    let columns = ColumnMap::from_header(reader.headers()?)?;
    let mut records = vec![];
    let mut skipped = 0;
    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                skipped += 1;
                warn!("skipping unreadable row {}: {err}", index + 1);
                continue;
            }
        };
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match columns.decode(&row) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                warn!("skipping malformed row {}: {row:?}", index + 1);
            }
        }
    }
    info!("loaded {} match records ({skipped} skipped)", records.len());
    Ok(records)
}

/// Reads records from a `.csv` or `.json` file, or from every such file under a directory.
pub fn read_from_file(path: impl AsRef<Path>) -> Result<Vec<MatchRecord>, LoadError> {
    let path = path.as_ref();
    if path.is_dir() {
        let mut files = vec![];
        file::recurse_dir(path.into(), &mut files, &mut is_supported)?;
        files.sort();
        let mut records = vec![];
        for file in files {
            records.extend(read_from_file(file)?);
        }
        return Ok(records);
    }

    match path.extension().and_then(OsStr::to_str).map(str::to_lowercase).as_deref() {
        Some("csv") => {
            debug!("reading CSV from {path:?}");
            read_csv(File::open(path)?)
        }
        Some("json") => {
            debug!("reading JSON from {path:?}");
            let records: Vec<MatchRecord> = file::read_json(path)?;
            info!("loaded {} match records", records.len());
            Ok(records)
        }
        _ => Err(LoadError::UnsupportedFormat(path.into())),
    }
}

fn is_supported(extension: &OsStr) -> bool {
    extension
        .to_str()
        .map(|extension| {
            extension.eq_ignore_ascii_case("csv") || extension.eq_ignore_ascii_case("json")
        })
        .unwrap_or(false)
}

/// Drops fixtures dated after `as_of`; undated records are kept.
pub fn played_before(records: Vec<MatchRecord>, as_of: NaiveDate) -> Vec<MatchRecord> {
    let before = records.len();
    let played: Vec<_> = records
        .into_iter()
        .filter(|record| record.date.map(|date| date <= as_of).unwrap_or(true))
        .collect();
    if played.len() < before {
        info!("dropped {} fixtures dated after {as_of}", before - played.len());
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
Data,country,Stagione,Home,Away,Home Goal FT,Away Goal FT,Home Goal 1T,Away Goal 1T,minuti goal segnato home,minuti goal segnato away,Odd home,Odd Draw,Odd Away
12/08/2023,ITALY,2023/2024,Team A,Team B,2,1,1,0,\"10, 55\",80,\"1,45\",\"4,2\",\"7,5\"
19/08/2023,ITALY,2023/2024,Team B,Team A,abc,1,0,0,,,,,
26/08/2023,ITALY,2023/2024,Team C,Team A,0.0,0,,,,,2.5,3.1,2.9
,,,,,,,,,,,,,
01/06/2099,ITALY,2023/2024,Team A,Team C,0,0,0,0,,,,,
";

    fn load(sheet: &str) -> Result<Vec<MatchRecord>, LoadError> {
        read_csv(sheet.as_bytes())
    }

    #[test]
    fn header_normalisation() {
        assert_eq!("home_goal_ft", normalise_header("  Home  Goal FT "));
        assert_eq!("odds_home", normalise_header("ODDS-home"));
    }

    #[test]
    fn load_sheet() {
        let records = load(SHEET).unwrap();
        assert_eq!(3, records.len());

        let first = &records[0];
        assert_eq!("Team A", first.home);
        assert_eq!(Score::new(2, 1), first.full_time);
        assert_eq!(Some(Score::new(1, 0)), first.half_time);
        assert_eq!("Team A-Team B-2023-08-12", first.id);
        assert_eq!(MinuteField::Text("10, 55".into()), first.home_minutes);
        assert_eq!(NaiveDate::from_ymd_opt(2023, 8, 12), first.date);
        assert_eq!("2023/2024", first.season);
        assert_eq!(
            Some(Odds {
                home: 1.45,
                draw: Some(4.2),
                away: 7.5
            }),
            first.odds
        );

        let second = &records[1];
        assert_eq!(Score::nil_all(), second.full_time);
        assert_eq!(None, second.half_time);
        assert_eq!(MinuteField::Missing, second.away_minutes);
    }

    #[test]
    fn stray_quote_keeps_following_rows() {
        let records = load(
            "home,away,home_goals_ft,away_goals_ft\nInter 2\",B,1,0\nC,D,2,0\nE,F,0,0\nG,H,1,1\n",
        )
        .unwrap();
        assert_eq!(4, records.len());
        assert_eq!("Inter 2\"", records[0].home);
        assert_eq!(
            vec!["C", "E", "G"],
            records[1..].iter().map(|record| record.home.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(Score::new(1, 1), records[3].full_time);
    }

    #[test]
    fn half_time_needs_both_cells() {
        let records = load(
            "home,away,home_goals_ft,away_goals_ft,home_goals_ht,away_goals_ht,season\n\
             A,B,1,0,,,2023\n\
             C,D,2,0,1,,2023\n\
             E,F,0,0,0,0,2023\n",
        )
        .unwrap();
        assert_eq!(
            vec![None, None, Some(Score::nil_all())],
            records.iter().map(|record| record.half_time).collect::<Vec<_>>()
        );
        assert_eq!("A-B-2023", records[0].id);
    }

    #[test]
    fn missing_required_column() {
        let err = load("home,away,home_goals_ft\nA,B,1\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(Column::AwayGoalsFt)));
        assert_eq!("missing column away_goals_ft", err.to_string());
        assert!(matches!(load("").unwrap_err(), LoadError::MissingColumn(_)));
    }

    #[test]
    fn future_fixtures_dropped() {
        let mut records = load(SHEET).unwrap();
        records[1].date = None;
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let played = played_before(records, as_of);
        assert_eq!(2, played.len());
        assert!(played.iter().all(|record| record.date.map(|date| date <= as_of).unwrap_or(true)));
    }

    #[test]
    fn goals_and_decimals() {
        assert_eq!(Some(3), parse_goals("3"));
        assert_eq!(Some(2), parse_goals("2.0"));
        assert_eq!(None, parse_goals("2.5"));
        assert_eq!(None, parse_goals("-1"));
        assert_eq!(Some(1.85), parse_decimal("1,85"));
        assert_eq!(None, parse_decimal("n/a"));
    }

    #[test]
    fn unsupported_extension() {
        assert!(matches!(
            read_from_file("matches.xlsx").unwrap_err(),
            LoadError::UnsupportedFormat(_)
        ));
    }
}
