//! Match records and the small value types shared by the rest of the crate.

use std::cmp::Ordering;

use chrono::NaiveDate;
use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount, EnumIter};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}
impl Side {
    pub fn flip(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }

    pub fn is_nil_all(&self) -> bool {
        self.home == 0 && self.away == 0
    }

    /// Absolute goal difference.
    pub fn margin(&self) -> u8 {
        self.home.abs_diff(self.away)
    }

    pub fn for_side(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn against(&self, side: Side) -> u8 {
        self.for_side(side.flip())
    }

    pub fn result_for(&self, side: Side) -> MatchResult {
        MatchResult::from_goals(self.for_side(side), self.against(side))
    }
}

/// Outcome of a match (or one half of it) from the perspective of the observed team.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Ordinal, EnumCount, EnumIter, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}
impl MatchResult {
    pub fn from_goals<G: Ord>(scored: G, conceded: G) -> Self {
        match scored.cmp(&conceded) {
            Ordering::Greater => MatchResult::Win,
            Ordering::Equal => MatchResult::Draw,
            Ordering::Less => MatchResult::Loss,
        }
    }
}

/// The raw goal-minute cell as it arrives from the upstream table. Spreadsheet adapters
/// occasionally coerce a single-goal cell into a number, hence the numeric variant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinuteField {
    #[default]
    Missing,
    Text(String),
    Numeric(f64),
}

impl From<&str> for MinuteField {
    fn from(text: &str) -> Self {
        MinuteField::Text(text.to_string())
    }
}

impl From<Option<&str>> for MinuteField {
    fn from(text: Option<&str>) -> Self {
        text.map(MinuteField::from).unwrap_or_default()
    }
}

/// Decimal prices for the match-odds market.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    pub home: f64,
    pub draw: Option<f64>,
    pub away: f64,
}
impl Odds {
    /// Implied probabilities (`100 / price`) of the three outcomes, in percent.
    pub fn implied(&self) -> Implied {
        Implied {
            home: implied_percent(self.home),
            draw: self.draw.map(implied_percent),
            away: implied_percent(self.away),
        }
    }
}

/// A non-positive or non-finite price implies nothing.
fn implied_percent(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        (10_000.0 / price).round() / 100.0
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Implied {
    pub home: f64,
    pub draw: Option<f64>,
    pub away: f64,
}
impl Implied {
    /// Sum of the implied probabilities; the excess over 100 is the bookmaker's margin.
    pub fn total(&self) -> f64 {
        self.home + self.draw.unwrap_or_default() + self.away
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub season: String,
    pub home: String,
    pub away: String,
    pub full_time: Score,
    /// `None` when the half-time columns are blank or unreadable.
    #[serde(default)]
    pub half_time: Option<Score>,
    #[serde(default)]
    pub home_minutes: MinuteField,
    #[serde(default)]
    pub away_minutes: MinuteField,
    #[serde(default)]
    pub odds: Option<Odds>,
}
impl MatchRecord {
    /// A record with only the fields the timeline engine cares about; the rest are defaulted.
    pub fn new(
        home: impl Into<String>,
        away: impl Into<String>,
        full_time: Score,
        half_time: Score,
        home_minutes: MinuteField,
        away_minutes: MinuteField,
    ) -> Self {
        let home = home.into();
        let away = away.into();
        Self {
            id: format!("{home}-{away}"),
            date: None,
            country: String::new(),
            season: String::new(),
            home,
            away,
            full_time,
            half_time: Some(half_time),
            home_minutes,
            away_minutes,
            odds: None,
        }
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// `home-away`, qualified by the date or, failing that, the season when either is known.
    pub fn fixture_id(&self) -> String {
        match (&self.date, self.season.trim()) {
            (Some(date), _) => format!("{}-{}-{}", self.home, self.away, date.format("%Y-%m-%d")),
            (None, "") => format!("{}-{}", self.home, self.away),
            (None, season) => format!("{}-{}-{season}", self.home, self.away),
        }
    }

    /// Second-half goals for `side`. Negative when the half-time column exceeds the full-time
    /// one; such rows are used as they are.
    pub fn second_half_goals(&self, side: Side) -> Option<i16> {
        self.half_time
            .map(|half_time| self.full_time.for_side(side) as i16 - half_time.for_side(side) as i16)
    }

    pub fn first_half_result_for(&self, side: Side) -> Option<MatchResult> {
        self.half_time.map(|half_time| half_time.result_for(side))
    }

    pub fn second_half_result_for(&self, side: Side) -> Option<MatchResult> {
        Some(MatchResult::from_goals(
            self.second_half_goals(side)?,
            self.second_half_goals(side.flip())?,
        ))
    }

    pub fn both_teams_scored(&self) -> bool {
        self.full_time.home > 0 && self.full_time.away > 0
    }
}
