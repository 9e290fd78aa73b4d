//! Conversion of raw [Tally] counts into the percentage rows handed to the presentation layer.
//!
//! Every percentage is rounded to two decimal places and is `0` wherever its denominator is `0`.
//! Pattern rates are relative to the number of matches, except the conditional patterns, which
//! are relative to the count of their prerequisite. Time-band rates are relative to the total
//! number of goals in their series (scored or conceded), so each series sums to 100.

use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use thiserror::Error;

use crate::band::{BandSeries, TimeBand};
use crate::domain::{MatchResult, Side};
use crate::pattern::{Pattern, ResultCounters};
use crate::tally::Tally;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("no matches found for {team}")]
    NoData { team: String },
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn percent(count: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round2(100.0 * count as f64 / denominator as f64)
    }
}

fn average(sum: u32, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(sum as f64 / count as f64)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
    Blended,
}

impl From<Side> for Venue {
    fn from(side: Side) -> Self {
        match side {
            Side::Home => Venue::Home,
            Side::Away => Venue::Away,
        }
    }
}

impl Display for Venue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Venue::Home => "Home",
            Venue::Away => "Away",
            Venue::Blended => "Blended",
        };
        write!(f, "{str}")
    }
}

/// Win/draw/loss percentages from the observed team's perspective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSplit {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}
impl ResultSplit {
    pub fn from_counters(counters: &ResultCounters, matches: u32) -> Self {
        Self {
            win: percent(counters[MatchResult::Win], matches),
            draw: percent(counters[MatchResult::Draw], matches),
            loss: percent(counters[MatchResult::Loss], matches),
        }
    }

    pub fn get(&self, result: MatchResult) -> f64 {
        match result {
            MatchResult::Win => self.win,
            MatchResult::Draw => self.draw,
            MatchResult::Loss => self.loss,
        }
    }
}

/// Home-win/draw/away-win percentages, as a fixture list reports them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureSplit {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}
impl FixtureSplit {
    /// Re-expresses the split for a team that played on `side`: an away team's win is the
    /// fixture's away win, and its loss the fixture's home win.
    pub fn to_team_perspective(&self, side: Side) -> ResultSplit {
        match side {
            Side::Home => ResultSplit {
                win: self.home_win,
                draw: self.draw,
                loss: self.away_win,
            },
            Side::Away => ResultSplit {
                win: self.away_win,
                draw: self.draw,
                loss: self.home_win,
            },
        }
    }
}

/// Percentages for the patterns that may be blended across venues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternPercents {
    pub lead_1_0: f64,
    pub lead_1_0_then_1_1: f64,
    pub lead_1_0_then_2_0: f64,
    pub trail_0_1: f64,
    pub trail_0_1_then_1_1: f64,
    pub trail_0_1_then_0_2: f64,
    pub swing_2plus: f64,
    pub clean_sheet_0_0: f64,
}
impl PatternPercents {
    pub fn get(&self, pattern: Pattern) -> Option<f64> {
        match pattern {
            Pattern::FirstGoal | Pattern::LastGoal => None,
            Pattern::Lead1_0 => Some(self.lead_1_0),
            Pattern::Lead1_0Then1_1 => Some(self.lead_1_0_then_1_1),
            Pattern::Lead1_0Then2_0 => Some(self.lead_1_0_then_2_0),
            Pattern::Trail0_1 => Some(self.trail_0_1),
            Pattern::Trail0_1Then1_1 => Some(self.trail_0_1_then_1_1),
            Pattern::Trail0_1Then0_2 => Some(self.trail_0_1_then_0_2),
            Pattern::Swing2Plus => Some(self.swing_2plus),
            Pattern::CleanSheet0_0 => Some(self.clean_sheet_0_0),
        }
    }

    pub fn get_mut(&mut self, pattern: Pattern) -> Option<&mut f64> {
        match pattern {
            Pattern::FirstGoal | Pattern::LastGoal => None,
            Pattern::Lead1_0 => Some(&mut self.lead_1_0),
            Pattern::Lead1_0Then1_1 => Some(&mut self.lead_1_0_then_1_1),
            Pattern::Lead1_0Then2_0 => Some(&mut self.lead_1_0_then_2_0),
            Pattern::Trail0_1 => Some(&mut self.trail_0_1),
            Pattern::Trail0_1Then1_1 => Some(&mut self.trail_0_1_then_1_1),
            Pattern::Trail0_1Then0_2 => Some(&mut self.trail_0_1_then_0_2),
            Pattern::Swing2Plus => Some(&mut self.swing_2plus),
            Pattern::CleanSheet0_0 => Some(&mut self.clean_sheet_0_0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BandPercents(pub [f64; TimeBand::COUNT]);
impl BandPercents {
    pub fn from_series(series: &BandSeries) -> Self {
        let total = series.total();
        let mut percents = BandPercents::default();
        for band in TimeBand::iter() {
            percents[band] = percent(series[band], total);
        }
        percents
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Index<TimeBand> for BandPercents {
    type Output = f64;

    fn index(&self, band: TimeBand) -> &Self::Output {
        &self.0[band.ordinal()]
    }
}

impl IndexMut<TimeBand> for BandPercents {
    fn index_mut(&mut self, band: TimeBand) -> &mut Self::Output {
        &mut self.0[band.ordinal()]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatisticRow {
    pub venue: Venue,
    pub matches: u32,
    pub results: ResultSplit,
    /// Matches with a known half-time score, over which the two half splits are computed.
    pub half_time_matches: u32,
    pub first_half: ResultSplit,
    pub second_half: ResultSplit,
    /// Only defined for a single venue.
    pub first_goal: Option<f64>,
    pub last_goal: Option<f64>,
    pub patterns: PatternPercents,
    pub scored_bands: BandPercents,
    pub conceded_bands: BandPercents,
    pub avg_goals_scored: f64,
    pub avg_goals_conceded: f64,
    pub btts: f64,
    /// Matches whose timeline was synthesised from the final score.
    pub synthesized_matches: u32,
}
impl StatisticRow {
    pub fn from_tally(venue: Venue, tally: &Tally) -> Self {
        let matches = tally.matches;
        let mut patterns = PatternPercents::default();
        for pattern in Pattern::iter() {
            if let Some(value) = patterns.get_mut(pattern) {
                *value = percent(
                    tally.patterns[pattern],
                    tally.patterns.denominator(pattern, matches),
                );
            }
        }
        Self {
            venue,
            matches,
            results: ResultSplit::from_counters(&tally.full_time, matches),
            half_time_matches: tally.with_half_time,
            first_half: ResultSplit::from_counters(&tally.first_half, tally.with_half_time),
            second_half: ResultSplit::from_counters(&tally.second_half, tally.with_half_time),
            first_goal: Some(percent(tally.patterns[Pattern::FirstGoal], matches)),
            last_goal: Some(percent(tally.patterns[Pattern::LastGoal], matches)),
            patterns,
            scored_bands: BandPercents::from_series(&tally.bands.scored),
            conceded_bands: BandPercents::from_series(&tally.bands.conceded),
            avg_goals_scored: average(tally.goals_for, matches),
            avg_goals_conceded: average(tally.goals_against, matches),
            btts: percent(tally.both_scored, matches),
            synthesized_matches: tally.synthesized,
        }
    }

    /// Looks up any pattern's percentage; first/last goal yield `None` on blended rows.
    pub fn pattern(&self, pattern: Pattern) -> Option<f64> {
        match pattern {
            Pattern::FirstGoal => self.first_goal,
            Pattern::LastGoal => self.last_goal,
            _ => self.patterns.get(pattern),
        }
    }
}
