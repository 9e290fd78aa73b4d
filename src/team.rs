//! Per-team statistics: venue selection, the Home/Away/Blended report and the head-to-head
//! comparison of one team at home against another team away.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blend::blend;
use crate::domain::{MatchRecord, Side};
use crate::stats::{StatisticRow, StatsError, Venue};
use crate::tally;
use crate::timeline::TimelineBuilder;

/// Restricts the match set by country and/or season. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub country: Option<String>,
    pub seasons: Vec<String>,
}
impl Filter {
    pub fn matches(&self, record: &MatchRecord) -> bool {
        if let Some(country) = &self.country {
            if !same_name(country, &record.country) {
                return false;
            }
        }
        self.seasons.is_empty() || self.seasons.iter().any(|season| same_name(season, &record.season))
    }

    pub fn apply<'a>(&self, records: &'a [MatchRecord]) -> Vec<&'a MatchRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Matches in which `team` played on `side`.
pub fn team_matches<'a>(records: &[&'a MatchRecord], team: &str, side: Side) -> Vec<&'a MatchRecord> {
    records
        .iter()
        .filter(|record| same_name(record.team(side), team))
        .copied()
        .collect()
}

/// Sorted, de-duplicated names of every team appearing in `records`.
pub fn teams(records: &[&MatchRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| [record.home.trim(), record.away.trim()])
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn venue_row(builder: &TimelineBuilder, records: &[&MatchRecord], team: &str, side: Side) -> StatisticRow {
    let subset = team_matches(records, team, side);
    let tally = tally::tally(builder, &subset, side);
    debug!("{team} at {side:?}: {tally:?}");
    StatisticRow::from_tally(Venue::from(side), &tally)
}

/// Home, Away and Blended rows of one team. A venue at which the team has no matches is `None`
/// rather than a row of zeros.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    pub team: String,
    pub home: Option<StatisticRow>,
    pub away: Option<StatisticRow>,
    pub blended: StatisticRow,
}
impl TeamReport {
    pub fn compute(builder: &TimelineBuilder, records: &[&MatchRecord], team: &str) -> Result<Self, StatsError> {
        let home = venue_row(builder, records, team, Side::Home);
        let away = venue_row(builder, records, team, Side::Away);
        if home.matches + away.matches == 0 {
            return Err(StatsError::NoData { team: team.to_string() });
        }
        let blended = blend(&home, &away);
        Ok(Self {
            team: team.to_string(),
            home: (home.matches > 0).then_some(home),
            away: (away.matches > 0).then_some(away),
            blended,
        })
    }

    pub fn rows(&self) -> [(Venue, Option<&StatisticRow>); 3] {
        [
            (Venue::Home, self.home.as_ref()),
            (Venue::Away, self.away.as_ref()),
            (Venue::Blended, Some(&self.blended)),
        ]
    }
}

/// One team's home record set against another team's away record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub home_team: String,
    pub away_team: String,
    pub home: StatisticRow,
    pub away: StatisticRow,
}
impl Comparison {
    pub fn compute(
        builder: &TimelineBuilder,
        records: &[&MatchRecord],
        home_team: &str,
        away_team: &str,
    ) -> Result<Self, StatsError> {
        let home = venue_row(builder, records, home_team, Side::Home);
        if home.matches == 0 {
            return Err(StatsError::NoData { team: home_team.to_string() });
        }
        let away = venue_row(builder, records, away_team, Side::Away);
        if away.matches == 0 {
            return Err(StatsError::NoData { team: away_team.to_string() });
        }
        Ok(Self {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home,
            away,
        })
    }
}
