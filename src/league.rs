//! League-level descriptive aggregates: per country/season summaries with a match-weighted
//! total row, the same aggregates split by starting-price label, and the goal time-frame
//! distribution of each price label.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::band;
use crate::band::BandCounters;
use crate::blend::weighted;
use crate::domain::{MatchRecord, Side};
use crate::label::PriceLabel;
use crate::stats::{percent, round2, BandPercents};
use crate::timeline::TimelineBuilder;

pub const FIRST_HALF_LINES: [f64; 3] = [0.5, 1.5, 2.5];
pub const FULL_TIME_LINES: [f64; 5] = [0.5, 1.5, 2.5, 3.5, 4.5];

const UNKNOWN: &str = "Unknown";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeagueRow {
    pub group: String,
    pub season: String,
    pub matches: u32,
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
    /// Matches with a known half-time score; the denominator of the half-based fields.
    pub half_time_matches: u32,
    pub avg_goals_1h: f64,
    pub avg_goals_2h: f64,
    pub avg_goals_ft: f64,
    /// Percentage of matches over each of [FIRST_HALF_LINES] in the first half.
    pub over_1h: [f64; 3],
    /// Percentage of matches over each of [FULL_TIME_LINES] at full time.
    pub over_ft: [f64; 5],
    pub btts: f64,
}

#[derive(Debug, Default)]
struct Accumulator {
    matches: u32,
    home_wins: u32,
    draws: u32,
    away_wins: u32,
    with_half_time: u32,
    goals_1h: i64,
    goals_ft_with_half_time: i64,
    goals_ft: i64,
    over_1h: [u32; 3],
    over_ft: [u32; 5],
    both_scored: u32,
}
impl Accumulator {
    fn add(&mut self, record: &MatchRecord) {
        let ft = &record.full_time;
        self.matches += 1;
        match ft.home.cmp(&ft.away) {
            std::cmp::Ordering::Greater => self.home_wins += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
            std::cmp::Ordering::Less => self.away_wins += 1,
        }
        let total_ft = ft.total() as i64;
        self.goals_ft += total_ft;
        if let Some(ht) = &record.half_time {
            let total_1h = ht.total() as i64;
            self.with_half_time += 1;
            self.goals_1h += total_1h;
            self.goals_ft_with_half_time += total_ft;
            for (index, line) in FIRST_HALF_LINES.iter().enumerate() {
                if total_1h as f64 > *line {
                    self.over_1h[index] += 1;
                }
            }
        }
        for (index, line) in FULL_TIME_LINES.iter().enumerate() {
            if total_ft as f64 > *line {
                self.over_ft[index] += 1;
            }
        }
        if record.both_teams_scored() {
            self.both_scored += 1;
        }
    }

    fn average(goals: i64, matches: u32) -> f64 {
        if matches == 0 {
            0.0
        } else {
            round2(goals as f64 / matches as f64)
        }
    }

    fn into_row(self, group: String, season: String) -> LeagueRow {
        LeagueRow {
            group,
            season,
            matches: self.matches,
            home_win: percent(self.home_wins, self.matches),
            draw: percent(self.draws, self.matches),
            away_win: percent(self.away_wins, self.matches),
            half_time_matches: self.with_half_time,
            avg_goals_1h: Self::average(self.goals_1h, self.with_half_time),
            // second-half goals as the full-time remainder; inconsistent rows are not corrected
            avg_goals_2h: Self::average(
                self.goals_ft_with_half_time - self.goals_1h,
                self.with_half_time,
            ),
            avg_goals_ft: Self::average(self.goals_ft, self.matches),
            over_1h: self.over_1h.map(|count| percent(count, self.with_half_time)),
            over_ft: self.over_ft.map(|count| percent(count, self.matches)),
            btts: percent(self.both_scored, self.matches),
        }
    }
}

fn or_unknown(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// One row per (country, season), sorted by country then season.
pub fn summarise(records: &[&MatchRecord]) -> Vec<LeagueRow> {
    let mut groups: FxHashMap<(String, String), Accumulator> = FxHashMap::default();
    for record in records {
        groups
            .entry((or_unknown(&record.country), or_unknown(&record.season)))
            .or_default()
            .add(record);
    }
    let mut rows: Vec<_> = groups
        .into_iter()
        .map(|((country, season), acc)| acc.into_row(country, season))
        .collect();
    rows.sort_by(|a, b| (&a.group, &a.season).cmp(&(&b.group, &b.season)));
    rows
}

/// Match-weighted average of `rows`, or `None` if there are none.
pub fn total_row(rows: &[LeagueRow]) -> Option<LeagueRow> {
    let first = rows.first()?;
    let mut total = first.clone();
    total.group = "Total".to_string();
    total.season = "-".to_string();
    for row in &rows[1..] {
        let (n_a, n_b) = (total.matches, row.matches);
        let (ht_a, ht_b) = (total.half_time_matches, row.half_time_matches);
        let blend = |a: f64, b: f64| weighted(a, n_a, b, n_b);
        let blend_ht = |a: f64, b: f64| weighted(a, ht_a, b, ht_b);
        total.home_win = blend(total.home_win, row.home_win);
        total.draw = blend(total.draw, row.draw);
        total.away_win = blend(total.away_win, row.away_win);
        total.avg_goals_1h = blend_ht(total.avg_goals_1h, row.avg_goals_1h);
        total.avg_goals_2h = blend_ht(total.avg_goals_2h, row.avg_goals_2h);
        total.avg_goals_ft = blend(total.avg_goals_ft, row.avg_goals_ft);
        for (index, value) in total.over_1h.iter_mut().enumerate() {
            *value = blend_ht(*value, row.over_1h[index]);
        }
        for (index, value) in total.over_ft.iter_mut().enumerate() {
            *value = blend(*value, row.over_ft[index]);
        }
        total.btts = blend(total.btts, row.btts);
        total.matches += row.matches;
        total.half_time_matches += row.half_time_matches;
    }
    Some(total)
}

/// The league aggregates split by [PriceLabel], in label order; empty labels are omitted.
pub fn summarise_by_label(records: &[&MatchRecord]) -> Vec<LeagueRow> {
    let mut groups: FxHashMap<PriceLabel, Accumulator> = FxHashMap::default();
    for record in records {
        groups
            .entry(PriceLabel::of(record.odds.as_ref()))
            .or_default()
            .add(record);
    }
    PriceLabel::iter()
        .filter_map(|label| {
            groups
                .remove(&label)
                .map(|acc| acc.into_row(label.to_string(), "-".to_string()))
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeframes {
    pub label: PriceLabel,
    pub matches: u32,
    pub scored_goals: u32,
    pub conceded_goals: u32,
    pub scored: BandPercents,
    pub conceded: BandPercents,
}

/// Goal time-frame distribution of the matches carrying `label`. Goals are attributed from the
/// label's [perspective](PriceLabel::perspective); unlabelled perspectives count every goal in
/// both series.
pub fn label_timeframes(builder: &TimelineBuilder, records: &[&MatchRecord], label: PriceLabel) -> Timeframes {
    let mut matches = 0;
    let mut counters = BandCounters::default();
    for record in records.iter().filter(|record| PriceLabel::of(record.odds.as_ref()) == label) {
        matches += 1;
        let timeline = builder.build_for(record);
        counters += match label.perspective() {
            Some(side) => band::count(&timeline, side),
            None => {
                let home = band::count(&timeline, Side::Home);
                let mut all = home.scored;
                all += home.conceded;
                BandCounters {
                    scored: all,
                    conceded: all,
                }
            }
        };
    }
    Timeframes {
        label,
        matches,
        scored_goals: counters.scored.total(),
        conceded_goals: counters.conceded.total(),
        scored: BandPercents::from_series(&counters.scored),
        conceded: BandPercents::from_series(&counters.conceded),
    }
}

/// [label_timeframes] for every label present in `records`.
pub fn all_timeframes(builder: &TimelineBuilder, records: &[&MatchRecord]) -> Vec<Timeframes> {
    PriceLabel::iter()
        .map(|label| label_timeframes(builder, records, label))
        .filter(|timeframes| timeframes.matches > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;
    use crate::band::TimeBand;
    use crate::domain::{MinuteField, Odds, Score};

    fn record(country: &str, season: &str, full_time: Score, half_time: Score) -> MatchRecord {
        let mut record = MatchRecord::new(
            "Alpha",
            "Beta",
            full_time,
            half_time,
            MinuteField::Missing,
            MinuteField::Missing,
        );
        record.country = country.into();
        record.season = season.into();
        record
    }

    fn priced(home: f64, away: f64, full_time: Score, home_minutes: &str, away_minutes: &str) -> MatchRecord {
        let mut record = MatchRecord::new(
            "Alpha",
            "Beta",
            full_time,
            Score::nil_all(),
            MinuteField::from(home_minutes),
            MinuteField::from(away_minutes),
        );
        record.odds = Some(Odds {
            home,
            draw: Some(3.4),
            away,
        });
        record
    }

    #[test]
    fn summary_per_country_and_season() {
        let records = [
            record("ITALY", "2024", Score::new(2, 1), Score::new(1, 0)),
            record("ITALY", "2024", Score::new(0, 0), Score::new(0, 0)),
            record("ITALY", "2024", Score::new(1, 3), Score::new(1, 2)),
            record("ITALY", "2024", Score::new(1, 1), Score::new(0, 1)),
            record("", "2023", Score::new(4, 0), Score::new(2, 0)),
        ];
        let records: Vec<_> = records.iter().collect();
        let rows = summarise(&records);
        assert_eq!(2, rows.len());

        let italy = &rows[0];
        assert_eq!(("ITALY", "2024"), (italy.group.as_str(), italy.season.as_str()));
        assert_eq!(4, italy.matches);
        assert_eq!(25.0, italy.home_win);
        assert_eq!(50.0, italy.draw);
        assert_eq!(25.0, italy.away_win);
        assert_eq!(1.25, italy.avg_goals_1h);
        assert_eq!(1.0, italy.avg_goals_2h);
        assert_eq!(2.25, italy.avg_goals_ft);
        assert_eq!([75.0, 25.0, 25.0], italy.over_1h);
        assert_eq!([75.0, 75.0, 50.0, 25.0, 0.0], italy.over_ft);
        assert_eq!(75.0, italy.btts);

        let unknown = &rows[1];
        assert_eq!("Unknown", unknown.group);
        assert_eq!(100.0, unknown.home_win);
    }

    #[test]
    fn half_based_fields_skip_unknown_half_times() {
        let mut unknown = record("ITALY", "2024", Score::new(2, 0), Score::nil_all());
        unknown.half_time = None;
        let records = [unknown, record("ITALY", "2024", Score::new(3, 1), Score::new(1, 0))];
        let records: Vec<_> = records.iter().collect();
        let rows = summarise(&records);
        let italy = &rows[0];
        assert_eq!(2, italy.matches);
        assert_eq!(1, italy.half_time_matches);
        assert_eq!(1.0, italy.avg_goals_1h);
        assert_eq!(3.0, italy.avg_goals_2h);
        assert_eq!(3.0, italy.avg_goals_ft);
        assert_eq!([100.0, 0.0, 0.0], italy.over_1h);
        assert_eq!([100.0, 100.0, 50.0, 50.0, 0.0], italy.over_ft);
    }

    #[test]
    fn total_is_match_weighted() {
        let records = [
            record("ITALY", "2024", Score::new(1, 0), Score::nil_all()),
            record("ITALY", "2024", Score::new(1, 0), Score::nil_all()),
            record("ITALY", "2024", Score::new(0, 1), Score::nil_all()),
            record("SPAIN", "2024", Score::new(0, 0), Score::nil_all()),
        ];
        let records: Vec<_> = records.iter().collect();
        let rows = summarise(&records);
        let total = total_row(&rows).unwrap();
        assert_eq!("Total", total.group);
        assert_eq!(4, total.matches);
        assert_float_absolute_eq!(50.0, total.home_win, 0.01);
        assert_float_absolute_eq!(25.0, total.draw, 0.01);
        assert_float_absolute_eq!(25.0, total.away_win, 0.01);
        assert_float_absolute_eq!(0.75, total.avg_goals_ft, 0.01);

        assert_eq!(None, total_row(&[]));
    }

    #[test]
    fn summary_by_label() {
        let records = [
            priced(1.3, 9.0, Score::new(2, 0), "", ""),
            priced(1.4, 8.0, Score::new(1, 1), "", ""),
            priced(6.0, 1.6, Score::new(0, 1), "", ""),
        ];
        let records: Vec<_> = records.iter().collect();
        let rows = summarise_by_label(&records);
        assert_eq!(2, rows.len());
        assert_eq!("H_StrongFav <1.5", rows[0].group);
        assert_eq!(2, rows[0].matches);
        assert_eq!("A_MediumFav 1.5-2", rows[1].group);
        assert_eq!(100.0, rows[1].away_win);
    }

    #[test]
    fn timeframes_follow_label_perspective() {
        let records = [
            priced(1.3, 9.0, Score::new(2, 1), "10;50", "80"),
            priced(6.0, 1.6, Score::new(1, 2), "5", "20;35"),
            priced(3.5, 3.5, Score::new(1, 1), "12", "70"),
        ];
        let records: Vec<_> = records.iter().collect();
        let builder = TimelineBuilder::default();

        let home_fav = label_timeframes(&builder, &records, PriceLabel::HomeStrongFav);
        assert_eq!(1, home_fav.matches);
        assert_eq!(2, home_fav.scored_goals);
        assert_eq!(50.0, home_fav.scored[TimeBand::Band0To15]);
        assert_eq!(100.0, home_fav.conceded[TimeBand::Band76To90]);

        let away_fav = label_timeframes(&builder, &records, PriceLabel::AwayMediumFav);
        assert_eq!(2, away_fav.scored_goals);
        assert_eq!(50.0, away_fav.scored[TimeBand::Band16To30]);
        assert_eq!(100.0, away_fav.conceded[TimeBand::Band0To15]);

        let others = label_timeframes(&builder, &records, PriceLabel::Others);
        assert_eq!(2, others.scored_goals);
        assert_eq!(2, others.conceded_goals);
        assert_eq!(others.scored, others.conceded);

        assert_eq!(3, all_timeframes(&builder, &records).len());
    }
}
