//! Match-count-weighted combination of a team's Home and Away rows into a single row.
//!
//! Result splits are blended in the observed team's perspective: a split reported the way a
//! fixture list reports it (home win/draw/away win) must first go through
//! [FixtureSplit::to_team_perspective](crate::stats::FixtureSplit::to_team_perspective).
//! First/last-goal rates do not blend and are dropped from the combined row.

use strum::IntoEnumIterator;

use crate::band::TimeBand;
use crate::pattern::Pattern;
use crate::stats::{round2, BandPercents, PatternPercents, ResultSplit, StatisticRow, Venue};

/// `(a·n_a + b·n_b) / (n_a + n_b)`, or `0` when both counts are zero.
pub fn weighted(a: f64, n_a: u32, b: f64, n_b: u32) -> f64 {
    let total = n_a + n_b;
    if total == 0 {
        0.0
    } else {
        round2((a * n_a as f64 + b * n_b as f64) / total as f64)
    }
}

fn blend_results(home: &ResultSplit, n_home: u32, away: &ResultSplit, n_away: u32) -> ResultSplit {
    ResultSplit {
        win: weighted(home.win, n_home, away.win, n_away),
        draw: weighted(home.draw, n_home, away.draw, n_away),
        loss: weighted(home.loss, n_home, away.loss, n_away),
    }
}

fn blend_bands(home: &BandPercents, n_home: u32, away: &BandPercents, n_away: u32) -> BandPercents {
    let mut blended = BandPercents::default();
    for band in TimeBand::iter() {
        blended[band] = weighted(home[band], n_home, away[band], n_away);
    }
    blended
}

pub fn blend(home: &StatisticRow, away: &StatisticRow) -> StatisticRow {
    let (n_home, n_away) = (home.matches, away.matches);
    let (ht_home, ht_away) = (home.half_time_matches, away.half_time_matches);
    let mut patterns = PatternPercents::default();
    for pattern in Pattern::iter().filter(Pattern::is_blendable) {
        if let (Some(value), Some(home_value), Some(away_value)) = (
            patterns.get_mut(pattern),
            home.patterns.get(pattern),
            away.patterns.get(pattern),
        ) {
            *value = weighted(home_value, n_home, away_value, n_away);
        }
    }

    StatisticRow {
        venue: Venue::Blended,
        matches: n_home + n_away,
        results: blend_results(&home.results, n_home, &away.results, n_away),
        half_time_matches: ht_home + ht_away,
        first_half: blend_results(&home.first_half, ht_home, &away.first_half, ht_away),
        second_half: blend_results(&home.second_half, ht_home, &away.second_half, ht_away),
        first_goal: None,
        last_goal: None,
        patterns,
        scored_bands: blend_bands(&home.scored_bands, n_home, &away.scored_bands, n_away),
        conceded_bands: blend_bands(&home.conceded_bands, n_home, &away.conceded_bands, n_away),
        avg_goals_scored: weighted(home.avg_goals_scored, n_home, away.avg_goals_scored, n_away),
        avg_goals_conceded: weighted(
            home.avg_goals_conceded,
            n_home,
            away.avg_goals_conceded,
            n_away,
        ),
        btts: weighted(home.btts, n_home, away.btts, n_away),
        synthesized_matches: home.synthesized_matches + away.synthesized_matches,
    }
}
