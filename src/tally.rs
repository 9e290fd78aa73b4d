//! Raw counts over a venue-subset of matches.
//!
//! Every match contributes an independent [Tally]; tallies combine by plain addition, so a set
//! of matches may be reduced in any order and across any number of threads.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rayon::prelude::*;

use crate::band;
use crate::band::BandCounters;
use crate::domain::{MatchRecord, Side};
use crate::pattern;
use crate::pattern::{PatternCounters, ResultCounters};
use crate::timeline::{Fidelity, TimelineBuilder};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub matches: u32,
    pub synthesized: u32,
    pub partial: u32,
    /// Matches with a known half-time score; the denominator of the half results.
    pub with_half_time: u32,
    pub full_time: ResultCounters,
    pub first_half: ResultCounters,
    pub second_half: ResultCounters,
    pub patterns: PatternCounters,
    pub bands: BandCounters,
    pub goals_for: u32,
    pub goals_against: u32,
    pub both_scored: u32,
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.matches += rhs.matches;
        self.synthesized += rhs.synthesized;
        self.partial += rhs.partial;
        self.with_half_time += rhs.with_half_time;
        self.full_time += rhs.full_time;
        self.first_half += rhs.first_half;
        self.second_half += rhs.second_half;
        self.patterns += rhs.patterns;
        self.bands += rhs.bands;
        self.goals_for += rhs.goals_for;
        self.goals_against += rhs.goals_against;
        self.both_scored += rhs.both_scored;
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// The contribution of a single match, seen from the `observed` side.
pub fn tally_match(builder: &TimelineBuilder, record: &MatchRecord, observed: Side) -> Tally {
    let timeline = builder.build_for(record);
    let halves = pattern::classify_halves(record, observed);
    let patterns = pattern::classify(&timeline, observed, &record.full_time);
    Tally {
        matches: 1,
        synthesized: u32::from(timeline.fidelity() == Fidelity::Synthesized),
        partial: u32::from(timeline.fidelity() == Fidelity::Partial),
        with_half_time: u32::from(record.half_time.is_some()),
        full_time: ResultCounters::single(halves.full_time),
        first_half: halves.first_half.map(ResultCounters::single).unwrap_or_default(),
        second_half: halves.second_half.map(ResultCounters::single).unwrap_or_default(),
        patterns: PatternCounters::from(&patterns),
        bands: band::count(&timeline, observed),
        goals_for: record.full_time.for_side(observed) as u32,
        goals_against: record.full_time.against(observed) as u32,
        both_scored: u32::from(record.both_teams_scored()),
    }
}

pub fn tally(builder: &TimelineBuilder, records: &[&MatchRecord], observed: Side) -> Tally {
    records
        .par_iter()
        .map(|record| tally_match(builder, record, observed))
        .reduce(Tally::default, Add::add)
}

pub fn tally_seq(builder: &TimelineBuilder, records: &[&MatchRecord], observed: Side) -> Tally {
    records
        .iter()
        .map(|record| tally_match(builder, record, observed))
        .sum()
}
