//! Scoreline-transition patterns, detected by replaying a [Timeline] from the observed team's
//! perspective, together with the half-based results that come straight off the score columns.
//!
//! Each pattern is detected at most once per match. The conditional patterns (e.g. a 1-0 lead
//! that later becomes 1-1) carry a [prerequisite](Pattern::prerequisite), whose count serves as
//! their denominator when converted into a rate.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Index};

use ordinalizer::Ordinal;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter};

use crate::domain::{MatchRecord, MatchResult, Score, Side};
use crate::timeline::Timeline;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Ordinal, EnumCount, EnumIter)]
pub enum Pattern {
    FirstGoal,
    LastGoal,
    Lead1_0,
    Lead1_0Then1_1,
    Lead1_0Then2_0,
    Trail0_1,
    Trail0_1Then1_1,
    Trail0_1Then0_2,
    Swing2Plus,
    CleanSheet0_0,
}
impl Pattern {
    pub fn prerequisite(&self) -> Option<Pattern> {
        match self {
            Pattern::Lead1_0Then1_1 | Pattern::Lead1_0Then2_0 => Some(Pattern::Lead1_0),
            Pattern::Trail0_1Then1_1 | Pattern::Trail0_1Then0_2 => Some(Pattern::Trail0_1),
            _ => None,
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.prerequisite().is_some()
    }

    /// First/last goal have no meaningful combination across venues.
    pub fn is_blendable(&self) -> bool {
        !matches!(self, Pattern::FirstGoal | Pattern::LastGoal)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pattern::FirstGoal => "First Goal %",
            Pattern::LastGoal => "Last Goal %",
            Pattern::Lead1_0 => "1-0 %",
            Pattern::Lead1_0Then1_1 => "1-1 after 1-0 %",
            Pattern::Lead1_0Then2_0 => "2-0 after 1-0 %",
            Pattern::Trail0_1 => "0-1 %",
            Pattern::Trail0_1Then1_1 => "1-1 after 0-1 %",
            Pattern::Trail0_1Then0_2 => "0-2 after 0-1 %",
            Pattern::Swing2Plus => "2+ Goals %",
            Pattern::CleanSheet0_0 => "0-0 %",
        }
    }
}

/// Patterns detected in a single match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatternSet([bool; Pattern::COUNT]);
impl PatternSet {
    pub fn insert(&mut self, pattern: Pattern) {
        self.0[pattern.ordinal()] = true;
    }

    pub fn contains(&self, pattern: Pattern) -> bool {
        self.0[pattern.ordinal()]
    }

    pub fn iter(&self) -> impl Iterator<Item = Pattern> + '_ {
        Pattern::iter().filter(|pattern| self.contains(*pattern))
    }
}

pub fn classify(timeline: &Timeline, observed: Side, full_time: &Score) -> PatternSet {
    let mut set = PatternSet::default();
    if timeline.first().is_some_and(|event| event.side == observed) {
        set.insert(Pattern::FirstGoal);
    }
    if timeline.last().is_some_and(|event| event.side == observed) {
        set.insert(Pattern::LastGoal);
    }

    let (mut team, mut opponent) = (0u32, 0u32);
    for event in timeline.events() {
        if event.side == observed {
            team = team.saturating_add(1);
        } else {
            opponent = opponent.saturating_add(1);
        }
        match (team, opponent) {
            (1, 0) => set.insert(Pattern::Lead1_0),
            (0, 1) => set.insert(Pattern::Trail0_1),
            (1, 1) => {
                if set.contains(Pattern::Lead1_0) {
                    set.insert(Pattern::Lead1_0Then1_1);
                }
                if set.contains(Pattern::Trail0_1) {
                    set.insert(Pattern::Trail0_1Then1_1);
                }
            }
            (2, 0) if set.contains(Pattern::Lead1_0) => set.insert(Pattern::Lead1_0Then2_0),
            (0, 2) if set.contains(Pattern::Trail0_1) => set.insert(Pattern::Trail0_1Then0_2),
            _ => {}
        }
    }

    // derived from the final score, so sentinel timelines cannot disagree
    if full_time.margin() >= 2 {
        set.insert(Pattern::Swing2Plus);
    }
    if full_time.is_nil_all() {
        set.insert(Pattern::CleanSheet0_0);
    }
    set
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatternCounters([u32; Pattern::COUNT]);
impl PatternCounters {
    pub fn increment(&mut self, pattern: Pattern) {
        self.0[pattern.ordinal()] += 1;
    }

    /// The count a pattern's rate is relative to: the prerequisite's count for conditional
    /// patterns, otherwise the number of matches.
    pub fn denominator(&self, pattern: Pattern, matches: u32) -> u32 {
        match pattern.prerequisite() {
            Some(prerequisite) => self[prerequisite],
            None => matches,
        }
    }
}

impl From<&PatternSet> for PatternCounters {
    fn from(set: &PatternSet) -> Self {
        let mut counters = PatternCounters::default();
        for pattern in set.iter() {
            counters.increment(pattern);
        }
        counters
    }
}

impl Index<Pattern> for PatternCounters {
    type Output = u32;

    fn index(&self, pattern: Pattern) -> &Self::Output {
        &self.0[pattern.ordinal()]
    }
}

impl AddAssign for PatternCounters {
    fn add_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

impl Add for PatternCounters {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl Sum for PatternCounters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Win/draw/loss counts from the observed team's perspective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResultCounters([u32; MatchResult::COUNT]);
impl ResultCounters {
    pub fn single(result: MatchResult) -> Self {
        let mut counters = Self::default();
        counters.0[result.ordinal()] = 1;
        counters
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Index<MatchResult> for ResultCounters {
    type Output = u32;

    fn index(&self, result: MatchResult) -> &Self::Output {
        &self.0[result.ordinal()]
    }
}

impl AddAssign for ResultCounters {
    fn add_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

impl Add for ResultCounters {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfResults {
    pub full_time: MatchResult,
    /// `None` for both halves when the half-time score is unknown.
    pub first_half: Option<MatchResult>,
    pub second_half: Option<MatchResult>,
}

/// Needs no goal-level data; half-time columns that exceed the full-time ones are used as given.
pub fn classify_halves(record: &MatchRecord, observed: Side) -> HalfResults {
    HalfResults {
        full_time: record.full_time.result_for(observed),
        first_half: record.first_half_result_for(observed),
        second_half: record.second_half_result_for(observed),
    }
}
