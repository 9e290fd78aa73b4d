//! Fifteen-minute time bands. Stoppage and extra time fall into the last band.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Index, RangeInclusive};

use ordinalizer::Ordinal;
use strum::EnumCount;
use strum_macros::{EnumCount, EnumIter};

use crate::domain::Side;
use crate::timeline::Timeline;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Ordinal, EnumCount, EnumIter)]
pub enum TimeBand {
    Band0To15,
    Band16To30,
    Band31To45,
    Band46To60,
    Band61To75,
    Band76To90,
}
impl TimeBand {
    pub fn of(minute: u16) -> TimeBand {
        match minute {
            0..=15 => TimeBand::Band0To15,
            16..=30 => TimeBand::Band16To30,
            31..=45 => TimeBand::Band31To45,
            46..=60 => TimeBand::Band46To60,
            61..=75 => TimeBand::Band61To75,
            _ => TimeBand::Band76To90,
        }
    }

    /// Nominal bounds; the last band is open-ended in practice.
    pub fn minutes(&self) -> RangeInclusive<u16> {
        match self {
            TimeBand::Band0To15 => 0..=15,
            TimeBand::Band16To30 => 16..=30,
            TimeBand::Band31To45 => 31..=45,
            TimeBand::Band46To60 => 46..=60,
            TimeBand::Band61To75 => 61..=75,
            TimeBand::Band76To90 => 76..=90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeBand::Band0To15 => "0-15",
            TimeBand::Band16To30 => "16-30",
            TimeBand::Band31To45 => "31-45",
            TimeBand::Band46To60 => "46-60",
            TimeBand::Band61To75 => "61-75",
            TimeBand::Band76To90 => "76-90",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BandSeries([u32; TimeBand::COUNT]);
impl BandSeries {
    pub fn increment(&mut self, band: TimeBand) {
        self.0[band.ordinal()] += 1;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Index<TimeBand> for BandSeries {
    type Output = u32;

    fn index(&self, band: TimeBand) -> &Self::Output {
        &self.0[band.ordinal()]
    }
}

impl AddAssign for BandSeries {
    fn add_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BandCounters {
    pub scored: BandSeries,
    pub conceded: BandSeries,
}
impl BandCounters {
    pub fn record(&mut self, minute: u16, scored: bool) {
        let band = TimeBand::of(minute);
        if scored {
            self.scored.increment(band);
        } else {
            self.conceded.increment(band);
        }
    }
}

impl AddAssign for BandCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.scored += rhs.scored;
        self.conceded += rhs.conceded;
    }
}

impl Add for BandCounters {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl Sum for BandCounters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

pub fn count(timeline: &Timeline, observed: Side) -> BandCounters {
    let mut counters = BandCounters::default();
    for event in timeline.events() {
        counters.record(event.minute, event.side == observed);
    }
    counters
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::domain::Score;
    use crate::timeline::TimelineBuilder;

    #[test]
    fn band_of_minute() {
        assert_eq!(TimeBand::Band0To15, TimeBand::of(0));
        assert_eq!(TimeBand::Band0To15, TimeBand::of(15));
        assert_eq!(TimeBand::Band16To30, TimeBand::of(16));
        assert_eq!(TimeBand::Band31To45, TimeBand::of(45));
        assert_eq!(TimeBand::Band46To60, TimeBand::of(46));
        assert_eq!(TimeBand::Band61To75, TimeBand::of(75));
        assert_eq!(TimeBand::Band76To90, TimeBand::of(76));
        assert_eq!(TimeBand::Band76To90, TimeBand::of(90));
        assert_eq!(TimeBand::Band76To90, TimeBand::of(94));
        assert_eq!(TimeBand::Band76To90, TimeBand::of(120));
    }

    #[test]
    fn bands_cover_nominal_minutes() {
        for band in TimeBand::iter() {
            for minute in band.minutes() {
                assert_eq!(band, TimeBand::of(minute));
            }
        }
    }

    #[test]
    fn scored_and_conceded() {
        let timeline = TimelineBuilder::default().build(&[10, 44, 90], &[46, 91], &Score::new(3, 2));
        let home = count(&timeline, Side::Home);
        assert_eq!(&[1, 0, 1, 0, 0, 1], home.scored.as_slice());
        assert_eq!(&[0, 0, 0, 1, 0, 1], home.conceded.as_slice());
        assert_eq!(3, home.scored.total());

        let away = count(&timeline, Side::Away);
        assert_eq!(home.scored, away.conceded);
        assert_eq!(home.conceded, away.scored);
    }

    #[test]
    fn sentinel_goals_land_in_last_band() {
        let timeline = TimelineBuilder::default().build(&[], &[], &Score::new(2, 1));
        let counters = count(&timeline, Side::Home);
        assert_eq!(2, counters.scored[TimeBand::Band76To90]);
        assert_eq!(1, counters.conceded[TimeBand::Band76To90]);
    }

    #[test]
    fn sum_of_counters() {
        let builder = TimelineBuilder::default();
        let total: BandCounters = [
            count(&builder.build(&[5], &[], &Score::new(1, 0)), Side::Home),
            count(&builder.build(&[], &[20], &Score::new(0, 1)), Side::Home),
            count(&builder.build(&[7], &[], &Score::new(1, 0)), Side::Home),
        ]
        .into_iter()
        .sum();
        assert_eq!(2, total.scored[TimeBand::Band0To15]);
        assert_eq!(1, total.conceded[TimeBand::Band16To30]);
    }
}
