//! Reconstruction of the ordered goal sequence of a single match.
//!
//! The two sides' minute lists are tagged, concatenated and stably sorted by minute. When no
//! minute data is available but the final score shows goals, a sentinel timeline is
//! synthesised instead: every home goal at the home sentinel minute, followed by every away
//! goal at the away sentinel minute. Such timelines preserve the goal count but not the true
//! chronology, and are flagged as [Fidelity::Synthesized].

use std::fmt::{Display, Formatter};

use thiserror::Error;
use tracing::debug;

use crate::domain::{MatchRecord, Score, Side};
use crate::minutes;

pub const HOME_SENTINEL_MINUTE: u16 = 90;
pub const AWAY_SENTINEL_MINUTE: u16 = 91;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("home and away sentinel minutes must differ (both are {0})")]
    CoincidentSentinels(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home_sentinel_minute: u16,
    pub away_sentinel_minute: u16,
}
impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home_sentinel_minute == self.away_sentinel_minute {
            return Err(ConfigError::CoincidentSentinels(self.home_sentinel_minute));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_sentinel_minute: HOME_SENTINEL_MINUTE,
            away_sentinel_minute: AWAY_SENTINEL_MINUTE,
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GoalEvent {
    pub side: Side,
    pub minute: u16,
}
impl GoalEvent {
    pub fn new(side: Side, minute: u16) -> Self {
        Self { side, minute }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Fidelity {
    /// Built from recorded minutes that agree with the final score (or a goalless match).
    Recorded,
    /// Built from recorded minutes whose count disagrees with the final score.
    Partial,
    /// No minute data; events sit at the sentinel minutes.
    Synthesized,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline {
    events: Vec<GoalEvent>,
    fidelity: Fidelity,
}
impl Timeline {
    pub fn empty() -> Self {
        Self {
            events: vec![],
            fidelity: Fidelity::Recorded,
        }
    }

    pub fn events(&self) -> &[GoalEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn fidelity(&self) -> Fidelity {
        self.fidelity
    }

    pub fn is_synthesized(&self) -> bool {
        self.fidelity == Fidelity::Synthesized
    }

    pub fn first(&self) -> Option<&GoalEvent> {
        self.events.first()
    }

    pub fn last(&self) -> Option<&GoalEvent> {
        self.events.last()
    }
}

impl Display for Timeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, event) in self.events.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            let tag = match event.side {
                Side::Home => 'H',
                Side::Away => 'A',
            };
            write!(f, "{tag}{}'", event.minute)?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    config: Config,
}
impl TimelineBuilder {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn build(&self, home_minutes: &[u16], away_minutes: &[u16], full_time: &Score) -> Timeline {
        let mut events = Vec::with_capacity(home_minutes.len() + away_minutes.len());
        events.extend(home_minutes.iter().map(|&minute| GoalEvent::new(Side::Home, minute)));
        events.extend(away_minutes.iter().map(|&minute| GoalEvent::new(Side::Away, minute)));

        if events.is_empty() {
            if full_time.is_nil_all() {
                return Timeline::empty();
            }
            return self.synthesize(full_time);
        }

        // stable, so simultaneous goals keep their input order
        events.sort_by_key(|event| event.minute);
        let fidelity = if events.len() == full_time.total() as usize {
            Fidelity::Recorded
        } else {
            debug!(
                "{} recorded goal minutes disagree with the final score {}-{}",
                events.len(),
                full_time.home,
                full_time.away
            );
            Fidelity::Partial
        };
        Timeline { events, fidelity }
    }

    pub fn build_for(&self, record: &MatchRecord) -> Timeline {
        let home_minutes = minutes::parse(&record.home_minutes);
        let away_minutes = minutes::parse(&record.away_minutes);
        let timeline = self.build(&home_minutes, &away_minutes, &record.full_time);
        if timeline.is_synthesized() {
            debug!("synthesised timeline for {}: {timeline}", record.id);
        }
        timeline
    }

    fn synthesize(&self, full_time: &Score) -> Timeline {
        let mut events = Vec::with_capacity(full_time.total() as usize);
        events.extend(
            (0..full_time.home).map(|_| GoalEvent::new(Side::Home, self.config.home_sentinel_minute)),
        );
        events.extend(
            (0..full_time.away).map(|_| GoalEvent::new(Side::Away, self.config.away_sentinel_minute)),
        );
        Timeline {
            events,
            fidelity: Fidelity::Synthesized,
        }
    }
}

impl TryFrom<Config> for TimelineBuilder {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self { config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MinuteField;

    fn builder() -> TimelineBuilder {
        TimelineBuilder::default()
    }

    #[test]
    fn merges_and_sorts() {
        let timeline = builder().build(&[50, 10], &[30], &Score::new(2, 1));
        assert_eq!(
            &[
                GoalEvent::new(Side::Home, 10),
                GoalEvent::new(Side::Away, 30),
                GoalEvent::new(Side::Home, 50)
            ],
            timeline.events()
        );
        assert_eq!(Fidelity::Recorded, timeline.fidelity());
        assert_eq!(3, timeline.len());
    }

    #[test]
    fn simultaneous_goals_keep_input_order() {
        let timeline = builder().build(&[45], &[45], &Score::new(1, 1));
        assert_eq!(
            &[GoalEvent::new(Side::Home, 45), GoalEvent::new(Side::Away, 45)],
            timeline.events()
        );
    }

    #[test]
    fn synthesizes_when_minutes_missing() {
        let timeline = builder().build(&[], &[], &Score::new(2, 1));
        assert!(timeline.is_synthesized());
        assert_eq!(
            &[
                GoalEvent::new(Side::Home, HOME_SENTINEL_MINUTE),
                GoalEvent::new(Side::Home, HOME_SENTINEL_MINUTE),
                GoalEvent::new(Side::Away, AWAY_SENTINEL_MINUTE)
            ],
            timeline.events()
        );
    }

    #[test]
    fn goalless_match_is_empty() {
        let timeline = builder().build(&[], &[], &Score::nil_all());
        assert!(timeline.is_empty());
        assert_eq!(Fidelity::Recorded, timeline.fidelity());
    }

    #[test]
    fn partial_minutes_are_kept_and_flagged() {
        let timeline = builder().build(&[12], &[], &Score::new(2, 1));
        assert_eq!(&[GoalEvent::new(Side::Home, 12)], timeline.events());
        assert_eq!(Fidelity::Partial, timeline.fidelity());
    }

    #[test]
    fn build_for_record() {
        let record = MatchRecord::new(
            "A",
            "B",
            Score::new(1, 1),
            Score::new(1, 0),
            MinuteField::from("5"),
            MinuteField::from("80;"),
        );
        let timeline = builder().build_for(&record);
        assert_eq!("[H5', A80']", timeline.to_string());
    }

    #[test]
    fn custom_sentinels() {
        let builder = TimelineBuilder::try_from(Config {
            home_sentinel_minute: 95,
            away_sentinel_minute: 96,
        })
        .unwrap();
        let timeline = builder.build(&[], &[], &Score::new(0, 1));
        assert_eq!(&[GoalEvent::new(Side::Away, 96)], timeline.events());
    }

    #[test]
    fn coincident_sentinels_rejected() {
        let err = TimelineBuilder::try_from(Config {
            home_sentinel_minute: 90,
            away_sentinel_minute: 90,
        })
        .unwrap_err();
        assert_eq!(ConfigError::CoincidentSentinels(90), err);
        assert_eq!("home and away sentinel minutes must differ (both are 90)", err.to_string());
    }
}
