//! Goal-event timelines and scoring-pattern statistics for football matches.
//! Reconstructs the ordered goal sequence of each match from per-team minute lists (falling
//! back to the final score when the minutes are missing), classifies the scoring patterns it
//! contains and aggregates them into per-team Home/Away/Blended rows and league summaries.

pub mod band;
pub mod blend;
pub mod data;
pub mod domain;
pub mod file;
pub mod label;
pub mod league;
pub mod minutes;
pub mod pattern;
pub mod print;
pub mod stats;
pub mod tally;
pub mod team;
pub mod timeline;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
