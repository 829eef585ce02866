/// Reading-plan extraction module
///
/// Turns playlist dump lines into structured reading-plan records and
/// renders the copy-paste snippets used to update the application seed data.

pub mod parser;
pub mod seed;

// Re-export main types
pub use parser::PlanParser;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One whole-chapter reading within a day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    /// Book name, one or two words
    pub book: String,
    /// Chapter number
    pub chapter: u32,
    /// Always 1: readings cover whole chapters
    pub verse_start: u32,
    /// Never populated: readings cover whole chapters
    pub verse_end: Option<u32>,
    /// Note referencing the day's full passage description
    pub note: String,
}

/// A reading-plan day with its expanded passages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingDay {
    /// Day ordinal within the year-long plan
    pub day: u32,
    /// Display title, e.g. "Day 31: Exodus 4-6"
    pub title: String,
    /// Per-chapter passages in reading order
    pub passages: Vec<Passage>,
}

/// Raw per-day record as extracted from the playlist dump
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayRecord {
    /// YouTube video identifier for the day
    pub video_id: String,
    /// Free-text passage description, e.g. "Numbers 14-15, Psalm 90"
    pub passages_str: String,
    /// Display title, e.g. "Day 31: Numbers 14-15, Psalm 90"
    pub title: String,
}

/// Parsed plan output: day -> video id plus raw per-day metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlanData {
    pub video_ids: BTreeMap<u32, String>,
    pub days: BTreeMap<u32, DayRecord>,
}
