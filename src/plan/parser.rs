use regex::Regex;
use tracing::debug;

use super::{DayRecord, Passage, PlanData, ReadingDay};
use crate::config::PlanConfig;

/// Parses playlist dump lines of the form
/// `037:MWXH-0z3Cbw:Day 031 (Exodus 4-6)` into reading-plan records.
///
/// Lines that do not match the record pattern are skipped, as are passage
/// clauses that do not match the book/chapter pattern. Days outside the
/// configured window are dropped.
pub struct PlanParser {
    day_start: u32,
    day_end: u32,
    line_re: Regex,
    clause_re: Regex,
}

impl PlanParser {
    pub fn new(config: &PlanConfig) -> Self {
        Self {
            day_start: config.day_start,
            day_end: config.day_end,
            // Record pattern: <index>:<videoId>:Day <N> (<passages>)
            line_re: Regex::new(r"^(\d+):([^:]+):Day (\d+) \(([^)]+)\)").unwrap(),
            // Clause pattern: book of one or two words, then a chapter or
            // chapter range ("Exodus 4-6", "Psalm 90", "1 Samuel 13-14")
            clause_re: Regex::new(r"^(\w+\s?\w*)\s+(\d+)(?:-(\d+))?").unwrap(),
        }
    }

    /// Parse a whole dump, keeping only days inside the configured window.
    /// Later lines for the same day overwrite earlier ones.
    pub fn parse_dump(&self, content: &str) -> PlanData {
        let mut data = PlanData::default();

        for line in content.lines() {
            if let Some((day, record)) = self.parse_line(line) {
                data.video_ids.insert(day, record.video_id.clone());
                data.days.insert(day, record);
            }
        }

        data
    }

    /// Parse a single dump line. Returns None for non-matching lines and
    /// for days outside the window.
    pub fn parse_line(&self, line: &str) -> Option<(u32, DayRecord)> {
        let captures = self.line_re.captures(line)?;

        let video_id = captures.get(2)?.as_str().to_string();
        let day: u32 = captures.get(3)?.as_str().parse().ok()?;
        let passages_str = captures.get(4)?.as_str().to_string();

        if day < self.day_start || day > self.day_end {
            debug!("Skipping day {} outside window {}-{}", day, self.day_start, self.day_end);
            return None;
        }

        Some((
            day,
            DayRecord {
                title: format!("Day {}: {}", day, passages_str),
                video_id,
                passages_str,
            },
        ))
    }

    /// Expand a comma-separated passage description into one entry per
    /// chapter. Clauses that do not match the pattern are dropped.
    pub fn parse_passages(&self, day: u32, passages_str: &str) -> Vec<Passage> {
        let mut passages = Vec::new();

        for clause in passages_str.split(',') {
            let clause = clause.trim();

            let captures = match self.clause_re.captures(clause) {
                Some(captures) => captures,
                None => continue,
            };

            let book = match captures.get(1) {
                Some(book) => book.as_str().trim().to_string(),
                None => continue,
            };
            let start: u32 = match captures.get(2).and_then(|m| m.as_str().parse().ok()) {
                Some(start) => start,
                None => continue,
            };
            let end: u32 = captures
                .get(3)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(start);

            for chapter in start..=end {
                passages.push(Passage {
                    book: book.clone(),
                    chapter,
                    verse_start: 1,
                    verse_end: None,
                    note: format!("Day {} reading from {}", day, passages_str),
                });
            }
        }

        passages
    }

    /// Structured view of a parsed day, ready for snippet rendering.
    pub fn reading_day(&self, day: u32, record: &DayRecord) -> ReadingDay {
        ReadingDay {
            day,
            title: record.title.clone(),
            passages: self.parse_passages(day, &record.passages_str),
        }
    }

    pub fn day_start(&self) -> u32 {
        self.day_start
    }

    pub fn day_end(&self) -> u32 {
        self.day_end
    }
}
