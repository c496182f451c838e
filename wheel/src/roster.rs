//! Participant list normalization.
//!
//! Raw text from the editor or an imported file is split into lines, trimmed,
//! stripped of blanks, and capped at [`MAX_ENTRIES`]. Order is preserved and
//! duplicates are allowed unless [`Roster::dedupe`] is called.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PARTICIPANTS, MAX_ENTRIES, MIN_SPIN_SEGMENTS, PLACEHOLDER_SEGMENTS};
use crate::error::WheelError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<String>,
}

/// A roster plus how many entries the size cap discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoster {
    pub roster: Roster,
    pub dropped: usize,
}

impl Roster {
    /// The stock eight-name list.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self { entries: DEFAULT_PARTICIPANTS.iter().map(|s| (*s).to_owned()).collect() }
    }

    /// One entry per non-blank line of `text`.
    #[must_use]
    pub fn parse(text: &str) -> ParsedRoster {
        Self::from_entries(text.lines())
    }

    /// Normalize already-split entries.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> ParsedRoster
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = Vec::new();
        let mut dropped = 0;
        for entry in entries {
            let trimmed = entry.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if kept.len() < MAX_ENTRIES {
                kept.push(trimmed.to_owned());
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("roster capped at {MAX_ENTRIES} entries, dropped {dropped}");
        }
        ParsedRoster { roster: Self { entries: kept }, dropped }
    }

    /// Parse a JSON array of strings.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::InvalidEntries`] if `raw` is not a JSON string array.
    pub fn from_json(raw: &str) -> Result<ParsedRoster, WheelError> {
        let entries =
            serde_json::from_str::<Vec<String>>(raw).map_err(|err| WheelError::InvalidEntries(err.to_string()))?;
        Ok(Self::from_entries(entries))
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether there are enough entries to spin.
    #[must_use]
    pub fn can_spin(&self) -> bool {
        self.entries.len() >= MIN_SPIN_SEGMENTS
    }

    /// Drop repeated entries, keeping each first occurrence in place.
    pub fn dedupe(&mut self) -> usize {
        let before = self.entries.len();
        let mut seen = HashSet::new();
        self.entries.retain(|entry| seen.insert(entry.clone()));
        before - self.entries.len()
    }

    /// Remove every entry equal to `winner`.
    pub fn remove_winner(&mut self, winner: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != winner);
        before - self.entries.len()
    }

    /// Entries to draw on the wheel; the placeholder pair when empty.
    #[must_use]
    pub fn display_segments(&self) -> Vec<String> {
        if self.entries.is_empty() {
            PLACEHOLDER_SEGMENTS.iter().map(|s| (*s).to_owned()).collect()
        } else {
            self.entries.clone()
        }
    }

    /// Newline-joined export form.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.entries.join("\n")
    }
}
