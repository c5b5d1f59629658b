//! Completed-match record, newest first

use serde::{Deserialize, Serialize};

use crate::game::Match;

/// Ordered record of completed matches. New entries go to the front;
/// nothing is ever removed. Serializes as a bare JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchHistory {
    matches: Vec<Match>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive a completed match at the front of the record.
    pub fn record(&mut self, m: Match) {
        self.matches.insert(0, m);
    }

    /// Most recently completed match
    pub fn latest(&self) -> Option<&Match> {
        self.matches.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
