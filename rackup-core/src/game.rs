//! Match state and score transitions

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Fallback display name for the first player
pub const DEFAULT_PLAYER1_NAME: &str = "Player 1";

/// Fallback display name for the second player
pub const DEFAULT_PLAYER2_NAME: &str = "Player 2";

/// Default race target when none is given
pub const DEFAULT_RACE_TO: u32 = 7;

/// Race targets offered by the standard match form
pub const RACE_TO_CHOICES: [u32; 11] = [3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15];

// ============================================================================
// CORE TYPES
// ============================================================================

/// One side of the scoreboard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub score: u32,
}

impl Player {
    fn new(name: &str, fallback: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: displayable_name(name, fallback),
            score: 0,
        }
    }
}

/// Outcome of a score mutation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreChange {
    /// Unrecognized player id, or decrement at zero
    Ignored,
    /// Score changed, match still undecided
    Applied,
    /// Score changed and the player reached the race target
    WonBy(Uuid),
}

impl ScoreChange {
    /// Whether the mutation changed any score
    pub fn applied(self) -> bool {
        !matches!(self, ScoreChange::Ignored)
    }
}

// ============================================================================
// MATCH STATE
// ============================================================================

/// A single "race to N" match between two players
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,

    /// Creation time, epoch milliseconds
    pub timestamp: i64,

    pub player1: Player,
    pub player2: Player,

    /// First player to reach this score wins
    pub race_to: u32,

    /// Winning player's id, absent while undecided
    pub winner: Option<Uuid>,

    /// True once a winner is set or the match was ended early
    pub completed: bool,
}

impl Match {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a fresh match. Blank or whitespace-only names fall back to
    /// "Player 1" / "Player 2".
    pub fn new(player1_name: &str, player2_name: &str, race_to: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now().timestamp_millis(),
            player1: Player::new(player1_name, DEFAULT_PLAYER1_NAME),
            player2: Player::new(player2_name, DEFAULT_PLAYER2_NAME),
            race_to,
            winner: None,
            completed: false,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Look up a player by id
    pub fn player(&self, player_id: Uuid) -> Option<&Player> {
        if self.player1.id == player_id {
            Some(&self.player1)
        } else if self.player2.id == player_id {
            Some(&self.player2)
        } else {
            None
        }
    }

    /// The winning player, once decided
    pub fn winner_player(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.player(id))
    }

    fn player_mut(&mut self, player_id: Uuid) -> Option<&mut Player> {
        if self.player1.id == player_id {
            Some(&mut self.player1)
        } else if self.player2.id == player_id {
            Some(&mut self.player2)
        } else {
            None
        }
    }

    // ========================================================================
    // SCORE TRANSITIONS
    // ========================================================================

    /// Add one point to the given player and evaluate the winner.
    ///
    /// Unrecognized ids are ignored. An already-decided match accepts the
    /// point but never re-evaluates: the winner is set exactly once, when a
    /// score first reaches `race_to`.
    pub fn increment_score(&mut self, player_id: Uuid) -> ScoreChange {
        match self.player_mut(player_id) {
            Some(player) => player.score += 1,
            None => return ScoreChange::Ignored,
        }

        if self.winner.is_none() {
            if let Some(winner_id) = self.evaluate_winner() {
                self.winner = Some(winner_id);
                self.completed = true;
                return ScoreChange::WonBy(winner_id);
            }
        }

        ScoreChange::Applied
    }

    /// Remove one point from the given player, floored at zero.
    ///
    /// Never triggers winner evaluation: a winner is only decided on the
    /// increment that reaches the race target.
    pub fn decrement_score(&mut self, player_id: Uuid) -> ScoreChange {
        match self.player_mut(player_id) {
            Some(player) if player.score > 0 => {
                player.score -= 1;
                ScoreChange::Applied
            }
            _ => ScoreChange::Ignored,
        }
    }

    /// Player 1 is checked before player 2, so player 1 wins the
    /// (unreachable in practice) case of both crossing in one call.
    fn evaluate_winner(&self) -> Option<Uuid> {
        if self.player1.score >= self.race_to {
            Some(self.player1.id)
        } else if self.player2.score >= self.race_to {
            Some(self.player2.id)
        } else {
            None
        }
    }

    // ========================================================================
    // SETTINGS
    // ========================================================================

    /// Rename a player; blank names fall back to the slot default.
    /// Returns false on an unrecognized id.
    pub fn set_player_name(&mut self, player_id: Uuid, name: &str) -> bool {
        let fallback = if self.player1.id == player_id {
            DEFAULT_PLAYER1_NAME
        } else if self.player2.id == player_id {
            DEFAULT_PLAYER2_NAME
        } else {
            return false;
        };

        let name = displayable_name(name, fallback);
        if let Some(player) = self.player_mut(player_id) {
            player.name = name;
        }
        true
    }

    /// Overwrite the race target. Does not re-evaluate the winner even if a
    /// score already meets the new value.
    pub fn set_race_to(&mut self, value: u32) {
        self.race_to = value;
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Zero both scores and clear the decision. Names, race target, id and
    /// timestamp are untouched.
    pub fn reset_scores(&mut self) {
        self.player1.score = 0;
        self.player2.score = 0;
        self.winner = None;
        self.completed = false;
    }

    /// Mark the match completed without a winner (early end).
    pub fn complete(&mut self) {
        self.completed = true;
    }
}

/// Trimmed name, or the fallback when nothing is left
fn displayable_name(name: &str, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
