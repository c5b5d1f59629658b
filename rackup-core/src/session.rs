//! Session - scoreboard state tied to storage
//!
//! The session owns the current match and the history, routes every engine
//! operation, and persists the affected slot immediately after each change.
//! Composing applications construct one session and inject whatever
//! [`KvStore`] backend they want; there is no global state.

use tracing::{info, warn};
use uuid::Uuid;

use crate::game::{Match, ScoreChange};
use crate::history::MatchHistory;
use crate::store::{KvStore, Storage};

/// Optional observer for applied score changes, `(player_id, delta)`.
/// Presentation layers hook cosmetic feedback here; no consumer is required.
pub type ScoreChangedHook = Box<dyn FnMut(Uuid, i32)>;

pub struct Session<S: KvStore> {
    current: Option<Match>,
    history: MatchHistory,
    storage: Storage<S>,
    on_score_changed: Option<ScoreChangedHook>,
}

impl<S: KvStore> Session<S> {
    /// Fresh session with empty state, ignoring anything stored.
    pub fn new(store: S) -> Self {
        Self {
            current: None,
            history: MatchHistory::new(),
            storage: Storage::new(store),
            on_score_changed: None,
        }
    }

    /// Rehydrate both slots from storage. Missing or unreadable slots come
    /// back empty; this never fails.
    pub fn load(store: S) -> Self {
        let storage = Storage::new(store);
        let state = storage.load();
        Self {
            current: state.current,
            history: state.history,
            storage,
            on_score_changed: None,
        }
    }

    /// Register the score-change observer.
    pub fn set_score_changed_hook(&mut self, hook: ScoreChangedHook) {
        self.on_score_changed = Some(hook);
    }

    /// Tear the session down and hand the storage backend back.
    pub fn into_store(self) -> S {
        self.storage.into_inner()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn current(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Start a new match, replacing any existing current match.
    pub fn new_match(&mut self, player1_name: &str, player2_name: &str, race_to: u32) -> &Match {
        self.current = Some(Match::new(player1_name, player2_name, race_to));
        self.persist_current();
        self.current.as_ref().expect("current match was just set")
    }

    /// Add a point. A freshly decided match is archived to history in the
    /// same call.
    pub fn increment_score(&mut self, player_id: Uuid) -> ScoreChange {
        let Some(m) = self.current.as_mut() else {
            return ScoreChange::Ignored;
        };

        let change = m.increment_score(player_id);
        match change {
            ScoreChange::Ignored => return change,
            ScoreChange::Applied => {}
            ScoreChange::WonBy(winner_id) => {
                let snapshot = m.clone();
                if let Some(winner) = snapshot.player(winner_id) {
                    info!("{} wins the match", winner.name);
                }
                self.history.record(snapshot);
                self.persist_history();
            }
        }

        self.persist_current();
        self.notify_score_changed(player_id, 1);
        change
    }

    /// Remove a point, floored at zero.
    pub fn decrement_score(&mut self, player_id: Uuid) -> ScoreChange {
        let Some(m) = self.current.as_mut() else {
            return ScoreChange::Ignored;
        };

        let change = m.decrement_score(player_id);
        if change.applied() {
            self.persist_current();
            self.notify_score_changed(player_id, -1);
        }
        change
    }

    /// Rename a player. Returns false when the id matches neither player
    /// or there is no current match.
    pub fn set_player_name(&mut self, player_id: Uuid, name: &str) -> bool {
        let Some(m) = self.current.as_mut() else {
            return false;
        };

        let renamed = m.set_player_name(player_id, name);
        if renamed {
            self.persist_current();
        }
        renamed
    }

    /// Overwrite the race target of the current match.
    pub fn set_race_to(&mut self, value: u32) -> bool {
        let Some(m) = self.current.as_mut() else {
            return false;
        };

        m.set_race_to(value);
        self.persist_current();
        true
    }

    /// Zero both scores and clear the decision.
    pub fn reset_scores(&mut self) -> bool {
        let Some(m) = self.current.as_mut() else {
            return false;
        };

        m.reset_scores();
        self.persist_current();
        true
    }

    /// End the current match. An undecided match is marked completed and
    /// archived; a match that already reached its race target was archived
    /// at that moment and is not duplicated. The current slot is cleared
    /// either way. With no current match this is a no-op.
    pub fn end_match(&mut self) -> bool {
        let Some(mut m) = self.current.take() else {
            return false;
        };

        if !m.completed {
            m.complete();
            self.history.record(m);
            self.persist_history();
        }

        self.persist_current();
        true
    }

    // ========================================================================
    // PERSISTENCE (single call site per slot)
    // ========================================================================

    fn persist_current(&mut self) {
        if let Err(err) = self.storage.save_current(self.current.as_ref()) {
            warn!("Failed to persist current match: {}", err);
        }
    }

    fn persist_history(&mut self) {
        if let Err(err) = self.storage.save_history(&self.history) {
            warn!("Failed to persist match history: {}", err);
        }
    }

    fn notify_score_changed(&mut self, player_id: Uuid, delta: i32) {
        if let Some(hook) = self.on_score_changed.as_mut() {
            hook(player_id, delta);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
