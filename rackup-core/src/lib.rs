//! RACKUP Core - pool-match scoreboard engine
//!
//! This crate provides the core logic for RACKUP:
//! - Match state and "race to N" score transitions
//! - Completed-match history (newest first)
//! - Key-value persistence with JSON file and in-memory backends
//! - Session object tying engine state to storage
//! - Break timer countdown

pub mod game;
pub mod history;
pub mod session;
pub mod store;
pub mod timer;

// Re-exports for convenient access
pub use game::{
    Match, Player, ScoreChange, DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME, DEFAULT_RACE_TO,
    RACE_TO_CHOICES,
};
pub use history::MatchHistory;
pub use session::Session;
pub use store::{JsonFileStore, KvStore, MemoryStore, Storage, StoreError};
pub use timer::{BreakTimer, TimerState, DEFAULT_BREAK_SECS};
