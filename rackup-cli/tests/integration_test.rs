//! Integration tests for the RACKUP scoreboard
//!
//! Tests the full stack: match engine, session orchestration, and the
//! JSON file store, against a real temporary data directory.

use rackup_core::{JsonFileStore, ScoreChange, Session};
use tempfile::TempDir;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn file_session(dir: &TempDir) -> Session<JsonFileStore> {
    let store = JsonFileStore::new(dir.path()).unwrap();
    Session::load(store)
}

// ============================================================================
// FULL MATCH LIFECYCLE
// ============================================================================

#[test]
fn test_create_score_win_and_archive() {
    let dir = TempDir::new().unwrap();
    let mut session = file_session(&dir);

    let m = session.new_match("Ann", "", 3);
    assert_eq!(m.player1.name, "Ann");
    assert_eq!(m.player2.name, "Player 2");
    assert_eq!(m.player1.score, 0);
    assert_eq!(m.player2.score, 0);
    let p1 = m.player1.id;
    let p2 = m.player2.id;

    assert_eq!(session.increment_score(p1), ScoreChange::Applied);
    assert_eq!(session.increment_score(p1), ScoreChange::Applied);
    assert_eq!(session.increment_score(p1), ScoreChange::WonBy(p1));

    let current = session.current().unwrap();
    assert_eq!(current.winner, Some(p1));
    assert!(current.completed);
    assert_eq!(session.history().len(), 1);

    // Extra point after the decision: score moves, winner does not.
    assert_eq!(session.increment_score(p2), ScoreChange::Applied);
    let current = session.current().unwrap();
    assert_eq!(current.player2.score, 1);
    assert_eq!(current.winner, Some(p1));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_end_twice_is_single_archive() {
    let dir = TempDir::new().unwrap();
    let mut session = file_session(&dir);

    session.new_match("Ann", "Ben", 7);
    assert!(session.end_match());
    assert!(session.current().is_none());
    assert_eq!(session.history().len(), 1);

    assert!(!session.end_match());
    assert_eq!(session.history().len(), 1);
}

// ============================================================================
// PERSISTENCE ACROSS PROCESSES
// ============================================================================

#[test]
fn test_state_reloads_from_disk() {
    let dir = TempDir::new().unwrap();

    let (p1, p2) = {
        let mut session = file_session(&dir);
        let m = session.new_match("Ann", "Ben", 5);
        let ids = (m.player1.id, m.player2.id);
        session.increment_score(ids.0);
        session.increment_score(ids.0);
        session.increment_score(ids.1);
        ids
    };

    // A second session over the same directory sees the same match.
    let mut session = file_session(&dir);
    let m = session.current().unwrap();
    assert_eq!(m.player1.score, 2);
    assert_eq!(m.player2.score, 1);
    assert_eq!(m.player1.id, p1);

    // And continues it to the decision.
    session.increment_score(p2);
    session.increment_score(p2);
    session.increment_score(p2);
    session.increment_score(p2);
    assert_eq!(session.current().unwrap().winner, Some(p2));

    // History written by the second session survives a third load.
    let session = file_session(&dir);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().latest().unwrap().winner, Some(p2));
}

#[test]
fn test_end_clears_stored_current() {
    let dir = TempDir::new().unwrap();

    {
        let mut session = file_session(&dir);
        session.new_match("Ann", "Ben", 3);
        session.end_match();
    }

    assert!(!dir.path().join("currentMatch.json").exists());
    assert!(dir.path().join("matchHistory.json").exists());

    let session = file_session(&dir);
    assert!(session.current().is_none());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_stored_json_keeps_wire_field_names() {
    let dir = TempDir::new().unwrap();

    {
        let mut session = file_session(&dir);
        session.new_match("Ann", "Ben", 7);
    }

    let raw = std::fs::read_to_string(dir.path().join("currentMatch.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("raceTo").is_some());
    assert!(value.get("player1").is_some());
    assert!(value.get("winner").is_some());
    assert!(value.get("race_to").is_none());
}

// ============================================================================
// CORRUPTION RECOVERY
// ============================================================================

#[test]
fn test_corrupt_files_load_as_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("currentMatch.json"), "{{{{").unwrap();
    std::fs::write(dir.path().join("matchHistory.json"), "no json here").unwrap();

    let session = file_session(&dir);
    assert!(session.current().is_none());
    assert!(session.history().is_empty());
}

#[test]
fn test_corrupt_history_does_not_lose_current() {
    let dir = TempDir::new().unwrap();

    {
        let mut session = file_session(&dir);
        session.new_match("Ann", "Ben", 7);
    }
    std::fs::write(dir.path().join("matchHistory.json"), "][").unwrap();

    let session = file_session(&dir);
    assert_eq!(session.current().unwrap().player1.name, "Ann");
    assert!(session.history().is_empty());
}

// ============================================================================
// RESET SEMANTICS
// ============================================================================

#[test]
fn test_reset_gives_fresh_decision_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut session = file_session(&dir);

    let m = session.new_match("Ann", "Ben", 2);
    let p1 = m.player1.id;
    let p2 = m.player2.id;

    session.increment_score(p1);
    session.increment_score(p1);
    session.reset_scores();
    session.increment_score(p2);
    session.increment_score(p2);

    let session = file_session(&dir);
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().latest().unwrap().winner, Some(p2));
    assert_eq!(session.current().unwrap().winner, Some(p2));
}
