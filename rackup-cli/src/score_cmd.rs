//! Scoreboard commands - drive the match engine from the terminal
//!
//! The engine deliberately keeps accepting score changes on a decided
//! match; the refusal lives here, where the original scoreboard disabled
//! its buttons.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, TimeZone};
use clap::Args;
use uuid::Uuid;

use rackup_core::{
    JsonFileStore, Match, ScoreChange, Session, DEFAULT_RACE_TO, RACE_TO_CHOICES,
};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct NewArgs {
    /// First player's name (blank falls back to "Player 1")
    #[arg(long, default_value = "")]
    pub player1: String,

    /// Second player's name (blank falls back to "Player 2")
    #[arg(long, default_value = "")]
    pub player2: String,

    /// Race target
    #[arg(long, default_value_t = DEFAULT_RACE_TO)]
    pub race_to: u32,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show at most this many matches
    #[arg(long)]
    pub limit: Option<usize>,
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

pub fn run_new(data_dir: &Path, args: NewArgs) -> Result<()> {
    ensure_allowed_race_to(args.race_to)?;

    let mut session = open_session(data_dir)?;
    if session.current().is_some() {
        println!("Replacing the match in progress.");
    }

    let m = session.new_match(&args.player1, &args.player2, args.race_to);
    println!("New match created");
    print!("{}", render_scoreboard(m));
    Ok(())
}

pub fn run_add(data_dir: &Path, player: u8) -> Result<()> {
    let mut session = open_session(data_dir)?;
    attach_score_log(&mut session);

    let Some(m) = session.current() else {
        println!("No active match. Start one with `rackup new`.");
        return Ok(());
    };
    if m.completed {
        println!("Match is over. Reset scores or start a new match.");
        return Ok(());
    }

    let player_id = resolve_player(m, player)?;
    match session.increment_score(player_id) {
        ScoreChange::WonBy(winner_id) => {
            let m = session.current().expect("match survives a win");
            let winner = m.player(winner_id).expect("winner is one of the players");
            println!("{} wins the match!", winner.name);
            print!("{}", render_scoreboard(m));
        }
        ScoreChange::Applied => {
            print!("{}", render_scoreboard(session.current().unwrap()));
        }
        ScoreChange::Ignored => {}
    }
    Ok(())
}

pub fn run_sub(data_dir: &Path, player: u8) -> Result<()> {
    let mut session = open_session(data_dir)?;
    attach_score_log(&mut session);

    let Some(m) = session.current() else {
        println!("No active match. Start one with `rackup new`.");
        return Ok(());
    };
    if m.completed {
        println!("Match is over. Reset scores or start a new match.");
        return Ok(());
    }

    let player_id = resolve_player(m, player)?;
    session.decrement_score(player_id);
    print!("{}", render_scoreboard(session.current().unwrap()));
    Ok(())
}

pub fn run_rename(data_dir: &Path, player: u8, name: &str) -> Result<()> {
    let mut session = open_session(data_dir)?;

    let Some(m) = session.current() else {
        println!("No active match. Start one with `rackup new`.");
        return Ok(());
    };

    let player_id = resolve_player(m, player)?;
    session.set_player_name(player_id, name);
    print!("{}", render_scoreboard(session.current().unwrap()));
    Ok(())
}

pub fn run_race_to(data_dir: &Path, value: u32) -> Result<()> {
    ensure_allowed_race_to(value)?;

    let mut session = open_session(data_dir)?;
    if !session.set_race_to(value) {
        println!("No active match. Start one with `rackup new`.");
        return Ok(());
    }

    print!("{}", render_scoreboard(session.current().unwrap()));
    Ok(())
}

pub fn run_reset(data_dir: &Path) -> Result<()> {
    let mut session = open_session(data_dir)?;
    if !session.reset_scores() {
        println!("No active match. Start one with `rackup new`.");
        return Ok(());
    }

    println!("Match scores have been reset");
    print!("{}", render_scoreboard(session.current().unwrap()));
    Ok(())
}

pub fn run_end(data_dir: &Path) -> Result<()> {
    let mut session = open_session(data_dir)?;
    if session.end_match() {
        println!("Match ended");
    } else {
        println!("No active match.");
    }
    Ok(())
}

pub fn run_show(data_dir: &Path, json: bool) -> Result<()> {
    let session = open_session(data_dir)?;

    let Some(m) = session.current() else {
        println!("No active match. Start one with `rackup new`.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(m)?);
    } else {
        print!("{}", render_scoreboard(m));
    }
    Ok(())
}

pub fn run_history(data_dir: &Path, args: HistoryArgs) -> Result<()> {
    let session = open_session(data_dir)?;
    let history = session.history();

    if history.is_empty() {
        println!("No completed matches yet.");
        return Ok(());
    }

    let limit = args.limit.unwrap_or(usize::MAX);
    if args.json {
        let matches: Vec<&Match> = history.iter().take(limit).collect();
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print!("{}", render_history(history.iter().take(limit)));
    }
    Ok(())
}

// ============================================================================
// SESSION PLUMBING
// ============================================================================

fn open_session(data_dir: &Path) -> Result<Session<JsonFileStore>> {
    let store = JsonFileStore::new(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    Ok(Session::load(store))
}

/// Cosmetic score-change feedback goes through the engine hook; the CLI
/// only forwards it to the log.
fn attach_score_log(session: &mut Session<JsonFileStore>) {
    session.set_score_changed_hook(Box::new(|player_id: Uuid, delta: i32| {
        tracing::debug!("score changed: {:+} for {}", delta, player_id);
    }));
}

/// Map a table-side number (1 or 2) to the player's id
fn resolve_player(m: &Match, player: u8) -> Result<Uuid> {
    match player {
        1 => Ok(m.player1.id),
        2 => Ok(m.player2.id),
        other => bail!("No player {} on the table (use 1 or 2)", other),
    }
}

fn ensure_allowed_race_to(value: u32) -> Result<()> {
    if !RACE_TO_CHOICES.contains(&value) {
        bail!(
            "Race target {} is not offered; pick one of {:?}",
            value,
            RACE_TO_CHOICES
        );
    }
    Ok(())
}

// ============================================================================
// RENDERING
// ============================================================================

fn render_scoreboard(m: &Match) -> String {
    let mut out = String::new();
    let width = m.player1.name.len().max(m.player2.name.len());

    out.push_str("=== Scoreboard ===\n");
    out.push_str(&format!(
        "  {:<width$}  {}\n",
        m.player1.name,
        m.player1.score,
        width = width
    ));
    out.push_str(&format!(
        "  {:<width$}  {}\n",
        m.player2.name,
        m.player2.score,
        width = width
    ));
    out.push_str(&format!("Race to {}\n", m.race_to));

    if let Some(winner) = m.winner_player() {
        out.push_str(&format!("Winner: {}\n", winner.name));
    } else if m.completed {
        out.push_str("Ended without a winner\n");
    }

    out
}

fn render_history<'a>(matches: impl Iterator<Item = &'a Match>) -> String {
    let mut out = String::new();
    out.push_str("=== Match History ===\n");

    for m in matches {
        let winner = m
            .winner_player()
            .map(|p| p.name.as_str())
            .unwrap_or("no winner");
        out.push_str(&format!(
            "  {}  {} {} - {} {}  (race to {}, {})\n",
            format_timestamp(m.timestamp),
            m.player1.name,
            m.player1.score,
            m.player2.score,
            m.player2.name,
            m.race_to,
            winner
        ));
    }

    out
}

fn format_timestamp(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "unknown time".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
