//! RACKUP CLI - pool-match scoreboard
//!
//! Commands:
//! - new: start a match (replaces the current one)
//! - add/sub: score a point for player 1 or 2
//! - rename, race-to, reset, end: adjust the current match
//! - show, history: render state
//! - timer: run a break countdown

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod score_cmd;
mod timer_cmd;

use score_cmd::{HistoryArgs, NewArgs};

#[derive(Parser)]
#[command(name = "rackup")]
#[command(about = "Pool-match scoreboard: race-to-N scoring with history")]
struct Cli {
    /// Data directory for persisted state
    #[arg(long, global = true, default_value = ".rackup")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new match
    New(NewArgs),
    /// Add a point for a player (1 or 2)
    Add {
        player: u8,
    },
    /// Take a point back from a player (1 or 2)
    Sub {
        player: u8,
    },
    /// Rename a player
    Rename {
        player: u8,
        name: String,
    },
    /// Change the race target of the current match
    RaceTo {
        value: u32,
    },
    /// Zero both scores and clear the decision
    Reset,
    /// End the current match and archive it
    End,
    /// Show the current scoreboard
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List completed matches, newest first
    History(HistoryArgs),
    /// Run a break countdown in the terminal
    Timer {
        /// Break length in seconds
        #[arg(long, default_value_t = rackup_core::DEFAULT_BREAK_SECS)]
        secs: u32,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New(args) => score_cmd::run_new(&cli.data_dir, args),
        Commands::Add { player } => score_cmd::run_add(&cli.data_dir, player),
        Commands::Sub { player } => score_cmd::run_sub(&cli.data_dir, player),
        Commands::Rename { player, name } => score_cmd::run_rename(&cli.data_dir, player, &name),
        Commands::RaceTo { value } => score_cmd::run_race_to(&cli.data_dir, value),
        Commands::Reset => score_cmd::run_reset(&cli.data_dir),
        Commands::End => score_cmd::run_end(&cli.data_dir),
        Commands::Show { json } => score_cmd::run_show(&cli.data_dir, json),
        Commands::History(args) => score_cmd::run_history(&cli.data_dir, args),
        Commands::Timer { secs } => timer_cmd::run(secs),
    }
}
