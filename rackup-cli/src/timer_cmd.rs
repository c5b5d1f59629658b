//! Break timer command - one-second countdown in the terminal

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use rackup_core::BreakTimer;

pub fn run(secs: u32) -> Result<()> {
    let mut timer = BreakTimer::new(secs);
    timer.start();

    println!("Break timer started ({})", timer);
    while timer.is_running() {
        thread::sleep(Duration::from_secs(1));
        timer.tick();
        print!("\r  {} ", timer);
        std::io::stdout().flush()?;
    }

    println!();
    println!("Break over");
    Ok(())
}
