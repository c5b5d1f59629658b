//! Break timer - self-contained countdown
//!
//! Independent of match state: the caller drives it with one-second
//! [`BreakTimer::tick`] calls while it is running.

use std::fmt;

/// Default break length in seconds
pub const DEFAULT_BREAK_SECS: u32 = 60;

/// Countdown phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    /// Not started, or stopped (reset/expired)
    Idle,
    Running,
    /// Suspended; remaining time is kept
    Paused,
}

#[derive(Clone, Debug)]
pub struct BreakTimer {
    duration_secs: u32,
    remaining_secs: u32,
    state: TimerState,
}

impl BreakTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Start or resume the countdown. Starting after expiry restarts from
    /// the full configured duration.
    pub fn start(&mut self) {
        if self.remaining_secs == 0 {
            self.remaining_secs = self.duration_secs;
        }
        self.state = TimerState::Running;
    }

    /// Suspend further ticks without losing the remaining time.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Back to the configured duration, stopped.
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.state = TimerState::Idle;
    }

    /// Advance the countdown by one second. Only a running timer moves;
    /// reaching zero stops it.
    pub fn tick(&mut self) {
        if self.state != TimerState::Running {
            return;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Idle;
        }
    }
}

impl Default for BreakTimer {
    fn default() -> Self {
        Self::new(DEFAULT_BREAK_SECS)
    }
}

/// `mm:ss` rendering of the remaining time
impl fmt::Display for BreakTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mins = self.remaining_secs / 60;
        let secs = self.remaining_secs % 60;
        write!(f, "{:02}:{:02}", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_tick_is_noop() {
        let mut timer = BreakTimer::new(10);
        timer.tick();
        assert_eq!(timer.remaining_secs(), 10);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_counts_down_and_stops_at_zero() {
        let mut timer = BreakTimer::new(3);
        timer.start();

        timer.tick();
        timer.tick();
        assert_eq!(timer.remaining_secs(), 1);
        assert!(timer.is_running());

        timer.tick();
        assert_eq!(timer.remaining_secs(), 0);
        assert!(timer.is_expired());
        assert_eq!(timer.state(), TimerState::Idle);

        // Expired: further ticks stay at zero.
        timer.tick();
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn test_pause_preserves_remaining() {
        let mut timer = BreakTimer::new(10);
        timer.start();
        timer.tick();
        timer.tick();

        timer.pause();
        assert_eq!(timer.state(), TimerState::Paused);
        timer.tick();
        assert_eq!(timer.remaining_secs(), 8);

        timer.start();
        timer.tick();
        assert_eq!(timer.remaining_secs(), 7);
    }

    #[test]
    fn test_pause_when_not_running_is_noop() {
        let mut timer = BreakTimer::new(10);
        timer.pause();
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_start_after_expiry_restarts_full() {
        let mut timer = BreakTimer::new(2);
        timer.start();
        timer.tick();
        timer.tick();
        assert!(timer.is_expired());

        timer.start();
        assert_eq!(timer.remaining_secs(), 2);
        assert!(timer.is_running());
    }

    #[test]
    fn test_reset_stops_and_restores_duration() {
        let mut timer = BreakTimer::new(60);
        timer.start();
        timer.tick();

        timer.reset();
        assert_eq!(timer.remaining_secs(), 60);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_display_mm_ss() {
        let mut timer = BreakTimer::new(90);
        assert_eq!(timer.to_string(), "01:30");
        timer.start();
        timer.tick();
        assert_eq!(timer.to_string(), "01:29");

        let zero = BreakTimer::new(0);
        assert_eq!(zero.to_string(), "00:00");
    }
}
