use alloc::{format, string::String};
use serde::{Deserialize, Serialize};

/// Wall-clock counter for one session.
///
/// The host drives it with a one-second tick; this type only tracks whether it
/// runs and how many seconds have been counted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimer {
    elapsed: u32,
    running: bool,
}

impl SessionTimer {
    pub const fn new() -> Self {
        Self {
            elapsed: 0,
            running: false,
        }
    }

    /// Returns `true` only when the timer was stopped and is now running, so the
    /// host knows to schedule its tick.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    pub fn stop(&mut self) -> bool {
        core::mem::replace(&mut self.running, false)
    }

    pub fn restart(&mut self) {
        self.elapsed = 0;
        self.running = true;
    }

    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        true
    }

    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub fn display(&self) -> String {
        format_clock(self.elapsed)
    }
}

/// Formats seconds as `mm:ss`, minutes keep growing past 59.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(6001), "100:01");
    }

    #[test]
    fn start_is_guarded_against_double_start() {
        let mut timer = SessionTimer::new();

        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.is_running());
    }

    #[test]
    fn ticks_only_count_while_running() {
        let mut timer = SessionTimer::new();
        assert!(!timer.tick());

        timer.start();
        for _ in 0..65 {
            timer.tick();
        }
        assert_eq!(timer.display(), "01:05");

        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 65);
    }

    #[test]
    fn restart_zeroes_and_runs() {
        let mut timer = SessionTimer::new();
        timer.start();
        timer.tick();
        timer.stop();

        timer.restart();

        assert_eq!(timer.elapsed_secs(), 0);
        assert!(timer.is_running());
        assert!(timer.tick());
        assert_eq!(timer.elapsed_secs(), 1);
    }
}
