//! Read-only status projection and countdown formatting.

use std::time::{Duration, Instant};

use super::timer::{Mode, Timer};

/// Countdown separators, one for work and one shared by both breaks, so a
/// glance at the widget tells the phases apart.
#[derive(Debug, Clone)]
pub struct Separators {
    pub work: String,
    pub rest: String,
}

impl Separators {
    pub fn for_mode(&self, mode: Mode) -> &str {
        if mode.is_break() {
            &self.rest
        } else {
            &self.work
        }
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            work: ":".to_string(),
            rest: ":".to_string(),
        }
    }
}

/// Formats a countdown as `MM<sep>SS`, clamping the minutes at 99 so the
/// text never outgrows a fixed-width widget slot.
pub fn format_countdown(remaining: Duration, sep: &str) -> String {
    let minutes = (remaining.as_secs() / 60).min(99);
    let seconds = remaining.as_secs() % 60;
    format!("{minutes:02}{sep}{seconds:02}")
}

/// Point-in-time view of the timer, cheap to clone into responses and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub mode: Mode,
    /// `[S]`, `[P]` or `[R]`.
    pub state: &'static str,
    /// Formatted countdown, e.g. `24:58`.
    pub timer: String,
    pub completed: u32,
    pub intervals: u32,
}

impl Status {
    /// Projects the timer at `now`. Purely read-only; expiry detection is
    /// the caller's business via [`Timer::tick`].
    pub fn capture(timer: &Timer, now: Instant, separators: &Separators) -> Self {
        let sep = separators.for_mode(timer.mode());
        Self {
            mode: timer.mode(),
            state: timer.state().glyph(),
            timer: format_countdown(timer.remaining(now), sep),
            completed: timer.completed(),
            intervals: timer.intervals(),
        }
    }

    /// One-line human form, e.g. `[R] 24:58 2/4 work`.
    pub fn line(&self) -> String {
        format!(
            "{} {} {}/{} {}",
            self.state, self.timer, self.completed, self.intervals, self.mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::timer::CycleConfig;

    #[test]
    fn countdown_is_zero_padded() {
        assert_eq!(format_countdown(Duration::from_secs(25 * 60), ":"), "25:00");
        assert_eq!(format_countdown(Duration::from_secs(12), ":"), "00:12");
        assert_eq!(format_countdown(Duration::ZERO, ":"), "00:00");
    }

    #[test]
    fn countdown_minutes_clamp_at_99() {
        assert_eq!(
            format_countdown(Duration::from_secs(100 * 60 + 59), ":"),
            "99:59"
        );
        assert_eq!(
            format_countdown(Duration::from_secs(24 * 60 * 60), ":"),
            "99:00"
        );
    }

    #[test]
    fn countdown_drops_subsecond_noise() {
        assert_eq!(format_countdown(Duration::from_millis(59_900), ":"), "00:59");
    }

    #[test]
    fn separator_follows_the_mode() {
        let separators = Separators {
            work: ".".to_string(),
            rest: "'".to_string(),
        };
        let mut timer = Timer::new(CycleConfig::default());
        let now = Instant::now();

        assert_eq!(Status::capture(&timer, now, &separators).timer, "25.00");

        timer.stop_or_switch(); // skip into the short break
        assert_eq!(Status::capture(&timer, now, &separators).timer, "05'00");
    }

    #[test]
    fn line_lists_state_countdown_cycle_and_mode() {
        let timer = Timer::new(CycleConfig::default());
        let status = Status::capture(&timer, Instant::now(), &Separators::default());
        assert_eq!(status.line(), "[S] 25:00 0/4 work");
    }
}
