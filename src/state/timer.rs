//! Pomodoro timer state machine.
//!
//! The timer is wall-clock based and owns no thread: every operation takes
//! the current instant from the caller, and the surrounding process calls
//! [`Timer::tick`] at a short period so an interval that runs out while
//! nobody is polling still completes.
//!
//! ## State transitions
//!
//! ```text
//! Stopped --toggle--> Running --toggle--> Paused --toggle--> Running
//! Running --tick past deadline--> Stopped, next mode
//! Running | Paused --stop_or_switch--> Stopped, same mode
//! Stopped --stop_or_switch--> Stopped, next mode (count untouched)
//! ```
//!
//! Mutating operations return the [`TimerEvent`] the caller owes the outside
//! world once the transition has been applied; the machine itself never
//! spawns, blocks or fails.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Phase of the work/break cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// True for both break phases.
    pub fn is_break(self) -> bool {
        matches!(self, Mode::ShortBreak | Mode::LongBreak)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        };
        f.write_str(name)
    }
}

/// Whether the timer is counting down, halted midway, or idle.
///
/// Each variant carries the one time field that is meaningful in that state,
/// so a stale deadline or leftover remaining time cannot be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not counting; the current mode's full duration is on display.
    Stopped,
    /// Counting down towards an absolute instant. Storing the deadline
    /// instead of an elapsed counter keeps host sleep/wake reconciliation
    /// to a single subtraction at read time.
    Running { deadline: Instant },
    /// Halted, with a snapshot of the time left.
    Paused { remaining: Duration },
}

impl RunState {
    /// Three-character tag used in the status line and on the wire.
    pub fn glyph(&self) -> &'static str {
        match self {
            RunState::Stopped => "[S]",
            RunState::Running { .. } => "[R]",
            RunState::Paused { .. } => "[P]",
        }
    }
}

/// Per-mode durations and the long-break cadence.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub work: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
    /// Work intervals per long-break cycle, the `n` in `i/n`.
    pub intervals: u32,
}

impl CycleConfig {
    /// Configured length of one interval in the given mode.
    pub fn duration_of(&self, mode: Mode) -> Duration {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            work: Duration::from_secs(25 * 60),
            short_break: Duration::from_secs(5 * 60),
            long_break: Duration::from_secs(15 * 60),
            intervals: 4,
        }
    }
}

/// Side effect owed to the outside world after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown (re)started; the start hook should run.
    Started,
    /// A running interval reached its deadline; the expiry hook should run.
    Expired,
}

/// The single mutable timer aggregate.
///
/// All mutation goes through [`toggle`](Timer::toggle),
/// [`stop_or_switch`](Timer::stop_or_switch) and [`tick`](Timer::tick).
#[derive(Debug, Clone)]
pub struct Timer {
    config: CycleConfig,
    mode: Mode,
    state: RunState,
    completed: u32,
}

impl Timer {
    /// A stopped work timer with an empty cycle.
    pub fn new(config: CycleConfig) -> Self {
        Self {
            config,
            mode: Mode::Work,
            state: RunState::Stopped,
            completed: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Work intervals completed in the current long-break cycle.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Work intervals per long-break cycle.
    pub fn intervals(&self) -> u32 {
        self.config.intervals
    }

    /// Time left on display at `now`: the full mode duration when stopped,
    /// the paused snapshot, or the distance to the deadline floored at zero.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.state {
            RunState::Stopped => self.config.duration_of(self.mode),
            RunState::Paused { remaining } => remaining,
            RunState::Running { deadline } => deadline.saturating_duration_since(now),
        }
    }

    /// Start-or-pause toggle.
    ///
    /// A press on a running timer whose deadline already passed lands on the
    /// state the expiry leaves behind: the interval completes, with its
    /// event, and nothing is paused.
    pub fn toggle(&mut self, now: Instant) -> Option<TimerEvent> {
        match self.state {
            RunState::Stopped => {
                self.state = RunState::Running {
                    deadline: now + self.config.duration_of(self.mode),
                };
                Some(TimerEvent::Started)
            }
            RunState::Paused { remaining } => {
                self.state = RunState::Running {
                    deadline: now + remaining,
                };
                Some(TimerEvent::Started)
            }
            RunState::Running { deadline } => {
                if let Some(event) = self.tick(now) {
                    Some(event)
                } else {
                    self.state = RunState::Paused {
                        remaining: deadline - now,
                    };
                    None
                }
            }
        }
    }

    /// Stop-or-switch toggle.
    ///
    /// Stops a running or paused interval in place. On an already stopped
    /// timer it skips to the next mode instead, deciding the step from the
    /// current count without incrementing it: a manual skip is not a
    /// completed interval.
    pub fn stop_or_switch(&mut self) {
        match self.state {
            RunState::Running { .. } | RunState::Paused { .. } => {
                self.state = RunState::Stopped;
            }
            RunState::Stopped => {
                self.mode = match self.mode {
                    Mode::Work => {
                        if self.completed < self.config.intervals {
                            Mode::ShortBreak
                        } else {
                            Mode::LongBreak
                        }
                    }
                    Mode::ShortBreak => Mode::Work,
                    Mode::LongBreak => {
                        self.completed = 0;
                        Mode::Work
                    }
                };
            }
        }
    }

    /// Passive refresh: detects and applies a natural expiry.
    ///
    /// Completing a work interval counts it towards the cycle before the
    /// short-or-long decision; leaving a long break resets the cycle.
    pub fn tick(&mut self, now: Instant) -> Option<TimerEvent> {
        match self.state {
            RunState::Running { deadline } if now >= deadline => {
                self.state = RunState::Stopped;
                self.mode = match self.mode {
                    Mode::Work => {
                        self.completed += 1;
                        if self.completed < self.config.intervals {
                            Mode::ShortBreak
                        } else {
                            Mode::LongBreak
                        }
                    }
                    Mode::ShortBreak => Mode::Work,
                    Mode::LongBreak => {
                        self.completed = 0;
                        Mode::Work
                    }
                };
                Some(TimerEvent::Expired)
            }
            _ => None,
        }
    }
}
