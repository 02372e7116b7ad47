//! State management module
//!
//! This module contains the timer state machine, its read-only status
//! projection and the lock-guarded shared owner.

pub mod app_state;
pub mod status;
pub mod timer;

// Re-export main types
pub use app_state::AppState;
pub use status::{format_countdown, Separators, Status};
pub use timer::{CycleConfig, Mode, RunState, Timer, TimerEvent};
