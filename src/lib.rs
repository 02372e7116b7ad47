//! Tomatod - a Pomodoro timer served over local HTTP
//!
//! This library provides a work/break cycle timer that touch bar and status
//! bar widgets drive through two toggle actions, reading the countdown by
//! polling or receiving it as push updates.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
