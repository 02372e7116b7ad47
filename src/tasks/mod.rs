//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod push;
pub mod ticker;

// Re-export main functions
pub use push::push_update_task;
pub use ticker::refresh_ticker_task;
