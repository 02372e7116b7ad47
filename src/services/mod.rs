//! External collaborators module
//!
//! This module contains the pieces that talk to the world outside the
//! process: hook commands, widget icons and the push client.

pub mod hooks;
pub mod icons;
pub mod notifier;

// Re-export main types
pub use hooks::Hooks;
pub use icons::{IconKind, IconSet};
pub use notifier::{Notifier, PushUpdate};
