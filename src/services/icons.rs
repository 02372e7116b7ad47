//! Widget icon loading.
//!
//! Icons travel to the widget as base64 text in a query parameter, so they
//! are read and encoded once at startup. Without custom paths the embedded
//! red/green pair is used.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::state::Mode;

static DEFAULT_WORK_ICON: &[u8] = include_bytes!("../../assets/red.png");
static DEFAULT_BREAK_ICON: &[u8] = include_bytes!("../../assets/green.png");

/// Which of the two widget icons a status maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Work,
    Break,
}

impl IconKind {
    pub fn for_mode(mode: Mode) -> Self {
        if mode.is_break() {
            IconKind::Break
        } else {
            IconKind::Work
        }
    }
}

/// The two base64-encoded icon payloads.
#[derive(Debug, Clone)]
pub struct IconSet {
    work: String,
    rest: String,
}

impl IconSet {
    /// Loads custom icon files where given, the embedded defaults otherwise.
    pub fn load(work: Option<&Path>, rest: Option<&Path>) -> Result<Self> {
        Ok(Self {
            work: encode(work, DEFAULT_WORK_ICON)?,
            rest: encode(rest, DEFAULT_BREAK_ICON)?,
        })
    }

    pub fn data(&self, kind: IconKind) -> &str {
        match kind {
            IconKind::Work => &self.work,
            IconKind::Break => &self.rest,
        }
    }
}

fn encode(path: Option<&Path>, fallback: &[u8]) -> Result<String> {
    let bytes = match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("Unable to load icon {}", path.display()))?
        }
        None => fallback.to_vec(),
    };
    Ok(BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_encode_and_differ() {
        let icons = IconSet::load(None, None).unwrap();
        assert!(!icons.data(IconKind::Work).is_empty());
        assert_ne!(icons.data(IconKind::Work), icons.data(IconKind::Break));
    }

    #[test]
    fn breaks_share_the_rest_icon() {
        assert_eq!(IconKind::for_mode(Mode::Work), IconKind::Work);
        assert_eq!(IconKind::for_mode(Mode::ShortBreak), IconKind::Break);
        assert_eq!(IconKind::for_mode(Mode::LongBreak), IconKind::Break);
    }

    #[test]
    fn missing_custom_icon_is_an_error() {
        let err = IconSet::load(Some(Path::new("/no/such/icon.png")), None).unwrap_err();
        assert!(err.to_string().contains("/no/such/icon.png"));
    }
}
