//! API response structures

use serde::{Deserialize, Serialize};

use crate::state::{Mode, Status};

/// Structured status, served when the caller asks for JSON.
///
/// Field names are part of the widget contract: `i` work intervals out of
/// `n` are done in the current cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub mode: Mode,
    pub state: String,
    pub timer: String,
    pub i: u32,
    pub n: u32,
}

impl From<Status> for StatusResponse {
    fn from(status: Status) -> Self {
        Self {
            mode: status.mode,
            state: status.state.to_string(),
            timer: status.timer,
            i: status.completed,
            n: status.intervals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CycleConfig, Separators, Timer};
    use serde_json::json;
    use std::time::Instant;

    #[test]
    fn wire_format_matches_the_widget_contract() {
        let timer = Timer::new(CycleConfig::default());
        let status = Status::capture(&timer, Instant::now(), &Separators::default());
        let body = serde_json::to_value(StatusResponse::from(status)).unwrap();
        assert_eq!(
            body,
            json!({
                "mode": "work",
                "state": "[S]",
                "timer": "25:00",
                "i": 0,
                "n": 4,
            })
        );
    }
}
