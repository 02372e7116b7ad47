//! Start and expiry command hooks.
//!
//! Hook commands run through `/bin/sh -c` with inherited stdio, strictly
//! after the transition that triggered them has committed. In detached mode
//! the command is spawned into its own task and only its exit status is
//! ever looked at, for logging.

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::{error, info};

/// The configured hook commands and their execution mode.
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    on_start: Option<String>,
    on_expiry: Option<String>,
    detached: bool,
}

impl Hooks {
    pub fn new(on_start: Option<String>, on_expiry: Option<String>, detached: bool) -> Self {
        Self {
            on_start,
            on_expiry,
            detached,
        }
    }

    /// No hooks configured; every fire is a no-op.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Runs the start hook, if configured.
    pub async fn timer_started(&self) {
        self.fire(&self.on_start).await;
    }

    /// Runs the expiry hook, if configured.
    pub async fn timer_expired(&self) {
        self.fire(&self.on_expiry).await;
    }

    async fn fire(&self, command: &Option<String>) {
        if let Some(command) = command {
            if self.detached {
                info!("Executing command (without waiting for it to finish): {:?}", command);
                let command = command.clone();
                tokio::spawn(async move {
                    report(run_shell(&command).await, &command);
                });
            } else {
                info!("Executing command: {:?}", command);
                report(run_shell(command).await, command);
            }
        }
    }
}

fn report(result: Result<()>, command: &str) {
    match result {
        Ok(()) => info!("Command executed"),
        Err(e) => {
            error!("Failed to execute hook command: {:#}", e);
            // 127 is the shell's command-not-found exit status.
            if e.to_string().contains("exit status 127") && command.contains("terminal-notifier") {
                info!("Note: terminal-notifier can be downloaded at https://github.com/julienXX/terminal-notifier");
            }
        }
    }
}

/// Runs a command line under `/bin/sh`, treating a non-zero exit as an error.
pub async fn run_shell(command: &str) -> Result<()> {
    let status = Command::new("/bin/sh")
        .arg("-c")
        .arg(command)
        .status()
        .await
        .context("Failed to spawn /bin/sh")?;
    if !status.success() {
        bail!("exit status {}", status.code().unwrap_or(-1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_exit_is_ok() {
        run_shell("true").await.unwrap();
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error() {
        let err = run_shell("exit 3").await.unwrap_err();
        assert_eq!(err.to_string(), "exit status 3");
    }

    #[tokio::test]
    async fn missing_program_reports_127() {
        let err = run_shell("definitely-not-a-real-program-xyz").await.unwrap_err();
        assert_eq!(err.to_string(), "exit status 127");
    }

    #[tokio::test]
    async fn disabled_hooks_are_noops() {
        Hooks::disabled().timer_started().await;
        Hooks::disabled().timer_expired().await;
    }
}
