//! Configuration and CLI argument handling

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use url::Url;

use crate::state::{CycleConfig, Separators};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "tomatod")]
#[command(about = "A Pomodoro timer served over local HTTP for touch bar and status bar widgets")]
#[command(version)]
pub struct Config {
    /// Address to bind the server to
    #[arg(long, default_value = "0.0.0.0:12321")]
    pub listen: String,

    /// Number of work intervals between long breaks (1-9)
    #[arg(short = 'n', long = "intervals", default_value_t = 4)]
    pub intervals: u32,

    /// Work interval length (e.g. `25m`, `1500s`; a bare number means minutes)
    #[arg(long, default_value = "25m")]
    pub work: String,

    /// Short break length
    #[arg(long, default_value = "5m")]
    pub short: String,

    /// Long break length
    #[arg(long, default_value = "15m")]
    pub long: String,

    /// Countdown separator while working
    #[arg(long = "colon", default_value = ":")]
    pub separator: String,

    /// Countdown separator during breaks
    #[arg(long = "colon-alt", default_value = ":")]
    pub separator_break: String,

    /// Milliseconds between background refreshes and widget updates (10-999)
    #[arg(long, default_value_t = 100)]
    pub tick: u64,

    /// Command to run when an interval ends
    #[arg(long)]
    pub command: Option<String>,

    /// Command to run when the timer starts
    #[arg(long)]
    pub start_command: Option<String>,

    /// Run hook commands without waiting for them to finish
    #[arg(long = "async")]
    pub async_hooks: bool,

    /// Icon shown while working (defaults to an embedded red square)
    #[arg(long = "icon1")]
    pub icon_work: Option<PathBuf>,

    /// Icon shown during breaks (defaults to an embedded green square)
    #[arg(long = "icon2")]
    pub icon_break: Option<PathBuf>,

    /// URL to push widget updates to
    #[arg(long, conflicts_with = "port")]
    pub url: Option<String>,

    /// BetterTouchTool port, shorthand for its update widget URL
    #[arg(long, requires = "uuid")]
    pub port: Option<u16>,

    /// UUID of the widget to update
    #[arg(long)]
    pub uuid: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Per-mode durations and the long-break cadence, validated.
    pub fn cycle(&self) -> Result<CycleConfig> {
        if !(1..=9).contains(&self.intervals) {
            bail!(
                "Invalid number of intervals {} (must be between 1 and 9)",
                self.intervals
            );
        }
        Ok(CycleConfig {
            work: parse_duration(&self.work).context("Invalid work interval")?,
            short_break: parse_duration(&self.short).context("Invalid short break interval")?,
            long_break: parse_duration(&self.long).context("Invalid long break interval")?,
            intervals: self.intervals,
        })
    }

    /// Background refresh period, validated.
    pub fn tick_period(&self) -> Result<Duration> {
        if !(10..=999).contains(&self.tick) {
            bail!(
                "Invalid tick value {} (must be between 10 and 999 milliseconds)",
                self.tick
            );
        }
        Ok(Duration::from_millis(self.tick))
    }

    pub fn separators(&self) -> Separators {
        Separators {
            work: self.separator.clone(),
            rest: self.separator_break.clone(),
        }
    }

    /// Resolved push destination, if any.
    pub fn push_url(&self) -> Result<Option<Url>> {
        let raw = match (&self.url, self.port) {
            (Some(url), _) => url.clone(),
            (None, Some(port)) => {
                format!("http://127.0.0.1:{}/update_touch_bar_widget/", port)
            }
            (None, None) => return Ok(None),
        };
        let url = Url::parse(&raw).with_context(|| format!("Unable to parse url `{}`", raw))?;
        Ok(Some(url))
    }
}

/// Parses the duration grammar of the interval flags: a positive integer
/// with an optional `m` (minutes) or `s` (seconds) suffix; no suffix means
/// minutes.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let (digits, unit_secs) = if let Some(rest) = s.strip_suffix('m') {
        (rest, 60)
    } else if let Some(rest) = s.strip_suffix('s') {
        (rest, 1)
    } else {
        (s, 60)
    };
    let secs = digits
        .parse::<u64>()
        .ok()
        .filter(|v| *v > 0)
        .and_then(|v| v.checked_mul(unit_secs))
        .with_context(|| format!("Invalid duration `{}`", s))?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Result<Config, clap::Error> {
        let mut argv = vec!["tomatod"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv)
    }

    #[test]
    fn defaults_describe_a_classic_pomodoro() {
        let config = config(&[]).unwrap();
        let cycle = config.cycle().unwrap();

        assert_eq!(config.listen, "0.0.0.0:12321");
        assert_eq!(cycle.work, Duration::from_secs(25 * 60));
        assert_eq!(cycle.short_break, Duration::from_secs(5 * 60));
        assert_eq!(cycle.long_break, Duration::from_secs(15 * 60));
        assert_eq!(cycle.intervals, 4);
        assert_eq!(config.tick_period().unwrap(), Duration::from_millis(100));
        assert!(config.push_url().unwrap().is_none());
    }

    #[test]
    fn duration_grammar_accepts_minutes_seconds_and_bare_numbers() {
        assert_eq!(parse_duration("25m").unwrap(), Duration::from_secs(1500));
        assert_eq!(parse_duration("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("15").unwrap(), Duration::from_secs(900));
    }

    #[test]
    fn duration_grammar_rejects_junk() {
        for bad in ["", "m", "0m", "0", "-5m", "2.5m", "abc", "10x"] {
            assert!(parse_duration(bad).is_err(), "`{}` should not parse", bad);
        }
    }

    #[test]
    fn duration_grammar_rejects_overflowing_minutes() {
        // u64::MAX / 60 rounds down to 307445734561825860.
        assert!(parse_duration("307445734561825861m").is_err());
        assert!(parse_duration("18446744073709551615m").is_err());
        assert!(parse_duration("307445734561825860m").is_ok());
        assert!(parse_duration("18446744073709551615s").is_ok());
    }

    #[test]
    fn interval_count_is_bounded() {
        assert!(config(&["-n", "0"]).unwrap().cycle().is_err());
        assert!(config(&["-n", "10"]).unwrap().cycle().is_err());
        assert!(config(&["-n", "1"]).unwrap().cycle().is_ok());
        assert!(config(&["-n", "9"]).unwrap().cycle().is_ok());
    }

    #[test]
    fn tick_is_bounded() {
        assert!(config(&["--tick", "9"]).unwrap().tick_period().is_err());
        assert!(config(&["--tick", "1000"]).unwrap().tick_period().is_err());
        assert!(config(&["--tick", "10"]).unwrap().tick_period().is_ok());
        assert!(config(&["--tick", "999"]).unwrap().tick_period().is_ok());
    }

    #[test]
    fn port_expands_to_the_widget_update_url() {
        let config = config(&["--port", "44444", "--uuid", "widget-1"]).unwrap();
        let url = config.push_url().unwrap().unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:44444/update_touch_bar_widget/"
        );
    }

    #[test]
    fn url_and_port_are_mutually_exclusive() {
        assert!(config(&["--url", "http://localhost:9", "--port", "1"]).is_err());
    }

    #[test]
    fn port_requires_a_uuid() {
        assert!(config(&["--port", "44444"]).is_err());
    }

    #[test]
    fn unparsable_url_is_an_error() {
        let config = config(&["--url", "not a url"]).unwrap();
        assert!(config.push_url().is_err());
    }
}
