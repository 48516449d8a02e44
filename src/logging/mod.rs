//! Logging setup for hosts embedding a session.
//!
//! The session and gateways only emit `tracing` events: phase changes and
//! completed games at `info`, maze requests and discarded responses at
//! `debug`, individual moves and ignored input at `trace`. Nothing is
//! printed unless the host installs a subscriber, which [`init_logging`]
//! does on stderr.

use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a full filter, e.g. `mazerun=trace,reqwest=debug`.
pub const LOG_ENV: &str = "MAZERUN_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Filter used when `MAZERUN_LOG` is unset.
///
/// Verbosity raises this crate's level one step at a time, starting from
/// `info` so completed games are always visible. Dependencies stay at
/// `warn` until the highest level.
pub fn default_directive(verbosity: u8) -> String {
    let own = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let deps = if verbosity >= 3 { "debug" } else { "warn" };
    format!("{deps},mazerun={own}")
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(format: LogFormat, verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity > 0)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Human => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if installed.is_ok() {
        tracing::debug!(?format, verbosity, "logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_crate_level_first() {
        assert_eq!(default_directive(0), "warn,mazerun=info");
        assert_eq!(default_directive(1), "warn,mazerun=debug");
        assert_eq!(default_directive(2), "warn,mazerun=trace");
        assert_eq!(default_directive(3), "debug,mazerun=trace");
        assert_eq!(default_directive(u8::MAX), "debug,mazerun=trace");
    }

    #[test]
    fn directives_parse_as_filters() {
        for verbosity in 0..4 {
            assert!(default_directive(verbosity).parse::<EnvFilter>().is_ok());
        }
    }

    #[test]
    fn format_names() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("Human".parse::<LogFormat>(), Ok(LogFormat::Human));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Human));
        assert!("yaml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Human);
    }

    #[test]
    fn init_logging_is_repeatable() {
        init_logging(LogFormat::Human, 0);
        init_logging(LogFormat::Json, 3);
    }
}
