//! Tracing subscriber setup for the `afw` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is
//! left to the binary so embedding applications keep control of output.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::{LogFormat, LogLevel, LoggingConfig};

fn to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays
/// clean for JSON output.
///
/// `verbose` raises the threshold to `debug` regardless of config.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        to_level(config.level)
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(to_level(LogLevel::Warn), Level::WARN);
        assert_eq!(to_level(LogLevel::default()), Level::INFO);
    }
}
