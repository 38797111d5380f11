//! Logging setup for hosts embedding the dx services
//!
//! Libraries in this workspace only emit `tracing` events; whoever owns the
//! process calls [`init`] once to install a subscriber. `RUST_LOG` takes
//! precedence over the configured filter.

use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub default_filter: String,

    /// Emit JSON lines instead of pretty console output
    pub json: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Whether to log span open/close (request timing)
    pub enable_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info,dx_services=debug,dx_table_designer=debug,dx_row_editor=debug"
                .to_string(),
            json: false,
            include_location: cfg!(debug_assertions),
            enable_spans: cfg!(debug_assertions),
        }
    }
}

impl LoggingConfig {
    /// JSON output, quieter filter
    pub fn production() -> Self {
        Self {
            default_filter: "warn,dx_services=info".to_string(),
            json: true,
            include_location: false,
            enable_spans: false,
        }
    }

    pub fn testing() -> Self {
        Self {
            default_filter: "debug".to_string(),
            json: false,
            include_location: true,
            enable_spans: false,
        }
    }
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))?;

    // NEW fires once per span; ENTER would repeat on every async re-poll.
    let span_events = if config.enable_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = if config.json {
        fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_span_events(span_events)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_span_events(span_events)
            .pretty()
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry().with(layer).try_init()?;

    tracing::debug!(json = config.json, "Logging initialized");
    Ok(())
}

/// Initialize with the build's default configuration
pub fn init_default() -> anyhow::Result<()> {
    let config = if cfg!(debug_assertions) {
        LoggingConfig::default()
    } else {
        LoggingConfig::production()
    };
    init(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // Either this call or an earlier one in the process installed the
        // subscriber; the next call must fail.
        let _ = init(LoggingConfig::testing());
        assert!(init(LoggingConfig::testing()).is_err());
    }
}
