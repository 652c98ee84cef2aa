//! Provides utilities to initialize logging.
use std::env;

use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Environment variable name for the service label, which is appended to the
/// whoami string.
pub const SVC_LABEL_ENVVAR: &str = "BLS_KEYGEN_SVC_LABEL";

/// Configuration for the logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// The whoami string, which is used to identify the tool in logs.
    whoami: String,

    /// Whether to print the source file of each event.
    with_file: bool,

    /// Whether to print the source line of each event.
    with_line_number: bool,
}

impl LoggerConfig {
    /// Creates a new instance with whoami set and source locations taken from
    /// the `LOG_FILE` and `LOG_LINE_NUM` envvars.
    pub fn new(whoami: String) -> Self {
        Self {
            whoami,
            with_file: env::var("LOG_FILE").is_ok_and(|v| v == "1"),
            with_line_number: env::var("LOG_LINE_NUM").is_ok_and(|v| v == "1"),
        }
    }

    /// Creates a new instance with the whoami string set to the provided
    /// string.
    pub fn with_base_name(s: &str) -> Self {
        Self::new(get_whoami_string(s))
    }

    /// The whoami string.
    pub fn whoami(&self) -> &str {
        &self.whoami
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name("(bls-keygen)")
    }
}

/// Initializes the logging subsystem with the provided config.
///
/// Events go to stderr so that stdout only carries command output. The
/// filter comes from `RUST_LOG` and defaults to `warn`.
pub fn init(config: LoggerConfig) {
    let filt = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level_filters::LevelFilter::WARN.into())
        .from_env_lossy();

    let stderr_sub = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_file(config.with_file)
                .with_line_number(config.with_line_number),
        )
        .with_filter(filt);

    tracing_subscriber::registry().with(stderr_sub).init();

    debug!(whoami = %config.whoami(), "logging started");
}

/// Gets the service label from the standard envvar, which should be included
/// in the whoami string.
pub fn get_service_label_from_env() -> Option<String> {
    env::var(SVC_LABEL_ENVVAR).ok()
}

/// Computes a standard whoami string.
pub fn get_whoami_string(base: &str) -> String {
    match get_service_label_from_env() {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whoami_without_label() {
        if get_service_label_from_env().is_none() {
            assert_eq!(get_whoami_string("keygen"), "keygen");
        }
    }

    #[test]
    fn test_config_keeps_whoami() {
        let config = LoggerConfig::new("derive".to_string());
        assert_eq!(config.whoami(), "derive");
    }
}
