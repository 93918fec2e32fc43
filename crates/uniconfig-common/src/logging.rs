//! Structured logging setup for UniConfig binaries and tests.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The level directive could not be parsed.
    #[error("Invalid log filter '{directive}': {source}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser error from `tracing-subscriber`.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber was already installed.
    #[error("Failed to install log subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "warn", "debug", "uniconfig_config=trace")
    pub level: String,
    /// Whether to emit JSON lines instead of human-readable text
    pub json_format: bool,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether `RUST_LOG` takes precedence over `level`
    pub respect_env: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            include_targets: true,
            respect_env: true,
        }
    }
}

impl LoggingConfig {
    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        if self.respect_env {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return Ok(filter);
            }
        }

        EnvFilter::try_new(&self.level).map_err(|source| LoggingError::InvalidFilter {
            directive: self.level.clone(),
            source,
        })
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Output goes to stderr so stdout stays reserved for program output.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(config.env_filter()?);

    if config.json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(config.include_targets),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(config.include_targets),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<(), LoggingError> {
    init_logging(&LoggingConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert!(!config.json_format);
        assert!(config.include_targets);
        assert!(config.respect_env);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = LoggingConfig {
            level: "uniconfig=notalevel".to_string(),
            respect_env: false,
            ..LoggingConfig::default()
        };

        let err = config.env_filter().unwrap_err();
        assert!(matches!(err, LoggingError::InvalidFilter { .. }));
    }
}
