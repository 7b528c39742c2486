//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Formatting defaults.
    #[serde(default)]
    pub format: FormatConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Formatting defaults applied when a caller does not choose explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    /// Whether rendered amounts carry the `R$ ` prefix.
    #[serde(default = "default_show_symbol")]
    pub show_symbol: bool,
}

fn default_show_symbol() -> bool {
    true
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            show_symbol: default_show_symbol(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "moeda=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("MOEDA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
