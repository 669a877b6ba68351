//! Configuration management for the travel planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelAiError;
use crate::llm::LlmProvider;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelAiConfig {
    /// Generative AI provider configuration
    pub llm: LlmConfig,
    /// Itinerary cache configuration
    pub cache: CacheConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
}

/// Generative AI provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which provider to call (gemini or openai)
    pub provider: LlmProvider,
    /// Provider API key
    pub api_key: Option<String>,
    /// Base URL of the provider API; empty selects the provider default
    pub base_url: String,
    /// Model name; empty selects the provider default
    pub model: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    pub max_retries: u32,
}

/// Itinerary cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether generated itineraries are cached at all
    pub enabled: bool,
    /// Cache TTL in hours
    pub ttl_hours: u32,
    /// Cache directory location; empty selects the platform cache dir
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Currency symbol the prompt asks the model to use in the cost summary
    pub currency_symbol: String,
    /// Port for the HTTP API
    pub server_port: u16,
}

// Default value functions
fn default_cache_ttl() -> u32 {
    24
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            api_key: None,
            base_url: String::new(),
            model: String::new(),
            timeout_seconds: 60,
            max_retries: 2,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_hours: default_cache_ttl(),
            location: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            server_port: default_server_port(),
        }
    }
}

impl LlmConfig {
    /// Base URL to use, falling back to the provider default
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        if self.base_url.is_empty() {
            self.provider.default_base_url()
        } else {
            &self.base_url
        }
    }

    /// Model to use, falling back to the provider default
    #[must_use]
    pub fn effective_model(&self) -> &str {
        if self.model.is_empty() {
            self.provider.default_model()
        } else {
            &self.model
        }
    }
}

impl CacheConfig {
    /// Resolve the cache directory
    pub fn resolve_location(&self) -> Result<PathBuf> {
        if !self.location.is_empty() {
            return Ok(PathBuf::from(&self.location));
        }
        dirs::cache_dir()
            .map(|dir| dir.join("travelplanner"))
            .ok_or_else(|| TravelAiError::config("Unable to determine cache directory").into())
    }
}

impl TravelAiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRAVELPLANNER__LLM__API_KEY style overrides
        builder = builder.add_source(
            Environment::with_prefix("TRAVELPLANNER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelAiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelplanner").join("config.toml"))
    }

    /// Apply default values to fields left empty or zero
    pub fn apply_defaults(&mut self) {
        if self.cache.ttl_hours == 0 {
            self.cache.ttl_hours = default_cache_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.currency_symbol.is_empty() {
            self.defaults.currency_symbol = default_currency_symbol();
        }
        if self.defaults.server_port == 0 {
            self.defaults.server_port = default_server_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The key is optional until a generation is requested, but must look sane if set
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.llm.api_key {
            if api_key.trim().is_empty() {
                return Err(TravelAiError::config(
                    "LLM API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() < 8 {
                return Err(TravelAiError::config(
                    "LLM API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }

            if api_key.len() > 200 {
                return Err(TravelAiError::config(
                    "LLM API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.llm.timeout_seconds == 0 || self.llm.timeout_seconds > 300 {
            return Err(
                TravelAiError::config("LLM timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.llm.max_retries > 10 {
            return Err(TravelAiError::config("LLM max retries cannot exceed 10").into());
        }

        if self.cache.ttl_hours > 720 {
            return Err(TravelAiError::config("Cache TTL cannot exceed 720 hours (30 days)").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelAiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelAiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.llm.base_url.is_empty()
            && !self.llm.base_url.starts_with("http://")
            && !self.llm.base_url.starts_with("https://")
        {
            return Err(TravelAiError::config(
                "LLM base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.defaults.currency_symbol.chars().count() != 1 {
            return Err(TravelAiError::config(
                "Currency symbol must be a single character such as $ or €",
            )
            .into());
        }

        Ok(())
    }
}
