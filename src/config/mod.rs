//! Configuration management.
//!
//! Every threshold the decision rules depend on lives here as a named,
//! overridable field rather than a literal in the code. Values resolve in
//! order: built-in defaults, then a TOML config file, then `CREDEQ_*`
//! environment variables.

use crate::models::Grade;
use serde::Deserialize;

/// Main configuration for the analysis engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum fuzzy-match score (0-100) a subject line must reach before
    /// grade/credit extraction is attempted around it.
    pub min_match_score: f64,
    /// Minimum similarity percentage (0-100) for `similarity_ok`.
    pub min_similarity_percent: f64,
    /// Minimum passing grade for `grade_ok`.
    pub min_passing_grade: Grade,
    /// Minimum credit hours for `credit_ok`.
    pub min_credit_hours: u32,
    /// Lines searched on each side of a located subject line.
    pub window_radius: usize,
    /// Generative extraction service configuration.
    pub llm: LlmConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Generative extraction service configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Whether the generative fallback is attempted at all.
    pub enabled: bool,
    /// Base URL of the service (for self-hosted).
    pub endpoint: Option<String>,
    /// Model name.
    pub model: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: None,
            model: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default)]
pub struct LoggingSettings {
    /// Log format: "pretty" (default) or "json".
    pub format: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Minimum fuzzy-match score.
    pub min_match_score: Option<f64>,
    /// Minimum similarity percentage.
    pub min_similarity_percent: Option<f64>,
    /// Minimum passing grade token, e.g. "C".
    pub min_passing_grade: Option<String>,
    /// Minimum credit hours.
    pub min_credit_hours: Option<u32>,
    /// Extraction window radius.
    pub window_radius: Option<usize>,
    /// LLM configuration.
    pub llm: Option<ConfigFileLlm>,
    /// Logging configuration.
    pub logging: Option<ConfigFileLogging>,
}

/// LLM section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLlm {
    /// Whether the generative fallback is enabled.
    pub enabled: Option<bool>,
    /// Base URL.
    pub endpoint: Option<String>,
    /// Model name.
    pub model: Option<String>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLogging {
    /// Log format: "pretty" or "json".
    pub format: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_match_score: 80.0,
            min_similarity_percent: 80.0,
            min_passing_grade: Grade::C,
            min_credit_hours: 3,
            window_radius: 3,
            llm: LlmConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/credeq/` on macOS)
    /// 2. XDG config dir (`~/.config/credeq/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("credeq").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("credeq")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `EngineConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(score) = file.min_match_score {
            config.min_match_score = score;
        }
        if let Some(percent) = file.min_similarity_percent {
            config.min_similarity_percent = percent;
        }
        if let Some(grade) = file.min_passing_grade {
            if let Some(parsed) = Grade::parse(&grade) {
                config.min_passing_grade = parsed;
            }
        }
        if let Some(hours) = file.min_credit_hours {
            config.min_credit_hours = hours;
        }
        if let Some(radius) = file.window_radius {
            config.window_radius = radius;
        }
        if let Some(llm) = file.llm {
            if let Some(enabled) = llm.enabled {
                config.llm.enabled = enabled;
            }
            config.llm.endpoint = llm.endpoint;
            config.llm.model = llm.model;
        }
        if let Some(logging) = file.logging {
            config.logging.format = logging.format;
        }

        config
    }

    /// Applies `CREDEQ_*` environment-variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(score) = env_parse("CREDEQ_MIN_MATCH_SCORE") {
            self.min_match_score = score;
        }
        if let Some(percent) = env_parse("CREDEQ_MIN_SIMILARITY_PERCENT") {
            self.min_similarity_percent = percent;
        }
        if let Ok(grade) = std::env::var("CREDEQ_MIN_PASSING_GRADE") {
            if let Some(parsed) = Grade::parse(&grade) {
                self.min_passing_grade = parsed;
            }
        }
        if let Some(hours) = env_parse("CREDEQ_MIN_CREDIT_HOURS") {
            self.min_credit_hours = hours;
        }
        if let Some(radius) = env_parse("CREDEQ_WINDOW_RADIUS") {
            self.window_radius = radius;
        }
        if let Ok(enabled) = std::env::var("CREDEQ_LLM_ENABLED") {
            self.llm.enabled = matches!(enabled.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Ok(endpoint) = std::env::var("CREDEQ_LLM_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.llm.endpoint = Some(endpoint);
            }
        }
        if let Ok(model) = std::env::var("CREDEQ_LLM_MODEL") {
            if !model.trim().is_empty() {
                self.llm.model = Some(model);
            }
        }
        self
    }
}

/// Parses an environment variable, ignoring unset or malformed values.
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
