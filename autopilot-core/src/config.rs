//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/social-autopilot/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/social-autopilot/` (~/.config/social-autopilot/)
//! - State/Logs: `$XDG_STATE_HOME/social-autopilot/` (~/.local/state/social-autopilot/)
//!
//! Every field has a default, so an absent file or section yields the
//! reference scoring policy.

use crate::analytics::AnalysisPolicy;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "social-autopilot";
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Identity and conversation settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Live health-score policy
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// "No contact" projection policy
    #[serde(default)]
    pub decay: DecayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Identity and conversation settings
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// The identity whose relationships are assessed
    #[serde(default = "default_self_identity")]
    pub self_identity: String,

    /// Hours of silence after which the next message opens a new conversation
    #[serde(default = "default_conversation_gap_hours")]
    pub conversation_gap_hours: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            self_identity: default_self_identity(),
            conversation_gap_hours: default_conversation_gap_hours(),
        }
    }
}

fn default_self_identity() -> String {
    "You".to_string()
}

fn default_conversation_gap_hours() -> f64 {
    6.0
}

/// Weights of the five live sub-scores. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub recency_weight: f64,
    pub frequency_weight: f64,
    pub reciprocity_weight: f64,
    pub trend_weight: f64,
    pub response_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            recency_weight: 0.35,
            frequency_weight: 0.20,
            reciprocity_weight: 0.15,
            trend_weight: 0.15,
            response_weight: 0.15,
        }
    }
}

impl ScoringWeights {
    fn as_array(&self) -> [f64; 5] {
        [
            self.recency_weight,
            self.frequency_weight,
            self.reciprocity_weight,
            self.trend_weight,
            self.response_weight,
        ]
    }

    /// Validate weights, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        validate_weights("scoring", &self.as_array())
    }
}

/// Live health-score policy
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(flatten)]
    pub weights: ScoringWeights,

    /// Recency points lost per day of silence
    #[serde(default = "default_recency_decay_per_day")]
    pub recency_decay_per_day: f64,

    /// Reciprocity points lost per percentage point away from 50% initiation
    #[serde(default = "default_reciprocity_penalty")]
    pub reciprocity_penalty: f64,

    /// Multiplier applied to the recent share of all interactions
    #[serde(default = "default_frequency_multiplier")]
    pub frequency_multiplier: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            recency_decay_per_day: default_recency_decay_per_day(),
            reciprocity_penalty: default_reciprocity_penalty(),
            frequency_multiplier: default_frequency_multiplier(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        validate_constant("scoring.recency_decay_per_day", self.recency_decay_per_day)?;
        validate_constant("scoring.reciprocity_penalty", self.reciprocity_penalty)?;
        validate_constant("scoring.frequency_multiplier", self.frequency_multiplier)
    }
}

fn default_recency_decay_per_day() -> f64 {
    2.5
}

fn default_reciprocity_penalty() -> f64 {
    1.5
}

fn default_frequency_multiplier() -> f64 {
    150.0
}

/// Weights of the four sub-scores used by the silence projection. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecayWeights {
    pub recency_weight: f64,
    pub frequency_weight: f64,
    pub reciprocity_weight: f64,
    pub trend_weight: f64,
}

impl Default for DecayWeights {
    fn default() -> Self {
        Self {
            recency_weight: 0.4,
            frequency_weight: 0.2,
            reciprocity_weight: 0.2,
            trend_weight: 0.2,
        }
    }
}

impl DecayWeights {
    pub fn validate(&self) -> Result<()> {
        validate_weights(
            "decay",
            &[
                self.recency_weight,
                self.frequency_weight,
                self.reciprocity_weight,
                self.trend_weight,
            ],
        )
    }
}

/// "No contact" projection policy
///
/// The projection decays recency faster than live scoring (3 vs 2.5
/// points per day) and penalizes one-sided initiation harder (2 vs 1.5).
#[derive(Debug, Clone, Deserialize)]
pub struct DecayConfig {
    #[serde(flatten)]
    pub weights: DecayWeights,

    /// Days of silence added per projection
    #[serde(default = "default_silence_days")]
    pub silence_days: u32,

    #[serde(default = "default_decay_recency_per_day")]
    pub recency_decay_per_day: f64,

    #[serde(default = "default_decay_reciprocity_penalty")]
    pub reciprocity_penalty: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            weights: DecayWeights::default(),
            silence_days: default_silence_days(),
            recency_decay_per_day: default_decay_recency_per_day(),
            reciprocity_penalty: default_decay_reciprocity_penalty(),
        }
    }
}

impl DecayConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        validate_constant("decay.recency_decay_per_day", self.recency_decay_per_day)?;
        validate_constant("decay.reciprocity_penalty", self.reciprocity_penalty)
    }
}

fn default_silence_days() -> u32 {
    30
}

fn default_decay_recency_per_day() -> f64 {
    3.0
}

fn default_decay_reciprocity_penalty() -> f64 {
    2.0
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

fn validate_weights(section: &str, weights: &[f64]) -> Result<()> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(Error::Config(format!(
            "{section} weights must be finite and non-negative"
        )));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(Error::Config(format!(
            "{section} weights must sum to 1.0 (got {sum})"
        )));
    }
    Ok(())
}

pub(crate) fn validate_constant(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::Config(format!(
            "{name} must be finite and non-negative (got {value})"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate every policy section
    pub fn validate(&self) -> Result<()> {
        if self.engine.self_identity.trim().is_empty() {
            return Err(Error::Config(
                "engine.self_identity must not be empty".to_string(),
            ));
        }
        validate_constant(
            "engine.conversation_gap_hours",
            self.engine.conversation_gap_hours,
        )?;
        self.scoring.validate()?;
        self.decay.validate()
    }

    /// Build the analysis policy used by the engine
    pub fn policy(&self) -> AnalysisPolicy {
        AnalysisPolicy {
            self_identity: self.engine.self_identity.clone(),
            conversation_gap_hours: self.engine.conversation_gap_hours,
            scoring: self.scoring.clone(),
        }
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/social-autopilot/config.toml`
    pub fn config_path() -> PathBuf {
        xdg_config_home().join(APP_DIR).join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/social-autopilot/`
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join(APP_DIR)
    }

    /// Returns the log file path
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("social-autopilot.log")
    }
}
