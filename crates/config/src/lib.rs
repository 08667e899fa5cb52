//! Configuration loading, validation, and management for kbgauge.
//!
//! Loads configuration from `~/.kbgauge/config.toml` with environment
//! variable overrides. Every section has defaults, so a missing file is a
//! valid (default) configuration.

use kbgauge_core::ContentKind;
use kbgauge_core::category::DEFAULT_CATEGORY_WEIGHTS;
use kbgauge_core::plan::{DEFAULT_MAX_PROMPT_TOKENS, RESERVED_BASE_TOKENS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.kbgauge/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plan used when a request does not name one
    #[serde(default = "default_plan")]
    pub default_plan: String,

    /// Token estimation and budget allocation
    #[serde(default)]
    pub budget: BudgetConfig,

    /// Prompt limits per subscription plan
    #[serde(default = "default_plans")]
    pub plans: BTreeMap<String, PlanConfig>,

    /// Limits applied to plan ids missing from `plans`
    #[serde(default)]
    pub default_plan_limits: PlanConfig,

    /// Quality scoring settings
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Placeholder / generic content classifier tunables
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

fn default_plan() -> String {
    "starter".into()
}

fn default_plans() -> BTreeMap<String, PlanConfig> {
    [
        ("starter", 4_000),
        ("growth", 8_000),
        ("pro", 12_000),
        ("enterprise", 24_000),
    ]
    .into_iter()
    .map(|(id, max)| {
        (
            id.to_string(),
            PlanConfig {
                max_prompt_tokens: max,
            },
        )
    })
    .collect()
}

// ── Budget ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Tokens reserved for the non-KB part of the prompt
    #[serde(default = "default_reserved_base_tokens")]
    pub reserved_base_tokens: usize,

    /// Characters per token used by the estimator (lower = more conservative)
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: f64,

    /// Fixed token overhead added to every item
    #[serde(default = "default_item_overhead_tokens")]
    pub item_overhead_tokens: usize,

    /// Relative share of the KB budget per content kind
    #[serde(default)]
    pub kind_shares: KindShares,

    /// Instruction type priority overrides (type tag → priority)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub instruction_priority: BTreeMap<String, u32>,
}

fn default_reserved_base_tokens() -> usize {
    RESERVED_BASE_TOKENS
}
fn default_chars_per_token() -> f64 {
    3.5
}
fn default_item_overhead_tokens() -> usize {
    4
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            reserved_base_tokens: default_reserved_base_tokens(),
            chars_per_token: default_chars_per_token(),
            item_overhead_tokens: default_item_overhead_tokens(),
            kind_shares: KindShares::default(),
            instruction_priority: BTreeMap::new(),
        }
    }
}

/// Proportional split of the KB budget across content kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindShares {
    #[serde(default = "default_instructions_share")]
    pub instructions: u32,
    #[serde(default = "default_policies_share")]
    pub policies: u32,
    #[serde(default = "default_competitors_share")]
    pub competitors: u32,
    #[serde(default = "default_templates_share")]
    pub templates: u32,
    #[serde(default = "default_articles_share")]
    pub articles: u32,
}

fn default_instructions_share() -> u32 {
    35
}
fn default_policies_share() -> u32 {
    25
}
fn default_competitors_share() -> u32 {
    15
}
fn default_templates_share() -> u32 {
    15
}
fn default_articles_share() -> u32 {
    10
}

impl Default for KindShares {
    fn default() -> Self {
        Self {
            instructions: default_instructions_share(),
            policies: default_policies_share(),
            competitors: default_competitors_share(),
            templates: default_templates_share(),
            articles: default_articles_share(),
        }
    }
}

impl KindShares {
    pub fn share(&self, kind: ContentKind) -> u32 {
        match kind {
            ContentKind::Instructions => self.instructions,
            ContentKind::Policies => self.policies,
            ContentKind::Competitors => self.competitors,
            ContentKind::Templates => self.templates,
            ContentKind::Articles => self.articles,
        }
    }

    pub fn total(&self) -> u32 {
        ContentKind::ALL.iter().map(|k| self.share(*k)).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    pub max_prompt_tokens: usize,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            max_prompt_tokens: DEFAULT_MAX_PROMPT_TOKENS,
        }
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Vertical whose field catalog is used when none is given
    #[serde(default = "default_vertical")]
    pub default_vertical: String,

    /// Fraction of a field's points required to count it as completed
    #[serde(default = "default_completion_tolerance")]
    pub completion_tolerance: f64,

    /// Quality points removed from generic (non-placeholder) content
    #[serde(default = "default_generic_penalty")]
    pub generic_penalty: f64,

    /// Category weights, in reporting order; must sum to 100
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryWeightConfig>,
}

fn default_vertical() -> String {
    "general".into()
}
fn default_categories() -> Vec<CategoryWeightConfig> {
    DEFAULT_CATEGORY_WEIGHTS
        .iter()
        .map(|(key, weight)| CategoryWeightConfig {
            key: (*key).to_string(),
            weight: *weight,
        })
        .collect()
}
fn default_completion_tolerance() -> f64 {
    0.69
}
fn default_generic_penalty() -> f64 {
    20.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_vertical: default_vertical(),
            completion_tolerance: default_completion_tolerance(),
            generic_penalty: default_generic_penalty(),
            categories: default_categories(),
        }
    }
}

impl ScoringConfig {
    /// Weight for a category key; unknown categories weigh nothing.
    pub fn category_weight(&self, key: &str) -> f64 {
        self.categories
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.weight)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWeightConfig {
    pub key: String,
    pub weight: f64,
}

// ── Classifier ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Confidence at or above which content counts as placeholder (0–100)
    #[serde(default = "default_placeholder_threshold")]
    pub placeholder_threshold: u8,

    /// Long unspecific text needs at least this many meaningful words
    #[serde(default = "default_min_meaningful_words")]
    pub min_meaningful_words: usize,

    /// Vague-word counting only applies below this many characters
    #[serde(default = "default_vague_max_length")]
    pub vague_max_length: usize,

    /// Meaningful-word counting only applies above this many characters
    #[serde(default = "default_specificity_min_length")]
    pub specificity_min_length: usize,

    /// Vowel-ratio check only applies up to this many characters
    #[serde(default = "default_keyboard_max_length")]
    pub keyboard_max_length: usize,
}

fn default_placeholder_threshold() -> u8 {
    70
}
fn default_min_meaningful_words() -> usize {
    3
}
fn default_vague_max_length() -> usize {
    200
}
fn default_specificity_min_length() -> usize {
    100
}
fn default_keyboard_max_length() -> usize {
    50
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            placeholder_threshold: default_placeholder_threshold(),
            min_meaningful_words: default_min_meaningful_words(),
            vague_max_length: default_vague_max_length(),
            specificity_min_length: default_specificity_min_length(),
            keyboard_max_length: default_keyboard_max_length(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from the default path (~/.kbgauge/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `KBGAUGE_RESERVED_TOKENS`
    /// - `KBGAUGE_DEFAULT_PLAN`
    /// - `KBGAUGE_VERTICAL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw) = std::env::var("KBGAUGE_RESERVED_TOKENS") {
            self.budget.reserved_base_tokens = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "KBGAUGE_RESERVED_TOKENS must be a non-negative integer, got '{raw}'"
                ))
            })?;
        }
        if let Ok(plan) = std::env::var("KBGAUGE_DEFAULT_PLAN") {
            self.default_plan = plan;
        }
        if let Ok(vertical) = std::env::var("KBGAUGE_VERTICAL") {
            self.scoring.default_vertical = vertical;
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".kbgauge")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.budget.chars_per_token.is_finite() && self.budget.chars_per_token > 0.0) {
            return Err(ConfigError::ValidationError(
                "budget.chars_per_token must be a positive number".into(),
            ));
        }

        if self.budget.kind_shares.total() == 0 {
            return Err(ConfigError::ValidationError(
                "budget.kind_shares must not all be zero".into(),
            ));
        }

        let weight_sum: f64 = self.scoring.categories.iter().map(|c| c.weight).sum();
        if (weight_sum - 100.0).abs() > 1e-6 {
            return Err(ConfigError::ValidationError(format!(
                "scoring.categories weights must sum to 100 (got {weight_sum})"
            )));
        }

        if self.scoring.categories.iter().any(|c| c.weight < 0.0) {
            return Err(ConfigError::ValidationError(
                "scoring.categories weights must not be negative".into(),
            ));
        }

        let tol = self.scoring.completion_tolerance;
        if !(tol > 0.0 && tol <= 1.0) {
            return Err(ConfigError::ValidationError(
                "scoring.completion_tolerance must be in (0, 1]".into(),
            ));
        }

        if self.classifier.placeholder_threshold > 100 {
            return Err(ConfigError::ValidationError(
                "classifier.placeholder_threshold must be between 0 and 100".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_plan: default_plan(),
            budget: BudgetConfig::default(),
            plans: default_plans(),
            default_plan_limits: PlanConfig::default(),
            scoring: ScoringConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_plan, "starter");
        assert_eq!(config.budget.reserved_base_tokens, 4000);
        assert_eq!(config.plans["starter"].max_prompt_tokens, 4000);
        assert_eq!(config.scoring.categories.len(), 5);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_plan, config.default_plan);
        assert_eq!(parsed.plans.len(), config.plans.len());
        assert_eq!(parsed.budget.chars_per_token, 3.5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let toml_str = r#"
default_plan = "pro"

[budget]
reserved_base_tokens = 3000

[budget.instruction_priority]
custom = 99

[plans.custom_plan]
max_prompt_tokens = 9000
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_plan, "pro");
        assert_eq!(config.budget.reserved_base_tokens, 3000);
        assert_eq!(config.budget.chars_per_token, 3.5);
        assert_eq!(config.budget.kind_shares.instructions, 35);
        assert_eq!(config.budget.instruction_priority["custom"], 99);
        // An explicit plans table replaces the default one.
        assert_eq!(config.plans.len(), 1);
        assert_eq!(config.scoring.default_vertical, "general");
    }

    #[test]
    fn category_weights_must_sum_to_one_hundred() {
        let mut config = AppConfig::default();
        config.scoring.categories[0].weight = 10.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 100"));
    }

    #[test]
    fn non_positive_chars_per_token_rejected() {
        let mut config = AppConfig::default();
        config.budget.chars_per_token = 0.0;
        assert!(config.validate().is_err());
        config.budget.chars_per_token = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_kind_shares_rejected() {
        let mut config = AppConfig::default();
        config.budget.kind_shares = KindShares {
            instructions: 0,
            policies: 0,
            competitors: 0,
            templates: 0,
            articles: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn tolerance_out_of_range_rejected() {
        let mut config = AppConfig::default();
        config.scoring.completion_tolerance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_category_weighs_zero() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.category_weight("identity"), 30.0);
        assert_eq!(scoring.category_weight("mystery"), 0.0);
    }

    #[test]
    fn kind_shares_lookup() {
        let shares = KindShares::default();
        assert_eq!(shares.total(), 100);
        assert_eq!(shares.share(ContentKind::Articles), 10);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.default_plan, "starter");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[classifier]\nmin_meaningful_words = 5").unwrap();
        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.classifier.min_meaningful_words, 5);
        assert_eq!(config.classifier.placeholder_threshold, 70);
    }

    #[test]
    fn invalid_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_plan = [").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("starter"));
        assert!(toml_str.contains("reserved_base_tokens"));
    }
}
