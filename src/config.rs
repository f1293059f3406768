use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Label accepted by the strict entry point
pub const EBITDA_DATA_SOURCE: &str = "ebitda_prediction";

/// Tunable parameters of the scorer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Number of trailing characters of a response kept by the primary entry point
    pub tail_window: usize,
    /// Added to |truth| when computing relative error
    pub epsilon: f64,
    /// Weight of the format score in the composite score
    pub format_weight: f64,
    /// Weight of the accuracy score in the composite score
    pub accuracy_weight: f64,
    /// Data source label the filter accepts
    pub data_source: String,
    /// Apply the data source filter to the primary entry point as well
    pub filter_primary_data_source: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            tail_window: 300,
            epsilon: 1e-6,
            format_weight: 0.1,
            accuracy_weight: 0.9,
            data_source: EBITDA_DATA_SOURCE.to_string(),
            filter_primary_data_source: false,
        }
    }
}

impl ScorerConfig {
    /// Check that the configuration keeps every score within [0, 1]
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tail_window > 0, "tail_window must be positive");
        ensure!(
            self.epsilon.is_finite() && self.epsilon >= 0.0,
            "epsilon must be a finite, non-negative number, got {}",
            self.epsilon
        );
        for (name, weight) in [
            ("format_weight", self.format_weight),
            ("accuracy_weight", self.accuracy_weight),
        ] {
            ensure!(
                weight.is_finite() && weight >= 0.0,
                "{} must be a finite, non-negative number, got {}",
                name,
                weight
            );
        }
        let total = self.format_weight + self.accuracy_weight;
        ensure!(
            (total - 1.0).abs() <= 1e-9,
            "format_weight + accuracy_weight must equal 1.0, got {}",
            total
        );
        Ok(())
    }
}

/// Which entry point a suite is scored with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Standard,
    Strict,
}

/// A single response to score
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaseConfig {
    /// Data source label passed to the scorer
    #[serde(default = "default_data_source")]
    pub data_source: String,
    /// Raw model response
    pub solution: String,
    /// Ground truth value as text
    pub ground_truth: String,
}

fn default_data_source() -> String {
    EBITDA_DATA_SOURCE.to_string()
}

/// A named group of cases scored with the same variant
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuiteConfig {
    /// Title of the suite
    pub title: String,
    /// Scoring variant
    #[serde(default)]
    pub variant: Variant,
    /// Cases to score
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
    /// Optional local path to store results as JSON
    #[serde(default)]
    pub storage_path: Option<String>,
}

/// Root configuration of a batch run
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Scorer parameters shared by all suites
    #[serde(default)]
    pub scorer: ScorerConfig,
    /// List of suites
    #[serde(default)]
    pub suites: Vec<SuiteConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?;

        config
            .scorer
            .validate()
            .with_context(|| format!("Invalid scorer settings in {}", path.display()))?;

        Ok(config)
    }
}
