use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Component breakdown of a successfully scored response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Value parsed out of the answer section
    pub prediction: f64,
    /// Parsed ground truth
    pub true_value: f64,
    /// |prediction - truth| / (|truth| + epsilon)
    pub relative_error: f64,
    /// Format adherence (absent for the strict variant, which does not blend it)
    pub format_score: Option<f64>,
    /// Bucketed accuracy score
    pub accuracy_score: f64,
    /// Final score returned to the caller (0.0 to 1.0)
    pub score: f64,
}

/// Result for a single scored case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    /// Data source label the case was scored with
    pub data_source: String,
    /// Raw ground truth string
    pub ground_truth: String,
    /// Final score, 0.0 when scoring failed
    pub score: f64,
    /// Component breakdown when scoring succeeded
    pub breakdown: Option<ScoreBreakdown>,
    /// Reason the case scored 0.0 without a breakdown
    pub failure: Option<String>,
}

/// Statistics calculated across multiple results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Mean for each score component
    pub mean: HashMap<String, f64>,
    /// Median for each score component
    pub median: HashMap<String, f64>,
    /// Mode for each score component (most frequent value)
    pub mode: HashMap<String, f64>,
    /// Number of cases that could not be scored
    pub failures: usize,
}

/// Final results for one suite
#[derive(Debug, Serialize, Deserialize)]
pub struct FinalResults {
    /// Suite title
    pub title: String,
    /// Aggregated statistics
    pub statistics: Statistics,
    /// Individual case results
    pub results: Vec<CaseResult>,
}
