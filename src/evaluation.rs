use crate::config::ScorerConfig;
use crate::error::{ScoreError, ScoreResult};
use crate::extraction::{extract_prediction, format_score, parse_float, truncate_tail};
use crate::models::{ScoreBreakdown, Statistics};
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Relative-error buckets as `(exclusive upper bound, score)`, ascending.
const STANDARD_BUCKETS: [(f64, f64); 5] = [
    (0.01, 1.0),
    (0.05, 0.8),
    (0.10, 0.6),
    (0.20, 0.4),
    (0.50, 0.2),
];

const STRICT_BUCKETS: [(f64, f64); 5] = [
    (0.005, 1.0),
    (0.01, 0.8),
    (0.02, 0.6),
    (0.05, 0.4),
    (0.10, 0.2),
];

/// Bucketing table mapping relative error to an accuracy score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyTable {
    Standard,
    Strict,
}

impl AccuracyTable {
    fn buckets(self) -> &'static [(f64, f64)] {
        match self {
            AccuracyTable::Standard => &STANDARD_BUCKETS,
            AccuracyTable::Strict => &STRICT_BUCKETS,
        }
    }

    /// Score of the first bucket whose bound exceeds `relative_error`, else 0.0
    pub fn score(self, relative_error: f64) -> f64 {
        self.buckets()
            .iter()
            .find(|(bound, _)| relative_error < *bound)
            .map_or(0.0, |(_, score)| *score)
    }
}

/// |prediction - truth| / (|truth| + epsilon)
pub fn relative_error(prediction: f64, truth: f64, epsilon: f64) -> f64 {
    (prediction - truth).abs() / (truth.abs() + epsilon)
}

/// Scores model responses against numeric ground truth
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScorerConfig,
}

impl Scorer {
    /// Create a scorer, rejecting configurations that could score outside [0, 1]
    pub fn new(config: ScorerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Primary composite score. Never fails; any scoring error yields 0.0.
    ///
    /// `extra_info` is accepted for interface compatibility and ignored.
    pub fn compute_score(
        &self,
        data_source: &str,
        solution_str: &str,
        ground_truth: &str,
        _extra_info: Option<&HashMap<String, Value>>,
    ) -> f64 {
        Self::score_or_zero(self.evaluate(data_source, solution_str, ground_truth))
    }

    /// Strict score. Never fails; any scoring error yields 0.0.
    pub fn compute_score_strict(
        &self,
        data_source: &str,
        solution_str: &str,
        ground_truth: &str,
        _extra_info: Option<&HashMap<String, Value>>,
    ) -> f64 {
        Self::score_or_zero(self.evaluate_strict(data_source, solution_str, ground_truth))
    }

    /// Score a response with the standard table, blending in the format score.
    ///
    /// Only the last `tail_window` characters of the response are inspected.
    /// The data source is checked only when `filter_primary_data_source` is set.
    pub fn evaluate(
        &self,
        data_source: &str,
        solution_str: &str,
        ground_truth: &str,
    ) -> ScoreResult<ScoreBreakdown> {
        if self.config.filter_primary_data_source {
            self.check_data_source(data_source)?;
        }

        let original_len = solution_str.len();
        let solution_str = truncate_tail(solution_str, self.config.tail_window);
        if solution_str.len() < original_len {
            debug!(
                original_bytes = original_len,
                kept_bytes = solution_str.len(),
                "Truncated response to its tail window"
            );
        }

        let prediction = extract_prediction(solution_str)?;
        let format = format_score(solution_str);
        let true_value = Self::parse_ground_truth(ground_truth)?;

        let relative_error = relative_error(prediction, true_value, self.config.epsilon);
        let accuracy = AccuracyTable::Standard.score(relative_error);
        let score = format * self.config.format_weight + accuracy * self.config.accuracy_weight;

        Ok(ScoreBreakdown {
            prediction,
            true_value,
            relative_error,
            format_score: Some(format),
            accuracy_score: accuracy,
            score,
        })
    }

    /// Score a response with the strict table and no format blending.
    ///
    /// The whole response is inspected and the data source must match.
    pub fn evaluate_strict(
        &self,
        data_source: &str,
        solution_str: &str,
        ground_truth: &str,
    ) -> ScoreResult<ScoreBreakdown> {
        self.check_data_source(data_source)?;

        let prediction = extract_prediction(solution_str)?;
        let true_value = Self::parse_ground_truth(ground_truth)?;

        let relative_error = relative_error(prediction, true_value, self.config.epsilon);
        let accuracy = AccuracyTable::Strict.score(relative_error);

        Ok(ScoreBreakdown {
            prediction,
            true_value,
            relative_error,
            format_score: None,
            accuracy_score: accuracy,
            score: accuracy,
        })
    }

    fn check_data_source(&self, data_source: &str) -> ScoreResult<()> {
        if data_source == self.config.data_source {
            Ok(())
        } else {
            Err(ScoreError::DataSourceMismatch {
                expected: self.config.data_source.clone(),
                actual: data_source.to_string(),
            })
        }
    }

    fn parse_ground_truth(ground_truth: &str) -> ScoreResult<f64> {
        parse_float(ground_truth).ok_or_else(|| ScoreError::InvalidGroundTruth {
            raw: ground_truth.to_string(),
        })
    }

    fn score_or_zero(result: ScoreResult<ScoreBreakdown>) -> f64 {
        match result {
            Ok(breakdown) => breakdown.score,
            Err(e) => {
                debug!(reason = %e, "Response scored 0.0");
                0.0
            }
        }
    }

    /// Calculate statistics across scored cases.
    ///
    /// `scores` holds the final score of every case, including failures, so
    /// the `score` component reflects what a training loop would observe.
    pub fn calculate_statistics(
        &self,
        scores: &[f64],
        breakdowns: &[&ScoreBreakdown],
    ) -> Statistics {
        let mut statistics = Statistics {
            failures: scores.len().saturating_sub(breakdowns.len()),
            ..Statistics::default()
        };

        let accuracy: Vec<f64> = breakdowns.iter().map(|b| b.accuracy_score).collect();
        let format: Vec<f64> = breakdowns.iter().filter_map(|b| b.format_score).collect();

        let components = [
            ("score", scores),
            ("accuracy", &accuracy[..]),
            ("format", &format[..]),
        ];
        for (component, values) in components {
            if values.is_empty() {
                continue;
            }
            statistics
                .mean
                .insert(component.to_string(), self.calculate_mean(values));
            statistics
                .median
                .insert(component.to_string(), self.calculate_median(values));
            statistics
                .mode
                .insert(component.to_string(), self.calculate_mode(values));
        }

        statistics
    }

    /// Calculate mean of scores
    fn calculate_mean(&self, scores: &[f64]) -> f64 {
        let sum: f64 = scores.iter().sum();
        sum / scores.len() as f64
    }

    /// Calculate median of scores
    fn calculate_median(&self, scores: &[f64]) -> f64 {
        let mut sorted_scores = scores.to_vec();
        sorted_scores.sort_by(|a, b| a.total_cmp(b));

        let mid = sorted_scores.len() / 2;
        if sorted_scores.len() % 2 == 0 {
            (sorted_scores[mid - 1] + sorted_scores[mid]) / 2.0
        } else {
            sorted_scores[mid]
        }
    }

    /// Calculate mode of scores (most frequent value, rounded to 1 decimal place).
    /// Ties go to the smaller value.
    fn calculate_mode(&self, scores: &[f64]) -> f64 {
        let mut frequency: HashMap<i64, usize> = HashMap::new();

        for &score in scores {
            *frequency.entry((score * 10.0).round() as i64).or_insert(0) += 1;
        }

        frequency
            .into_iter()
            .max_by(|(a_key, a_count), (b_key, b_count)| {
                a_count.cmp(b_count).then_with(|| b_key.cmp(a_key))
            })
            .map_or(0.0, |(key, _)| key as f64 / 10.0)
    }
}

/// Primary composite score with the default configuration
pub fn compute_score(
    data_source: &str,
    solution_str: &str,
    ground_truth: &str,
    extra_info: Option<&HashMap<String, Value>>,
) -> f64 {
    Scorer::default().compute_score(data_source, solution_str, ground_truth, extra_info)
}

/// Strict score with the default configuration
pub fn compute_score_strict(
    data_source: &str,
    solution_str: &str,
    ground_truth: &str,
    extra_info: Option<&HashMap<String, Value>>,
) -> f64 {
    Scorer::default().compute_score_strict(data_source, solution_str, ground_truth, extra_info)
}
