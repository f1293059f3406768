use thiserror::Error;

/// Reasons a response could not be scored.
///
/// These never reach callers of the composite entry points; they are
/// collapsed to a score of `0.0` there and kept distinct for diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("no <answer>...</answer> section found")]
    MissingAnswer,

    #[error("answer section is not a number: {raw:?}")]
    InvalidPrediction { raw: String },

    #[error("ground truth is not a number: {raw:?}")]
    InvalidGroundTruth { raw: String },

    #[error("data source {actual:?} does not match {expected:?}")]
    DataSourceMismatch { expected: String, actual: String },
}

pub type ScoreResult<T> = std::result::Result<T, ScoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScoreError::MissingAnswer.to_string(),
            "no <answer>...</answer> section found"
        );
        assert_eq!(
            ScoreError::InvalidPrediction { raw: "abc".to_string() }.to_string(),
            "answer section is not a number: \"abc\""
        );
        let mismatch = ScoreError::DataSourceMismatch {
            expected: "ebitda_prediction".to_string(),
            actual: "other_task".to_string(),
        };
        assert!(mismatch.to_string().contains("other_task"));
    }
}
