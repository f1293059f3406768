//! Reward scoring for numeric EBITDA predictions.
//!
//! A model response is expected to look like
//! `<think>...</think><answer>123.4</answer>`. The primary entry point,
//! [`compute_score`], blends a binary format score with a bucketed
//! relative-error accuracy score; [`compute_score_strict`] uses tighter
//! buckets and returns the accuracy score alone. Both return a value in
//! `[0.0, 1.0]` and never fail.
//!
//! ```
//! let score = ebitda_reward::compute_score(
//!     "ebitda_prediction",
//!     "<think>reasoning</think><answer>105.3</answer>",
//!     "90.0",
//!     None,
//! );
//! assert!((score - 0.46).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod evaluation;
pub mod extraction;
pub mod models;
pub mod output;
pub mod runner;

pub use config::{Config, EBITDA_DATA_SOURCE, ScorerConfig, Variant};
pub use error::{ScoreError, ScoreResult};
pub use evaluation::{AccuracyTable, Scorer, compute_score, compute_score_strict};
pub use models::ScoreBreakdown;
