use crate::config::{CaseConfig, Config, SuiteConfig, Variant};
use crate::evaluation::Scorer;
use crate::models::{CaseResult, FinalResults, ScoreBreakdown, Statistics};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main runner that scores every suite of a run file
pub struct Runner {
    config: Config,
    scorer: Scorer,
}

impl Runner {
    /// Create a new runner with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let scorer = Scorer::new(config.scorer.clone()).context("Invalid scorer settings")?;
        Ok(Self { config, scorer })
    }

    /// Score all suites defined in the configuration
    pub fn run_suites(&self) -> Result<Vec<FinalResults>> {
        let total_suites = self.config.suites.len();

        self.config
            .suites
            .iter()
            .enumerate()
            .map(|(suite_index, suite)| self.run_single_suite(suite, suite_index + 1, total_suites))
            .collect()
    }

    /// Score a single suite and store its results if configured
    fn run_single_suite(
        &self,
        suite: &SuiteConfig,
        suite_num: usize,
        total_suites: usize,
    ) -> Result<FinalResults> {
        info!(
            title = %suite.title,
            variant = ?suite.variant,
            "Scoring suite {}/{}",
            suite_num,
            total_suites
        );

        let results: Vec<CaseResult> = suite
            .cases
            .iter()
            .enumerate()
            .map(|(case_index, case)| self.score_case(suite.variant, case, case_index + 1))
            .collect();

        let statistics = self.calculate_suite_statistics(&results);
        let final_results = FinalResults {
            title: suite.title.clone(),
            statistics,
            results,
        };

        if let Some(storage_path) = &suite.storage_path {
            self.store_results(&final_results, storage_path)?;
        }

        Ok(final_results)
    }

    /// Score one case, keeping the failure reason when it scores 0.0
    fn score_case(&self, variant: Variant, case: &CaseConfig, case_num: usize) -> CaseResult {
        let (data_source, solution, ground_truth) =
            (&case.data_source, &case.solution, &case.ground_truth);
        let outcome = match variant {
            Variant::Standard => self.scorer.evaluate(data_source, solution, ground_truth),
            Variant::Strict => self.scorer.evaluate_strict(data_source, solution, ground_truth),
        };

        let (score, breakdown, failure) = match outcome {
            Ok(breakdown) => (breakdown.score, Some(breakdown), None),
            Err(e) => (0.0, None, Some(e.to_string())),
        };
        debug!(case = case_num, score, failure = ?failure, "Scored case");

        CaseResult {
            data_source: case.data_source.clone(),
            ground_truth: case.ground_truth.clone(),
            score,
            breakdown,
            failure,
        }
    }

    fn calculate_suite_statistics(&self, results: &[CaseResult]) -> Statistics {
        let scores: Vec<f64> = results.iter().map(|r| r.score).collect();
        let breakdowns: Vec<&ScoreBreakdown> =
            results.iter().filter_map(|r| r.breakdown.as_ref()).collect();
        self.scorer.calculate_statistics(&scores, &breakdowns)
    }

    /// Store results to a JSON file
    fn store_results(&self, final_results: &FinalResults, path: &str) -> Result<()> {
        let json_content = serde_json::to_string_pretty(final_results)
            .context("Failed to serialize results to JSON")?;

        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, json_content)
            .with_context(|| format!("Failed to write results to: {}", path))?;

        info!("Results stored to: {}", path);
        Ok(())
    }
}
