use crate::models::{FinalResults, Statistics};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const COMPONENTS: [&str; 3] = ["score", "accuracy", "format"];

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Print suite results in the specified format
pub fn print_results(results: &[FinalResults], format: OutputFormat) {
    match format {
        OutputFormat::Plain => print!("{}", render_plain(results)),
        OutputFormat::Json => print_json(results),
    }
}

/// Render results as plain text
fn render_plain(results: &[FinalResults]) -> String {
    let mut out = String::new();

    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!("=== Suite {}: {} ===\n\n", i + 1, result.title));

        out.push_str("STATISTICS\n");
        out.push_str("----------\n");
        out.push_str(&render_statistics_plain(&result.statistics));
        out.push('\n');

        out.push_str("CASES\n");
        out.push_str("-----\n");
        out.push_str(&format!(
            "{:<6} {:<20} {:<14} {:<8} {}\n",
            "#", "Data source", "Ground truth", "Score", "Detail"
        ));
        for (j, case) in result.results.iter().enumerate() {
            let detail = match (&case.breakdown, &case.failure) {
                (Some(b), _) => format!(
                    "prediction={} error={:.5} accuracy={:.1}{}",
                    b.prediction,
                    b.relative_error,
                    b.accuracy_score,
                    b.format_score
                        .map(|f| format!(" format={:.1}", f))
                        .unwrap_or_default()
                ),
                (None, Some(reason)) => reason.clone(),
                (None, None) => String::new(),
            };
            out.push_str(&format!(
                "{:<6} {:<20} {:<14} {:<8.3} {}\n",
                j + 1,
                case.data_source,
                case.ground_truth,
                case.score,
                detail
            ));
        }

        if i + 1 < results.len() {
            out.push_str(&format!("\n{}\n\n", "=".repeat(50)));
        }
    }

    out
}

/// Render statistics as a table, one row per score component
fn render_statistics_plain(stats: &Statistics) -> String {
    if stats.mean.is_empty() {
        return "No statistics available.\n".to_string();
    }

    let mut out = format!(
        "{:<10} {:<8} {:<8} {:<8}\n{}\n",
        "Component",
        "Mean",
        "Median",
        "Mode",
        "-".repeat(37)
    );

    for component in COMPONENTS {
        let Some(mean) = stats.mean.get(component) else {
            continue;
        };
        let median = stats.median.get(component).unwrap_or(&0.0);
        let mode = stats.mode.get(component).unwrap_or(&0.0);

        out.push_str(&format!(
            "{:<10} {:<8.3} {:<8.3} {:<8.3}\n",
            component, mean, median, mode
        ));
    }
    out.push_str(&format!("Failures: {}\n", stats.failures));

    out
}

/// Render results as pretty-printed JSON
fn render_json(results: &[FinalResults]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Print results in JSON format
fn print_json(results: &[FinalResults]) {
    match render_json(results) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results to JSON: {}", e),
    }
}
