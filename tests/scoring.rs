use ebitda_reward::{
    AccuracyTable, EBITDA_DATA_SOURCE, Scorer, compute_score, compute_score_strict,
    extraction::{extract_prediction, format_score},
};
use proptest::prelude::*;

const RESPONSE: &str = "<think>reasoning</think><answer>105.3</answer>";

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn close_prediction_scores_full_reward() {
    assert_close(compute_score(EBITDA_DATA_SOURCE, RESPONSE, "105.0", None), 1.0);
}

#[test]
fn seventeen_percent_error_scores_point_four_six() {
    assert_close(compute_score(EBITDA_DATA_SOURCE, RESPONSE, "90.0", None), 0.46);
}

#[test]
fn untagged_response_scores_zero() {
    assert_eq!(compute_score(EBITDA_DATA_SOURCE, "no tags here", "105.0", None), 0.0);
    assert_eq!(compute_score(EBITDA_DATA_SOURCE, "no tags here", "garbage", None), 0.0);
}

#[test]
fn non_ascii_decimal_digits_score_like_ascii() {
    let full_width = "<think>r</think><answer>１０５.３</answer>";
    let arabic_indic = "<think>r</think><answer>١٠٥</answer>";

    assert_close(compute_score(EBITDA_DATA_SOURCE, full_width, "105.0", None), 1.0);
    assert_close(compute_score(EBITDA_DATA_SOURCE, arabic_indic, "105", None), 1.0);
    assert_close(compute_score(EBITDA_DATA_SOURCE, RESPONSE, "１０５", None), 1.0);
}

#[test]
fn strict_rejects_other_data_sources() {
    assert_eq!(compute_score_strict("other_task", RESPONSE, "105.3", None), 0.0);
    assert_eq!(compute_score_strict(EBITDA_DATA_SOURCE, RESPONSE, "105.3", None), 1.0);
}

#[test]
fn primary_accepts_any_data_source() {
    assert_close(compute_score("other_task", RESPONSE, "105.0", None), 1.0);
}

#[test]
fn answer_in_tail_window_matches_untruncated_extraction() {
    let response = format!("{}<think>x</think><answer>42.5</answer>", "filler ".repeat(200));
    let tail: String = response
        .chars()
        .skip(response.chars().count() - 300)
        .collect();

    assert_eq!(extract_prediction(&tail), extract_prediction(&response));
    assert!(compute_score(EBITDA_DATA_SOURCE, &response, "42.5", None) > 0.0);
}

#[test]
fn answer_before_tail_window_scores_zero() {
    let response = format!("<think>x</think><answer>42.5</answer>{}", " ".repeat(300));
    assert_eq!(extract_prediction(&response).unwrap(), 42.5);
    assert_eq!(compute_score(EBITDA_DATA_SOURCE, &response, "42.5", None), 0.0);
}

#[test]
fn bucket_boundaries_use_strict_less_than() {
    assert_eq!(AccuracyTable::Standard.score(0.01), 0.8);
    assert_eq!(AccuracyTable::Strict.score(0.005), 0.8);
}

proptest! {
    #[test]
    fn well_formed_responses_get_format_credit(
        thought in "[a-zA-Z0-9 .,]{0,80}",
        value in -1.0e9f64..1.0e9,
    ) {
        let response = format!("<think>{thought}</think><answer>{value}</answer>");
        prop_assert_eq!(format_score(&response), 1.0);
        prop_assert_eq!(extract_prediction(&response).unwrap(), value);
    }

    #[test]
    fn trailing_characters_remove_format_credit(
        value in -1.0e6f64..1.0e6,
        trailing in "[ \n\t.a-z]{1,5}",
    ) {
        let response = format!("<think>x</think><answer>{value}</answer>{trailing}");
        prop_assert_eq!(format_score(&response), 0.0);
    }

    #[test]
    fn responses_without_answer_score_zero(text in "[^<>]{0,400}", truth in -1.0e6f64..1.0e6) {
        prop_assert_eq!(compute_score(EBITDA_DATA_SOURCE, &text, &truth.to_string(), None), 0.0);
    }

    #[test]
    fn accuracy_never_increases_with_error(
        truth in 1.0f64..1.0e6,
        a in 0.0f64..2.0,
        b in 0.0f64..2.0,
    ) {
        let scorer = Scorer::default();
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let respond = |offset: f64| format!("<think>x</think><answer>{}</answer>", truth + truth * offset);

        let near_score = scorer.compute_score("", &respond(near), &truth.to_string(), None);
        let far_score = scorer.compute_score("", &respond(far), &truth.to_string(), None);
        prop_assert!(near_score >= far_score);

        let near_strict = scorer.compute_score_strict(EBITDA_DATA_SOURCE, &respond(near), &truth.to_string(), None);
        let far_strict = scorer.compute_score_strict(EBITDA_DATA_SOURCE, &respond(far), &truth.to_string(), None);
        prop_assert!(near_strict >= far_strict);
    }

    #[test]
    fn scores_are_deterministic_and_bounded(
        solution in ".{0,400}",
        truth in "[-0-9.e]{0,12}",
        data_source in "[a-z_]{0,20}",
    ) {
        let first = compute_score(&data_source, &solution, &truth, None);
        let second = compute_score(&data_source, &solution, &truth, None);
        prop_assert_eq!(first.to_bits(), second.to_bits());
        prop_assert!((0.0..=1.0).contains(&first));

        let strict = compute_score_strict(&data_source, &solution, &truth, None);
        prop_assert!((0.0..=1.0).contains(&strict));
    }
}
