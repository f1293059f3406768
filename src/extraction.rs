//! Text-level operations on a model response: tail truncation, answer
//! extraction, and the strict think/answer format check.

use crate::error::{ScoreError, ScoreResult};
use regex::Regex;
use std::sync::LazyLock;

static ANSWER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<answer>(.*?)</answer>").expect("valid answer regex"));

// \x1c-\x1f are separator controls that count as whitespace between the blocks
static FORMAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<think>.*?</think>[\s\x1c-\x1f]*<answer>.*?</answer>\z")
        .expect("valid format regex")
});

static DECIMAL_DIGIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("valid digit regex"));

/// Keep only the last `window` characters of `text`.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
/// A window of zero keeps the whole text.
pub fn truncate_tail(text: &str, window: usize) -> &str {
    let Some(skip) = window.checked_sub(1) else {
        return text;
    };
    match text.char_indices().rev().nth(skip) {
        Some((start, _)) => &text[start..],
        None => text,
    }
}

/// Extract the numeric prediction from the first `<answer>` section.
pub fn extract_prediction(text: &str) -> ScoreResult<f64> {
    let captures = ANSWER_REGEX
        .captures(text)
        .ok_or(ScoreError::MissingAnswer)?;
    let raw = captures.get(1).map_or("", |m| m.as_str());

    parse_float(raw).ok_or_else(|| ScoreError::InvalidPrediction {
        raw: raw.to_string(),
    })
}

/// Binary format score: 1.0 when the whole text is a think block followed by
/// an answer block ending exactly at end of input, 0.0 otherwise.
pub fn format_score(text: &str) -> f64 {
    if FORMAT_REGEX.is_match(text) {
        1.0
    } else {
        0.0
    }
}

/// Parse a number the way responses and ground-truth labels are written.
///
/// Surrounding whitespace is ignored, any Unicode decimal digit (full-width,
/// Arabic-Indic, ...) counts as its ASCII digit, and single underscores
/// between digits are accepted as digit separators.
pub fn parse_float(raw: &str) -> Option<f64> {
    let normalized: String = raw
        .trim()
        .chars()
        .map(|c| ascii_digit(c).unwrap_or(c))
        .collect();
    if !normalized.contains('_') {
        return normalized.parse().ok();
    }

    let bytes = normalized.as_bytes();
    let separators_valid = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    });
    if !separators_valid {
        return None;
    }

    normalized.replace('_', "").parse().ok()
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT_REGEX.is_match(c.encode_utf8(&mut buf))
}

/// ASCII digit for a Unicode decimal digit (general category Nd).
///
/// Nd characters come in contiguous runs of ten starting at zero, so the
/// value is the offset from the start of the run, modulo ten.
fn ascii_digit(c: char) -> Option<char> {
    if c.is_ascii_digit() {
        return Some(c);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    char::from_digit((c as u32 - start) % 10, 10)
}
