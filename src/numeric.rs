//! Normalization of free-text monetary input.
//!
//! Every amount that enters or leaves the engine passes through [`round2`], so
//! binary floating-point artifacts (`0.1 + 0.2`) never reach a dashboard.

use serde::{Deserialize, Deserializer};

/// Scaled values at or above this magnitude have no fractional part left.
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Nearest integer with halves rounded toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded + 0.0
}

/// Rounds to two decimal places on the scaled integer. Values too large to
/// carry cents come back unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value + 0.0;
    }
    round_half_up(scaled) / 100.0 + 0.0
}

/// Parses user-entered money text into an exact two-decimal value.
///
/// Anything that is not a digit, `.` or `-` is dropped first, so `"$1,250.75"`
/// becomes `1250.75`. Text that does not start with a number degrades to `0`.
pub fn parse_numeric_input(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match leading_number(&cleaned) {
        Some(value) if value.is_finite() => round2(value),
        _ => 0.0,
    }
}

/// Renders a value as the minimal decimal string after two-decimal rounding
/// (`11`, `0.3`, `1250.5`).
pub fn sanitize_numeric_string(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    format!("{}", round2(value))
}

/// Display form with grouped thousands and two decimals, e.g. `$12,500.00`.
pub fn format_currency(value: f64) -> String {
    let rounded = if value.is_finite() { round2(value) } else { 0.0 };
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Longest prefix shaped like `-?digits[.digits]`, parsed as a float.
fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        has_digits |= frac_end > frac_start;
        end = frac_end;
    }

    if !has_digits {
        return None;
    }

    text[..end].trim_end_matches('.').parse::<f64>().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Serde helper for store fields that arrive either as JSON numbers or as
/// numeric text. `null` reads as zero.
pub fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Number(n)) if n.is_finite() => round2(n),
        Some(RawAmount::Number(_)) | None => 0.0,
        Some(RawAmount::Text(text)) => parse_numeric_input(&text),
    };
    Ok(amount)
}
