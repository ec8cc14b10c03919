//! Shared presentation: output format, money and date rendering, JSON output.

use crate::error::ApiError;
use serde::Serialize;

/// Width of the section rules in text reports.
pub const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::usage(
                format!("Invalid output format: {} (must be 'text' or 'json')", other),
                "Usage: clawprint --format text|json <command> [options]",
            )),
        }
    }
}

pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// `$1234.50`
pub fn dollars(amount: f64) -> String {
    let amount = positive_zero(amount);
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// `usd 5500.00`
pub fn money(currency: &str, amount: f64) -> String {
    format!("{} {:.2}", currency, positive_zero(amount))
}

/// Float sums of nothing come out as `-0.0`, which would print as `-0.00`.
fn positive_zero(amount: f64) -> f64 {
    if amount == 0.0 {
        0.0
    } else {
        amount
    }
}

/// Date part of an RFC 3339 timestamp; other strings are shown as given.
pub fn display_date(value: Option<&str>) -> String {
    match value {
        None => "-".to_string(),
        Some(raw) => match chrono::DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts.format("%Y-%m-%d").to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

/// Trims a trailing `.0` from whole quantities.
pub fn quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::Parse(format!("Failed to render JSON: {}", e)))
}
