//! Budget parsing and bounds checking

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Lowest budget we can build a working PC for
pub const MIN_BUDGET: u64 = 400;

/// Highest budget we accept
pub const MAX_BUDGET: u64 = 15_000;

/// First money-like token: optional `$`, digits with optional thousands
/// separators, optional decimal part, optional `k` suffix (space allowed).
static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\s*(\d{1,3}(?:,\d{3})+|\d+)(\.\d+)?(?:\s*([kK])\b)?")
        .expect("budget pattern is valid")
});

/// Why a budget was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetError {
    TooLow,
    TooHigh,
    InvalidFormat,
}

/// Outcome of validating a free-text budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetValidationResult {
    pub valid: bool,

    /// Extracted amount in whole USD, present even when out of bounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BudgetError>,

    /// Human-readable explanation, only set on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BudgetValidationResult {
    fn rejected(amount: Option<u64>, error: BudgetError, message: String) -> Self {
        Self {
            valid: false,
            amount,
            error: Some(error),
            message: Some(message),
        }
    }
}

/// Parse a budget like "$1,500", "1500", "1.5k" or "2 K" and check it
/// against [`MIN_BUDGET`, `MAX_BUDGET`].
pub fn validate_budget(input: &str) -> BudgetValidationResult {
    let Some(value) = extract_amount(input) else {
        return BudgetValidationResult::rejected(
            None,
            BudgetError::InvalidFormat,
            "I couldn't find a budget amount in that. Try something like \"$1500\", \"1,200\" or \"2k\"."
                .to_string(),
        );
    };

    // bounds apply to the exact figure; rejected amounts round away from the
    // limit so "$399.50" is never reported as "$400"
    if value < MIN_BUDGET as f64 {
        let amount = value.floor() as u64;
        return BudgetValidationResult::rejected(
            Some(amount),
            BudgetError::TooLow,
            format!(
                "{} is below our {} minimum. A CPU and motherboard alone run about $450-500 minimum, \
                 so there isn't room left for the rest of a working build.",
                format_usd(amount),
                format_usd(MIN_BUDGET)
            ),
        );
    }

    if value > MAX_BUDGET as f64 {
        let amount = value.ceil() as u64;
        return BudgetValidationResult::rejected(
            Some(amount),
            BudgetError::TooHigh,
            format!(
                "{} is above our {} ceiling. Past $5,000-8,000 you stop getting meaningful \
                 performance for the money, even for high-end builds.",
                format_usd(amount),
                format_usd(MAX_BUDGET)
            ),
        );
    }

    BudgetValidationResult {
        valid: true,
        amount: Some(value.round() as u64),
        error: None,
        message: None,
    }
}

fn extract_amount(input: &str) -> Option<f64> {
    let caps = AMOUNT.captures(input)?;

    let digits = caps.get(1)?.as_str().replace(',', "");
    let fraction = caps.get(2).map_or("", |m| m.as_str());
    let mut value: f64 = format!("{digits}{fraction}").parse().ok()?;

    if caps.get(3).is_some() {
        value *= 1000.0;
    }

    // absurdly long inputs parse to huge or infinite values and land in TooHigh
    Some(value)
}

/// Render whole dollars with thousands separators, e.g. `$15,000`
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${out}")
}
