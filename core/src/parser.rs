//! Four-line positional parser for the model's reply.
//!
//! The contract is deliberately narrow: blank lines are dropped, the first
//! four remaining lines are taken in order, and each value is whatever
//! follows the line's first `:`. Label text is discarded, not matched.
//! Keeping the whole contract inside one function contains its fragility
//! and makes it independently testable.

use serde::{Deserialize, Serialize};

use crate::error::{EnrichError, EnrichResult};

/// The fixed churn-cause taxonomy. Membership is advisory: an out-of-set
/// category is logged by the caller and written unchanged.
pub const ALLOWED_REASONS: [&str; 8] = [
    "agent",
    "pricing",
    "product",
    "service",
    "seasonality",
    "microeconomic",
    "macroeconomic",
    "cashflow",
];

pub fn is_allowed_reason(reason: &str) -> bool {
    ALLOWED_REASONS.contains(&reason)
}

/// The four enrichment fields, in the order the model emits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnAnnotation {
    pub reason_detailed: String,
    pub suggested_detailed: String,
    pub reason: String,
    pub suggested: String,
}

/// Extract the four labeled values by line position.
pub fn parse_annotation(raw: &str) -> EnrichResult<ChurnAnnotation> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 4 {
        return Err(EnrichError::MalformedResponse { lines: lines.len() });
    }

    let mut values = Vec::with_capacity(4);
    for (index, line) in lines.iter().take(4).enumerate() {
        let (_, value) = line
            .split_once(':')
            .ok_or(EnrichError::UnlabeledLine { index })?;
        values.push(value.trim().to_string());
    }

    let mut fields = values.into_iter();
    Ok(ChurnAnnotation {
        reason_detailed: fields.next().unwrap_or_default(),
        suggested_detailed: fields.next().unwrap_or_default(),
        reason: fields.next().unwrap_or_default(),
        suggested: fields.next().unwrap_or_default(),
    })
}
