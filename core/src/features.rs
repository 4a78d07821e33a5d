//! Feature derivation — the eight-field summary embedded in the prompt.
//!
//! This stage:
//!   1. Converts the fractional price into an effective rate percentage
//!   2. Computes the chargeback-to-volume ratio for active months
//!   3. Adjusts tenure to count the termination month itself
//!   4. Passes the remaining metrics through untouched
//!
//! Exactly eight fields, rebuilt per candidate, discarded after the prompt
//! is composed. No field is ever invented beyond these eight.

use serde::Serialize;

use crate::store::MetricsRecord;
use crate::types::YearMonth;

/// Marker rendered for a field whose source value is absent.
const ABSENT: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub year_month: Option<YearMonth>,
    pub total_volume: Option<f64>,
    /// Processing fee rate in percent, rounded to 2 decimals.
    pub effective_rate: Option<f64>,
    /// Chargebacks as a percentage of volume, rounded to 2 decimals.
    pub chargeback_rate: Option<f64>,
    pub transactions: Option<i64>,
    pub month_over_threemonth_vol: Option<f64>,
    pub support_count: Option<i64>,
    pub tenure: i64,
}

pub fn derive_features(d: &MetricsRecord) -> FeatureRecord {
    let effective_rate = d.price.map(|p| round2(p * 100.0));

    // The chargeback ratio only exists for months with transaction activity.
    // A missing volume falls back to a denominator of 1 — inherited feed
    // semantics, preserved verbatim even though the resulting ratio is
    // misleading.
    let chargeback_rate = match d.total_transactions {
        Some(txns) if txns != 0 => {
            let chargebacks = d.chargeback_amount.unwrap_or(0.0);
            let volume = d.total_volume.unwrap_or(1.0);
            Some(round2(chargebacks / volume * 100.0))
        }
        _ => None,
    };

    // Tenure counts the termination month itself; zero and negative source
    // values pass through, absent becomes zero.
    let tenure = match d.tenure {
        Some(t) if t > 0 => t + 1,
        Some(t) => t,
        None => 0,
    };

    FeatureRecord {
        year_month: d.year_month.clone(),
        total_volume: d.total_volume,
        effective_rate,
        chargeback_rate,
        transactions: d.total_transactions,
        month_over_threemonth_vol: d.month_over_threemonth_vol,
        support_count: d.support_count,
        tenure,
    }
}

impl FeatureRecord {
    /// Render the `key: value` metrics block, one line per field, in
    /// declaration order.
    pub fn metrics_block(&self) -> String {
        [
            line("year_month", self.year_month.as_ref()),
            line("total_volume", self.total_volume.as_ref()),
            line("effective_rate", self.effective_rate.as_ref()),
            line("chargeback_rate", self.chargeback_rate.as_ref()),
            line("transactions", self.transactions.as_ref()),
            line(
                "month_over_threemonth_vol",
                self.month_over_threemonth_vol.as_ref(),
            ),
            line("support_count", self.support_count.as_ref()),
            line("tenure", Some(&self.tenure)),
        ]
        .join("\n")
    }
}

fn line<T: std::fmt::Display>(key: &str, value: Option<&T>) -> String {
    match value {
        Some(v) => format!("{key}: {v}"),
        None => format!("{key}: {ABSENT}"),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
