use mongodb::bson::{doc, Document};

use super::merchant::MerchantId;
use super::{doc_f64, doc_i64, doc_string, EnrichStore};
use crate::error::EnrichResult;
use crate::types::YearMonth;

/// One month of merchant performance, as loaded from the metrics feed.
///
/// Every field is optional: the feed is sparse, and the deriver decides what
/// each absence means.
#[derive(Debug, Clone, Default)]
pub struct MetricsRecord {
    pub year_month: Option<YearMonth>,
    pub total_volume: Option<f64>,
    /// Fractional processing fee rate (0.04 = 4%).
    pub price: Option<f64>,
    /// Feed field `activitychargebackamount`.
    pub chargeback_amount: Option<f64>,
    pub total_transactions: Option<i64>,
    /// Rolling volume growth vs the trailing three months, in percent.
    pub month_over_threemonth_vol: Option<f64>,
    pub support_count: Option<i64>,
    /// Months on the client's book at the start of this month.
    pub tenure: Option<i64>,
}

impl MetricsRecord {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            year_month: doc_string(doc, "year_month"),
            total_volume: doc_f64(doc, "total_volume"),
            price: doc_f64(doc, "price"),
            chargeback_amount: doc_f64(doc, "activitychargebackamount"),
            total_transactions: doc_i64(doc, "total_transactions"),
            month_over_threemonth_vol: doc_f64(doc, "month_over_threemonth_vol"),
            support_count: doc_i64(doc, "support_count"),
            tenure: doc_i64(doc, "tenure"),
        }
    }
}

impl EnrichStore {
    /// Point lookup of the merchant's termination-month metrics.
    /// `None` is an expected skip, not an error.
    pub fn find_metrics(
        &self,
        mid: &MerchantId,
        month: &str,
    ) -> EnrichResult<Option<MetricsRecord>> {
        let found = self
            .metrics
            .find_one(doc! { "mid": mid.as_bson(), "year_month": month }, None)?;
        Ok(found.as_ref().map(MetricsRecord::from_document))
    }
}
