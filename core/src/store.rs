//! MongoDB persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Pipeline stages call store methods — they never build queries directly.

use mongodb::{
    bson::{Bson, Document},
    sync::{Client, Collection},
};

use crate::config::{DB_NAME, MERCHANTS_COLLECTION, METRICS_COLLECTION};
use crate::error::EnrichResult;

mod merchant;
mod metrics;

pub use merchant::{MerchantId, MerchantRecord, WriteOutcome};
pub use metrics::MetricsRecord;

pub struct EnrichStore {
    merchants: Collection<Document>,
    metrics: Collection<Document>,
}

impl EnrichStore {
    /// Connect and bind the two collections this job touches.
    pub fn connect(uri: &str) -> EnrichResult<Self> {
        let client = Client::with_uri_str(uri)?;
        let db = client.database(DB_NAME);
        Ok(Self {
            merchants: db.collection::<Document>(MERCHANTS_COLLECTION),
            metrics: db.collection::<Document>(METRICS_COLLECTION),
        })
    }
}

// ── BSON field helpers ───────────────────────────────────────────────────────
// Numeric feed fields arrive as double, int32 or int64 depending on which
// loader produced the month. Coerce by value; anything else reads as absent.

pub(crate) fn doc_f64(doc: &Document, key: &str) -> Option<f64> {
    match doc.get(key) {
        Some(Bson::Double(v)) => Some(*v),
        Some(Bson::Int32(v)) => Some(*v as f64),
        Some(Bson::Int64(v)) => Some(*v as f64),
        _ => None,
    }
}

pub(crate) fn doc_i64(doc: &Document, key: &str) -> Option<i64> {
    match doc.get(key) {
        Some(Bson::Int32(v)) => Some(*v as i64),
        Some(Bson::Int64(v)) => Some(*v),
        Some(Bson::Double(v)) => Some(*v as i64),
        _ => None,
    }
}

pub(crate) fn doc_string(doc: &Document, key: &str) -> Option<String> {
    doc.get_str(key).ok().map(str::to_string)
}
