use mongodb::bson::{doc, Bson, Document};

use super::{doc_string, EnrichStore};
use crate::config::{CLIENT_TAG, MERCHANTS_COLLECTION};
use crate::error::{EnrichError, EnrichResult};
use crate::parser::ChurnAnnotation;
use crate::types::YearMonth;

/// Merchant identifiers are opaque in the registry: some loads store them as
/// strings, some as integers. The metrics lookup reuses the exact BSON value
/// so numeric ids match numeric `mid` fields regardless of integer width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerchantId {
    Text(String),
    Number(i64),
}

impl MerchantId {
    pub(crate) fn from_bson(value: &Bson) -> Option<MerchantId> {
        match value {
            Bson::String(s) => Some(MerchantId::Text(s.clone())),
            Bson::Int32(v) => Some(MerchantId::Number(*v as i64)),
            Bson::Int64(v) => Some(MerchantId::Number(*v)),
            Bson::Double(v) if v.fract() == 0.0 => Some(MerchantId::Number(*v as i64)),
            _ => None,
        }
    }

    /// Present-and-truthy: selection skips empty strings and zero
    /// identifiers rather than erroring on them.
    pub(crate) fn is_usable(&self) -> bool {
        match self {
            MerchantId::Text(s) => !s.is_empty(),
            MerchantId::Number(n) => *n != 0,
        }
    }

    pub(crate) fn as_bson(&self) -> Bson {
        match self {
            MerchantId::Text(s) => Bson::String(s.clone()),
            MerchantId::Number(n) => Bson::Int64(*n),
        }
    }
}

impl std::fmt::Display for MerchantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MerchantId::Text(s) => f.write_str(s),
            MerchantId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One merchant registry document, reduced to the fields selection needs.
#[derive(Debug, Clone)]
pub struct MerchantRecord {
    /// `_id` of the originating document; the write-back matches on this.
    pub id: Bson,
    pub merchant_id: Option<MerchantId>,
    pub term_date: Option<YearMonth>,
}

impl MerchantRecord {
    pub fn from_document(doc: &Document) -> EnrichResult<Self> {
        let id = doc.get("_id").cloned().ok_or(EnrichError::MissingField {
            collection: MERCHANTS_COLLECTION,
            field: "_id",
        })?;
        Ok(Self {
            id,
            merchant_id: doc.get("merchant_id").and_then(MerchantId::from_bson),
            term_date: doc_string(doc, "term_date"),
        })
    }

    /// The (identifier, termination month) pair keying the metrics lookup.
    /// `None` when either half is missing or empty — the candidate is
    /// skipped, never erred.
    pub fn enrichment_key(&self) -> Option<(&MerchantId, &str)> {
        let mid = self.merchant_id.as_ref().filter(|m| m.is_usable())?;
        let month = self.term_date.as_deref().filter(|t| !t.is_empty())?;
        Some((mid, month))
    }
}

/// Matched/modified counts reported by the driver for one write-back.
#[derive(Debug, Clone, Copy)]
pub struct WriteOutcome {
    pub matched: u64,
    pub modified: u64,
}

impl EnrichStore {
    /// First selection pass: usable identifiers only, for the up-front
    /// count log.
    pub fn candidate_ids(&self) -> EnrichResult<Vec<MerchantId>> {
        let cursor = self.merchants.find(doc! { "name": CLIENT_TAG }, None)?;
        let mut ids = Vec::new();
        for doc in cursor {
            let doc = doc?;
            if let Some(id) = doc.get("merchant_id").and_then(MerchantId::from_bson) {
                if id.is_usable() {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }

    /// Second selection pass: the full records, in store order.
    pub fn candidates(&self) -> EnrichResult<Vec<MerchantRecord>> {
        let cursor = self.merchants.find(doc! { "name": CLIENT_TAG }, None)?;
        let mut records = Vec::new();
        for doc in cursor {
            records.push(MerchantRecord::from_document(&doc?)?);
        }
        Ok(records)
    }

    /// Persist the four enrichment fields onto the originating document.
    pub fn write_annotation(
        &self,
        id: &Bson,
        annotation: &ChurnAnnotation,
    ) -> EnrichResult<WriteOutcome> {
        let result = self.merchants.update_one(
            doc! { "_id": id.clone() },
            doc! { "$set": {
                "reason_detailed": annotation.reason_detailed.as_str(),
                "suggested_detailed": annotation.suggested_detailed.as_str(),
                "reason": annotation.reason.as_str(),
                "suggested": annotation.suggested.as_str(),
            }},
            None,
        )?;
        Ok(WriteOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }
}
