//! Shared primitive types used across the enrichment pipeline.

/// A year-month key as stored by the portfolio feed (e.g. "2024-06").
/// Termination dates and metrics rows are keyed by this string verbatim.
pub type YearMonth = String;
