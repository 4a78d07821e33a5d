//! Job configuration loaded from the process environment.
//!
//! Connection strings and API credentials come from env vars (the runner
//! loads `.env` first). Portfolio identity — database, collections, client
//! tag — is fixed by constant: this job serves exactly one client feed.

use crate::error::{EnrichError, EnrichResult};

/// Database holding the merchant registry and the metrics feed.
pub const DB_NAME: &str = "arcum-qa";

/// Merchant registry collection (read + enrichment write-back).
pub const MERCHANTS_COLLECTION: &str = "merchant_data";

/// Monthly metrics collection (read-only).
pub const METRICS_COLLECTION: &str = "acn_metrics_data";

/// Tag selecting which merchants belong to this enrichment run.
pub const CLIENT_TAG: &str = "ACN";

/// What to do when the model call or response parse fails for one candidate.
///
/// `Abort` is the conservative default: the first failure ends the whole
/// run. `SkipCandidate` logs the failure, counts it, and continues.
/// Skip/fatal classification of *store* errors is unaffected — those always
/// abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    #[default]
    Abort,
    SkipCandidate,
}

impl FailureMode {
    /// Parse `ENRICH_FAILURE_MODE`. Unset or unrecognized => `Abort`.
    fn from_env() -> Self {
        match std::env::var("ENRICH_FAILURE_MODE") {
            Ok(v) if v.trim().eq_ignore_ascii_case("skip") => FailureMode::SkipCandidate,
            _ => FailureMode::Abort,
        }
    }
}

/// Everything the job needs, resolved once at startup and passed by
/// reference into the pipeline. No ambient globals.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// MONGODB_URI: connection string for the document store.
    pub mongodb_uri: String,
    /// OPENAI_API_KEY: credential for the completion endpoint.
    pub api_key: String,
    /// ENRICH_MODEL: completion model identifier. Default: `gpt-4.1`.
    pub model: String,
    /// ENRICH_FAILURE_MODE: `abort` (default) | `skip`.
    pub failure_mode: FailureMode,
}

impl JobConfig {
    pub fn from_env() -> EnrichResult<Self> {
        Ok(Self {
            mongodb_uri: require_env("MONGODB_URI")?,
            api_key: require_env("OPENAI_API_KEY")?,
            model: env_opt_string("ENRICH_MODEL")
                .unwrap_or_else(|| crate::model::DEFAULT_MODEL.to_string()),
            failure_mode: FailureMode::from_env(),
        })
    }
}

fn require_env(name: &'static str) -> EnrichResult<String> {
    env_opt_string(name).ok_or(EnrichError::MissingEnv { name })
}

fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
