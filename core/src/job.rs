//! The batch driver — one linear pass over the candidate set.
//!
//! Per-candidate state machine:
//!   Selected → MetricsFound | Skipped(unkeyed | noMetrics)
//!            → FeaturesDerived → PromptSent → ResponseReceived
//!            → Parsed → Written
//!
//! Skips are expected and logged, never errors. A model or parse failure
//! ends the whole run in `Abort` mode, or just the candidate in
//! `SkipCandidate` mode. Store failures always end the run.

use crate::{
    config::{FailureMode, JobConfig, CLIENT_TAG},
    error::EnrichResult,
    features::{derive_features, FeatureRecord},
    model::{CompletionBackend, TokenUsage},
    parser::{is_allowed_reason, parse_annotation, ChurnAnnotation},
    prompt,
    store::{EnrichStore, MerchantId},
};

/// End-of-run accounting. Progress is still logged per merchant as the run
/// proceeds; this is the roll-up the runner prints afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub candidates: usize,
    pub enriched: usize,
    pub skipped_unkeyed: usize,
    pub skipped_no_metrics: usize,
    /// Candidates lost to model/parse failures. Only populated in
    /// `SkipCandidate` mode; in `Abort` mode the first failure ends the run.
    pub failed: usize,
    pub reason_warnings: usize,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl RunSummary {
    fn add_usage(&mut self, usage: &TokenUsage) {
        self.prompt_tokens += usage.prompt_tokens;
        self.completion_tokens += usage.completion_tokens;
        self.total_tokens += usage.total_tokens;
    }
}

pub struct EnrichmentJob<'a> {
    config: &'a JobConfig,
    store: &'a EnrichStore,
    model: &'a dyn CompletionBackend,
}

impl<'a> EnrichmentJob<'a> {
    pub fn new(
        config: &'a JobConfig,
        store: &'a EnrichStore,
        model: &'a dyn CompletionBackend,
    ) -> Self {
        Self {
            config,
            store,
            model,
        }
    }

    /// Process every tagged merchant, one at a time, fully sequentially.
    pub fn run(&self) -> EnrichResult<RunSummary> {
        let ids = self.store.candidate_ids()?;
        log::info!("processing {} {CLIENT_TAG} merchants", ids.len());

        let mut summary = RunSummary::default();

        for merchant in self.store.candidates()? {
            summary.candidates += 1;

            let Some((mid, month)) = merchant.enrichment_key() else {
                log::debug!("skipping merchant without id/termination month");
                summary.skipped_unkeyed += 1;
                continue;
            };

            log::info!("--- processing MID {mid} for termination month {month} ---");

            let Some(metrics) = self.store.find_metrics(mid, month)? else {
                log::info!("no metrics for MID {mid} at month {month}, skipping");
                summary.skipped_no_metrics += 1;
                continue;
            };

            let features = derive_features(&metrics);

            match annotate_candidate(self.model, mid, month, &features) {
                Ok((annotation, usage)) => {
                    let outcome = self.store.write_annotation(&merchant.id, &annotation)?;
                    if !is_allowed_reason(&annotation.reason) {
                        log::warn!(
                            "invalid reason '{}' returned for MID {mid}; written unchanged",
                            annotation.reason
                        );
                        summary.reason_warnings += 1;
                    }
                    log::info!(
                        "updated merchant {}: matched {}, modified {}",
                        merchant.id,
                        outcome.matched,
                        outcome.modified
                    );
                    log::info!(
                        "tokens used: prompt {}, completion {}, total {}",
                        usage.prompt_tokens,
                        usage.completion_tokens,
                        usage.total_tokens
                    );
                    summary.add_usage(&usage);
                    summary.enriched += 1;
                    log::info!("finished processing MID {mid} for {month}");
                }
                Err(err) => match self.config.failure_mode {
                    FailureMode::Abort => return Err(err),
                    FailureMode::SkipCandidate => {
                        log::error!("enrichment failed for MID {mid}: {err}");
                        summary.failed += 1;
                    }
                },
            }
        }

        Ok(summary)
    }
}

/// Compose the prompt, call the model, parse the reply. Pure with respect to
/// the store — this is the testable middle of the pipeline.
pub fn annotate_candidate(
    model: &dyn CompletionBackend,
    mid: &MerchantId,
    month: &str,
    features: &FeatureRecord,
) -> EnrichResult<(ChurnAnnotation, TokenUsage)> {
    let user = prompt::user_prompt(mid, month, &features.metrics_block());
    let completion = model.complete(prompt::SYSTEM_INSTRUCTION, &user)?;
    log::info!("model output for MID {mid}, {month}:\n{}", completion.text);
    let annotation = parse_annotation(&completion.text)?;
    Ok((annotation, completion.usage))
}
