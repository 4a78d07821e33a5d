//! enrich-runner: headless churn-reason enrichment for terminated merchants.
//!
//! Configuration comes from the environment (`.env` is loaded first):
//!   MONGODB_URI          connection string for the document store (required)
//!   OPENAI_API_KEY       completion-endpoint credential (required)
//!   ENRICH_MODEL         model identifier (default: gpt-4.1)
//!   ENRICH_FAILURE_MODE  abort | skip (default: abort)

use anyhow::Result;
use arcum_core::{
    config::JobConfig,
    job::{EnrichmentJob, RunSummary},
    model::ChatClient,
    store::EnrichStore,
};
use chrono::Utc;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = JobConfig::from_env()?;

    println!("Arcum churn-reason enrichment");
    println!("  model:        {}", config.model);
    println!("  failure mode: {:?}", config.failure_mode);
    println!("  started:      {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!();

    log::info!("connecting to document store");
    let store = EnrichStore::connect(&config.mongodb_uri)?;
    let model = ChatClient::new(&config.api_key, &config.model);

    let started = Instant::now();
    let summary = EnrichmentJob::new(&config, &store, &model).run()?;

    print_summary(&summary, started.elapsed());
    Ok(())
}

fn print_summary(summary: &RunSummary, elapsed: Duration) {
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  candidates:          {}", summary.candidates);
    println!("  enriched:            {}", summary.enriched);
    println!("  skipped (unkeyed):   {}", summary.skipped_unkeyed);
    println!("  skipped (no data):   {}", summary.skipped_no_metrics);
    println!("  failed:              {}", summary.failed);
    println!("  reason warnings:     {}", summary.reason_warnings);
    println!("  tokens (prompt):     {}", summary.prompt_tokens);
    println!("  tokens (completion): {}", summary.completion_tokens);
    println!("  tokens (total):      {}", summary.total_tokens);
    println!("  elapsed:             {:.1}s", elapsed.as_secs_f64());
}
