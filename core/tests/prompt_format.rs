use arcum_core::features::derive_features;
use arcum_core::prompt::{user_prompt, SYSTEM_INSTRUCTION};
use arcum_core::store::{MerchantId, MetricsRecord};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn sample_prompt() -> String {
    let metrics = MetricsRecord {
        year_month: Some("2024-06".into()),
        total_volume: Some(50_000.0),
        price: Some(0.04),
        chargeback_amount: Some(1_000.0),
        total_transactions: Some(200),
        month_over_threemonth_vol: Some(-12.0),
        support_count: Some(3),
        tenure: Some(8),
    };
    let features = derive_features(&metrics);
    user_prompt(
        &MerchantId::Text("M-1001".into()),
        "2024-06",
        &features.metrics_block(),
    )
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("prompt should contain '{needle}'"))
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The per-merchant header carries the identifier and the termination month.
#[test]
fn header_names_merchant_and_month() {
    let prompt = sample_prompt();
    assert!(prompt.contains("Merchant MID: M-1001  Month: 2024-06"));
}

/// Blocks appear in fixed order: glossary, example, header, metrics,
/// output-format contract.
#[test]
fn blocks_appear_in_fixed_order() {
    let prompt = sample_prompt();
    let glossary = position(&prompt, "Field Definitions:");
    let example = position(&prompt, "Input Data Example:");
    let header = position(&prompt, "Merchant MID:");
    let metrics = position(&prompt, "year_month: 2024-06");
    let contract = position(&prompt, "Output format:");
    assert!(glossary < example, "glossary must precede the example");
    assert!(example < header, "example must precede the merchant header");
    assert!(header < metrics, "header must precede the metrics block");
    assert!(metrics < contract, "metrics must precede the output contract");
}

/// The output contract names the four labels in emission order.
#[test]
fn output_contract_lists_four_labels() {
    let prompt = sample_prompt();
    let rd = position(&prompt, "Reason_Detailed: <text>");
    let sd = position(&prompt, "Suggest_Detailed: <text>");
    let rc = position(&prompt, "Reason: <category>");
    let sa = position(&prompt, "Suggested: <action>");
    assert!(rd < sd && sd < rc && rc < sa);
}

/// The rendered metrics block is embedded whole.
#[test]
fn metrics_block_is_embedded() {
    let prompt = sample_prompt();
    assert!(prompt.contains("effective_rate: 4\n"));
    assert!(prompt.contains("chargeback_rate: 2\n"));
    assert!(prompt.contains("tenure: 9\n"));
}

/// The system instruction defines the full 8-way reason taxonomy.
#[test]
fn system_instruction_defines_taxonomy() {
    for category in [
        "agent",
        "pricing",
        "product",
        "service",
        "seasonality",
        "microeconomic",
        "macroeconomic",
        "cashflow",
    ] {
        assert!(
            SYSTEM_INSTRUCTION.contains(&format!("- {category} (")),
            "system instruction should define '{category}'"
        );
    }
}

/// The system instruction defines the 7-way action vocabulary and the
/// constraint keeping actions out of the reason field.
#[test]
fn system_instruction_defines_actions_and_constraint() {
    for action in [
        "Revise price",
        "Revise product",
        "call",
        "visit",
        "MCA/loan",
        "chargeback mitigation",
        "email",
    ] {
        assert!(
            SYSTEM_INSTRUCTION.contains(action),
            "system instruction should offer '{action}'"
        );
    }
    assert!(SYSTEM_INSTRUCTION.contains("Never write 'chargeback mitigation'"));
}
