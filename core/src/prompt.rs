//! Prompt composition — static instruction blocks plus the per-merchant
//! metrics block.
//!
//! The user prompt concatenates, in fixed order: title, field glossary,
//! worked input example, the merchant header, the derived metrics block and
//! the output-format contract. The system message carries the analyst
//! persona, the reason taxonomy and the action vocabulary.

use crate::store::MerchantId;

/// Glossary of the eight derived fields, as the model sees them.
const FIELD_DEFINITIONS: &str = "\
Field Definitions:
- year_month: month of data record
- total_volume: merchant's monthly processing volume (USD)
- effective_rate: merchant's processing fee rate (%)
- chargeback_rate: total chargebacks as a percentage of volume
- total_transactions: number of merchant transactions per month
- month_over_threemonth_vol: merchant's monthly volume growth rate (%)
- support_count: number of monthly merchant support interactions
- tenure: the number of months that the merchant has been processing with our client";

/// Worked example showing the model the expected input shape.
const INPUT_EXAMPLE: &str = "\
Input Data Example:
Merchant Metrics:
- Volume: $50,000
- Effective rate: 4%
- Chargebacks (%): 2%
- Transactions: 200
- Monthly volume growth: -12%
- Support calls: 3
- Tenure: 8";

/// System message: persona, the two free-text outputs, the 8-way reason
/// taxonomy and the 7-way action vocabulary. The closing constraint keeps
/// action strings out of the reason field.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a payments retention analyst at Arcum, an AI-powered platform that helps payment processors and ISOs predict and prevent merchant churn. Arcum's clients manage portfolios of merchants processing card payments.

Given merchant transactional and behavioral data, generate clear and actionable outputs:

Outputs:
1. Explanation (1 sentence):
Clearly state why this merchant is at risk of churn (without saying this merchant is at risk of leaving because...this is implied), referencing specific data trends (e.g., declining volume, increasing chargebacks, or rising support interactions, rise in effective rate (price).
2. Suggestion (1 sentence):
Recommend a targeted action the account manager should take to proactively mitigate churn risk (e.g., outreach, pricing adjustment, product upgrade, proactive support).

3. Reason Category: Choose EXACTLY ONE from these 8 categories based on the primary underlying cause:
   - agent (issues with account management or support quality)
   - pricing (merchant dissatisfaction related to pricing or rates)
   - product (terminal issues or technology challenges)
   - service (issues with customer service or support)
   - seasonality (typical seasonal fluctuations)
   - microeconomic (local market conditions impacting merchant)
   - macroeconomic (broader economic conditions affecting industry/region)
   - cashflow (merchant-specific financial strain)

4. Suggested Action: Provide exactly one recommended action aligned with your chosen reason:
-Revise price (adjust pricing or offer incentives)
-Revise product (upgrade or replace terminal/product)
-call (make direct phone outreach)
-visit (schedule in-person visit from sales or service rep)
-MCA/loan (offer merchant cash advance or financial support)
-chargeback mitigation (provide solutions to reduce chargebacks)
-email (engage via targeted email communication)

IMPORTANT:
You MUST select the Reason from ONLY the 8 categories listed. Never write 'chargeback mitigation' or any Suggested Action in the Reason field.";

/// Compose the per-merchant user prompt around the rendered metrics block.
pub fn user_prompt(mid: &MerchantId, month: &str, metrics_block: &str) -> String {
    format!(
        "Arcum Churn Reason + Suggestion Model Prompt\n\
         \n\
         {FIELD_DEFINITIONS}\n\
         \n\
         {INPUT_EXAMPLE}\n\
         \n\
         Merchant MID: {mid}  Month: {month}\n\
         {metrics_block}\n\
         \n\
         Output format:\n\
         Reason_Detailed: <text>\n\
         Suggest_Detailed: <text>\n\
         Reason: <category>\n\
         Suggested: <action>\n"
    )
}
