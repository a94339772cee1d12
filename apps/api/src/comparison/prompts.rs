// LLM prompt constants for the Comparison module.

use crate::comparison::ComparisonPlan;

pub const COMPARISON_SYSTEM: &str = "You are an expert education consultant. \
    Be factual and balanced. If you are unsure of a figure, say it is an estimate.";

/// Comparison prompt template. Replace `{colleges}` and `{metrics}` before sending.
pub const COMPARISON_PROMPT_TEMPLATE: &str = r#"Compare the following colleges based on the selected metrics:

Colleges: {colleges}
Metrics: {metrics}

Return a detailed comparison table with normalized scores and a concise summary explaining which college is better for which metric. Include pros and cons for each college.

Format the response as:
1. Comparison table with ratings/values for each metric
2. Summary paragraph highlighting key differences
3. Recommendations based on different student priorities"#;

pub fn build_comparison_prompt(plan: &ComparisonPlan) -> String {
    let metrics = plan
        .metrics
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    COMPARISON_PROMPT_TEMPLATE
        .replace("{colleges}", &plan.colleges.join(", "))
        .replace("{metrics}", &metrics)
}
