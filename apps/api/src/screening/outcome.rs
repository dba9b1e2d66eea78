use serde::Serialize;

/// Outcome literals counted as a pass.
pub const PASSED_OUTCOMES: &[&str] = &["pass", "passed", "completed"];
/// Outcome literals counted as a rejection.
pub const REJECTED_OUTCOMES: &[&str] = &["fail", "failed", "rejected"];

/// Screening outcomes are free text; this buckets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeCategory {
    Pending,
    Passed,
    Rejected,
    Other,
}

impl OutcomeCategory {
    pub fn classify(outcome: Option<&str>) -> Self {
        let normalized = outcome.map(|o| o.trim().to_lowercase()).unwrap_or_default();
        match normalized.as_str() {
            "" | "pending" => OutcomeCategory::Pending,
            o if PASSED_OUTCOMES.contains(&o) => OutcomeCategory::Passed,
            o if REJECTED_OUTCOMES.contains(&o) => OutcomeCategory::Rejected,
            _ => OutcomeCategory::Other,
        }
    }
}
