use serde::Serialize;

use crate::errors::AppError;
use crate::models::screening::{ScreeningRow, QUEUE_STATUS_PROCESSING};
use crate::screening::outcome::{OutcomeCategory, PASSED_OUTCOMES};
use crate::store::{Collection, RecordStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_jobs: i64,
    pub total_applications: i64,
    pub screened: i64,
    pub active_screenings: i64,
}

/// The four headline counts, fetched together.
pub async fn dashboard_stats(store: &dyn RecordStore) -> Result<DashboardStats, AppError> {
    let (total_jobs, total_applications, screened, active_screenings) = tokio::try_join!(
        store.count(Collection::Jobs),
        store.count(Collection::Applications),
        store.count_screenings_with_outcome(PASSED_OUTCOMES),
        store.count_queue_with_status(QUEUE_STATUS_PROCESSING),
    )?;

    Ok(DashboardStats {
        total_jobs,
        total_applications,
        screened,
        active_screenings,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub total_applications: i64,
    pub total_screened: usize,
    /// Mean final score over screenings that have one; `None` when none do.
    pub avg_score: Option<f64>,
    /// Share of screenings in the passed category, as a percentage.
    pub pass_rate: f64,
    pub pending: usize,
    pub passed: usize,
    pub rejected: usize,
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn compute_analytics(total_applications: i64, screenings: &[ScreeningRow]) -> Analytics {
    let scores: Vec<f64> = screenings.iter().filter_map(|s| s.final_score).collect();
    let avg_score = (!scores.is_empty())
        .then(|| round_one_decimal(scores.iter().sum::<f64>() / scores.len() as f64));

    let (mut pending, mut passed, mut rejected) = (0, 0, 0);
    for s in screenings {
        match OutcomeCategory::classify(s.screening_outcome.as_deref()) {
            OutcomeCategory::Pending => pending += 1,
            OutcomeCategory::Passed => passed += 1,
            OutcomeCategory::Rejected => rejected += 1,
            OutcomeCategory::Other => {}
        }
    }

    let total_screened = screenings.len();
    let pass_rate = if total_screened > 0 {
        round_one_decimal(passed as f64 / total_screened as f64 * 100.0)
    } else {
        0.0
    };

    Analytics {
        total_applications,
        total_screened,
        avg_score,
        pass_rate,
        pending,
        passed,
        rejected,
    }
}

pub async fn analytics(store: &dyn RecordStore) -> Result<Analytics, AppError> {
    let (total_applications, screenings) = tokio::try_join!(
        store.count(Collection::Applications),
        store.list_screenings(),
    )?;
    Ok(compute_analytics(total_applications, &screenings))
}
