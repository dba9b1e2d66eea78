use serde::Serialize;

use crate::errors::AppError;
use crate::models::screening::ScreeningRow;
use crate::screening::outcome::OutcomeCategory;
use crate::store::RecordStore;

/// A screening row with its outcome bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningView {
    #[serde(flatten)]
    pub screening: ScreeningRow,
    pub category: OutcomeCategory,
}

impl From<ScreeningRow> for ScreeningView {
    fn from(screening: ScreeningRow) -> Self {
        Self {
            category: OutcomeCategory::classify(screening.screening_outcome.as_deref()),
            screening,
        }
    }
}

/// All screenings, newest first, each tagged with its outcome category.
pub async fn list_screenings(store: &dyn RecordStore) -> Result<Vec<ScreeningView>, AppError> {
    let rows = store.list_screenings().await?;
    Ok(rows.into_iter().map(ScreeningView::from).collect())
}
