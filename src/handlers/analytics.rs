use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::date_utils::year_range;
use crate::db::queries::transactions;
use crate::error::{AppError, AppResult};
use crate::services::trends::{monthly_category_trends, MonthlyTrends, DEFAULT_TREND_CATEGORIES};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TrendParams {
    pub year: Option<String>,
    /// Comma-separated category names; defaults to the standard chart categories.
    pub categories: Option<String>,
}

impl TrendParams {
    fn year(&self) -> AppResult<Option<i32>> {
        match self.year.as_deref().map(str::trim).filter(|y| !y.is_empty()) {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::InvalidArgument(format!("Invalid year: {}", raw))),
            None => Ok(None),
        }
    }

    fn categories(&self) -> Vec<&str> {
        let requested: Vec<&str> = self
            .categories
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if requested.is_empty() {
            DEFAULT_TREND_CATEGORIES.to_vec()
        } else {
            requested
        }
    }
}

pub async fn monthly_trends(
    State(state): State<AppState>,
    Query(params): Query<TrendParams>,
) -> AppResult<Json<MonthlyTrends>> {
    let range = params.year()?.map(year_range).transpose()?;
    let conn = state.db.get()?;

    let list = transactions::list_transactions(&conn, range.as_ref())?;
    Ok(Json(monthly_category_trends(&list, &params.categories())))
}
