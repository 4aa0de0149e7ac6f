use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Local;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::date_utils::resolve_period;
use crate::db::queries::transactions;
use crate::error::{AppError, AppResult};
use crate::models::{
    DeletedTransaction, Transaction, TransactionListing, TransactionPage, TransactionPayload,
};
use crate::services::summary::summarize;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub month: Option<String>,
    pub year: Option<String>,
}

/// Parse a path id. Malformed ids are rejected before the store is touched.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidArgument("Invalid transaction ID".into()))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<TransactionListing>> {
    let period = resolve_period(params.month.as_deref(), params.year.as_deref())?;
    let conn = state.db.get()?;

    let Some(period) = period else {
        let all = transactions::list_transactions(&conn, None)?;
        return Ok(Json(TransactionListing::All(all)));
    };

    let range = period.date_range();
    debug!(period = %period, start = %range.start, end = %range.end, "Listing transactions for period");
    let list = transactions::list_transactions(&conn, Some(&range))?;
    let summary = summarize(&list);

    Ok(Json(TransactionListing::Period(TransactionPage {
        transactions: list,
        summary,
    })))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    let id = parse_id(&id)?;
    let conn = state.db.get()?;

    transactions::get_transaction(&conn, id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Transaction not found".into()))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> AppResult<Response> {
    let Json(payload) =
        payload.map_err(|e| AppError::InvalidArgument(format!("Invalid data: {}", e.body_text())))?;

    let new_transaction = payload.into_new_transaction(Local::now().date_naive())?;
    debug!(category = %new_transaction.category, amount_cents = new_transaction.amount_cents, "Creating transaction");

    let conn = state.db.get()?;
    let created = transactions::create_transaction(&conn, &new_transaction)?;
    info!(transaction_id = %created.id, "Transaction created");

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeletedTransaction>> {
    let id = parse_id(&id)?;
    info!(transaction_id = %id, "Deleting transaction");
    let conn = state.db.get()?;

    if !transactions::delete_transaction(&conn, id)? {
        return Err(AppError::NotFound("Transaction not found".into()));
    }

    Ok(Json(DeletedTransaction { deleted_id: id }))
}
