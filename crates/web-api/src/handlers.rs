use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use senti_bot_core::{size_position, CoreError, PerformanceStats, SignalType};
use senti_bot_data::{AnalyzedPostRow, PaperTradeRow, SignalRow};
use senti_bot_signals::ScanReport;

use crate::server::AppState;

#[derive(Deserialize)]
pub struct LimitQuery {
    limit: Option<i64>,
}

impl LimitQuery {
    fn limit_or(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, 500)
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: PerformanceStats,
    pub posts_analyzed_24h: i64,
}

#[derive(Deserialize)]
pub struct OpenTradeRequest {
    pub signal_id: i64,
    pub entry_price: Decimal,
}

#[derive(Deserialize)]
pub struct CloseTradeRequest {
    pub exit_price: Decimal,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Returns aggregate performance statistics.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if a query fails.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, StatusCode> {
    let stats = state
        .trades
        .performance_stats()
        .await
        .map_err(internal_error)?;
    let posts_analyzed_24h = state
        .posts
        .analyzed_last_24h()
        .await
        .map_err(internal_error)?;

    Ok(Json(StatsResponse {
        stats,
        posts_analyzed_24h,
    }))
}

/// Returns recent trading signals.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn get_signals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<SignalRow>>, StatusCode> {
    let signals = state
        .signals
        .recent(query.limit_or(20))
        .await
        .map_err(internal_error)?;
    Ok(Json(signals))
}

/// Returns recent paper trades.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn get_trades(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<PaperTradeRow>>, StatusCode> {
    let trades = state
        .trades
        .recent(query.limit_or(20))
        .await
        .map_err(internal_error)?;
    Ok(Json(trades))
}

/// Returns recently analyzed posts.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn get_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<AnalyzedPostRow>>, StatusCode> {
    let posts = state
        .posts
        .recent(query.limit_or(50))
        .await
        .map_err(internal_error)?;
    Ok(Json(posts))
}

/// Triggers a scan: fetch, classify, aggregate, and store signals.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the scan fails.
pub async fn trigger_scan(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScanReport>, StatusCode> {
    let report = state.pipeline.run_scan().await.map_err(|e| {
        tracing::error!(error = %e, "scan failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(report))
}

/// Opens a paper trade from a stored signal, sized by its confidence.
///
/// # Errors
/// Returns `StatusCode::NOT_FOUND` for an unknown signal id,
/// `StatusCode::BAD_REQUEST` for invalid prices, or
/// `StatusCode::INTERNAL_SERVER_ERROR` on persistence failure.
pub async fn open_trade(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenTradeRequest>,
) -> Result<(StatusCode, Json<PaperTradeRow>), StatusCode> {
    let signal = state
        .signals
        .get_by_id(req.signal_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let trade_type = SignalType::parse(&signal.signal_type).ok_or(StatusCode::CONFLICT)?;
    let position_size =
        size_position(signal.confidence_score, &state.sizing).map_err(core_error_status)?;

    let trade_id = state
        .trades
        .open(
            signal.id,
            &signal.asset,
            trade_type,
            req.entry_price,
            position_size,
        )
        .await
        .map_err(anyhow_error_status)?;

    let trade = state
        .trades
        .get_by_id(trade_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok((StatusCode::CREATED, Json(trade)))
}

/// Closes a paper trade and realizes its PnL.
///
/// # Errors
/// Returns `StatusCode::NOT_FOUND` for an unknown trade,
/// `StatusCode::CONFLICT` if it is already closed, or
/// `StatusCode::BAD_REQUEST` for an invalid exit price.
pub async fn close_trade(
    State(state): State<Arc<AppState>>,
    Path(trade_id): Path<i64>,
    Json(req): Json<CloseTradeRequest>,
) -> Result<Json<PaperTradeRow>, StatusCode> {
    let trade = state
        .trades
        .close(trade_id, req.exit_price)
        .await
        .map_err(anyhow_error_status)?;
    Ok(Json(trade))
}

fn internal_error(e: anyhow::Error) -> StatusCode {
    tracing::error!(error = %e, "request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

fn core_error_status(e: CoreError) -> StatusCode {
    match e {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::PositionNotFound(_) => StatusCode::NOT_FOUND,
        CoreError::PositionAlreadyClosed(_) => StatusCode::CONFLICT,
    }
}

fn anyhow_error_status(e: anyhow::Error) -> StatusCode {
    match e.downcast_ref::<CoreError>() {
        Some(CoreError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(CoreError::PositionNotFound(_)) => StatusCode::NOT_FOUND,
        Some(CoreError::PositionAlreadyClosed(_)) => StatusCode::CONFLICT,
        None => internal_error(e),
    }
}
