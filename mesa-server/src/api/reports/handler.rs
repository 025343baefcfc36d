//! Reports API Handlers
//!
//! Chart datasets over finalized history. `start`/`end` are
//! YYYY-MM-DD; `end` is inclusive (it covers that whole day).

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::ServerState;
use crate::reporting::{
    self, OrdersByHour, QuantityByProduct, ReportRange, RevenueByCategory, RevenueByDay,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize, Default)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

fn day_start_millis(date: &str) -> AppResult<i64> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{date}', expected YYYY-MM-DD")))?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Validation(format!("Invalid date '{date}'")))?;
    Ok(midnight.and_utc().timestamp_millis())
}

fn parse_range(query: &RangeQuery) -> AppResult<ReportRange> {
    let start = query.start.as_deref().map(day_start_millis).transpose()?;
    // Exclusive upper bound: start of the day after `end`.
    let end = query
        .end
        .as_deref()
        .map(|d| day_start_millis(d).map(|ms| ms + 24 * 60 * 60 * 1000))
        .transpose()?;
    Ok(ReportRange { start, end })
}

/// GET /api/reports/revenue-by-day - 每日营收
pub async fn revenue_by_day(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<RevenueByDay>>> {
    let range = parse_range(&query)?;
    Ok(Json(reporting::revenue_by_day(&state.pool, range).await?))
}

/// GET /api/reports/quantity-by-product - 商品销量
pub async fn quantity_by_product(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<QuantityByProduct>>> {
    let range = parse_range(&query)?;
    Ok(Json(reporting::quantity_by_product(&state.pool, range).await?))
}

/// GET /api/reports/orders-by-hour - 分时订单量
pub async fn orders_by_hour(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<OrdersByHour>>> {
    let range = parse_range(&query)?;
    Ok(Json(reporting::orders_by_hour(&state.pool, range).await?))
}

/// GET /api/reports/revenue-by-category - 分类营收
pub async fn revenue_by_category(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<RevenueByCategory>>> {
    let range = parse_range(&query)?;
    Ok(Json(reporting::revenue_by_category(&state.pool, range).await?))
}
