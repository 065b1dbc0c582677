//! Report routes: thin boundary validation around the pure report pipeline.
//!
//! Input validation failures are client errors here; data-quality anomalies
//! inside the pipeline are handled by policy and never fail a request.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::ReportConfig;
use crate::error::AppError;
use crate::models::employee::Employee;
use crate::models::roi::RoiMetrics;
use crate::services::calendar::{normalize_ranges, NormalizedRanges, RangeFallback};
use crate::services::report::{
    build_attendance_report, build_product_sales_report, build_roi_report, AttendanceReport,
    ProductSalesReport, ReportMode,
};
use crate::state::AppState;
use crate::utils::time;
use crate::validation::rules;

#[derive(Debug, Deserialize, Validate)]
pub struct AttendanceReportQuery {
    #[validate(custom(function = "rules::validate_employee_name"))]
    pub employee: String,
    /// Comma-separated range strings, `YYYY-MM-DD` or `YYYY-MM-DD:YYYY-MM-DD`.
    pub ranges: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub store: Option<String>,
    pub page: Option<usize>,
    #[serde(default)]
    pub export: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RoiReportQuery {
    #[validate(custom(function = "rules::validate_employee_name"))]
    pub employee: String,
    pub ranges: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub store: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoiReportResponse {
    pub employee_name: String,
    pub summary: String,
    pub metrics: RoiMetrics,
}

fn split_ranges(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn normalize(
    ranges: Option<&str>,
    fallback: RangeFallback,
    config: &ReportConfig,
) -> Result<(NormalizedRanges, NaiveDate, NaiveDate), AppError> {
    let today = time::today_local(&config.time_zone);
    let normalized = normalize_ranges(&split_ranges(ranges), &fallback, today);
    let (start, end) = normalized
        .bounds()
        .ok_or_else(|| AppError::BadRequest("Invalid date range".into()))?;
    Ok((normalized, start, end))
}

async fn lookup_employee(state: &AppState, name: &str) -> Result<Employee, AppError> {
    state
        .store
        .fetch_employee(name)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".into()))
}

pub async fn attendance_report(
    State(state): State<AppState>,
    Query(query): Query<AttendanceReportQuery>,
) -> Result<Json<AttendanceReport>, AppError> {
    query.validate()?;

    let config = state.config.report_config();
    let fallback = RangeFallback {
        year: query.year,
        month: query.month,
        day: query.day,
    };
    let (normalized, start, end) = normalize(query.ranges.as_deref(), fallback, &config)?;
    let employee = lookup_employee(&state, &query.employee).await?;

    let (rows, leaves, stores) = tokio::join!(
        state
            .store
            .fetch_attendance_rows(start, end, &employee.name, query.store.clone()),
        state.store.fetch_leaves(&employee.id, start, end),
        state.store.fetch_stores(),
    );
    let (rows, leaves, stores) = (rows?, leaves?, stores?);

    tracing::info!(
        employee = %employee.name,
        days = normalized.dates.len(),
        rows = rows.len(),
        export = query.export,
        "building attendance report"
    );

    let mode = if query.export {
        ReportMode::Export
    } else {
        ReportMode::Paginated(query.page.unwrap_or(1))
    };

    Ok(Json(build_attendance_report(
        &normalized,
        &rows,
        &leaves,
        &stores,
        &employee,
        query.store.as_deref(),
        mode,
        &config,
    )))
}

pub async fn roi_report(
    State(state): State<AppState>,
    Query(query): Query<RoiReportQuery>,
) -> Result<Json<RoiReportResponse>, AppError> {
    query.validate()?;

    let config = state.config.report_config();
    let fallback = RangeFallback {
        year: query.year,
        month: query.month,
        day: None,
    };
    let (normalized, start, end) = normalize(query.ranges.as_deref(), fallback, &config)?;
    let employee = lookup_employee(&state, &query.employee).await?;
    let effective_month = start.format("%Y-%m").to_string();

    let (sales, attendance, stores, baseline, target) = tokio::join!(
        state
            .store
            .fetch_sales_rows(start, end, &employee.name, query.store.clone()),
        state
            .store
            .fetch_attendance_rows(start, end, &employee.name, query.store.clone()),
        state.store.fetch_stores(),
        state.store.fetch_expense_baseline(&employee.id, &effective_month),
        state.store.fetch_monthly_target(&employee.id, &effective_month),
    );
    let (sales, attendance, stores) = (sales?, attendance?, stores?);
    let (baseline, target) = (baseline?, target?);

    if baseline.is_none() {
        tracing::warn!(employee = %employee.name, month = %effective_month, "no expense baseline");
    }
    if target.is_none() {
        tracing::warn!(employee = %employee.name, month = %effective_month, "no monthly target");
    }

    let metrics = build_roi_report(
        &normalized,
        &sales,
        &attendance,
        baseline.as_ref(),
        target.as_ref(),
        &stores,
        &employee,
        query.store.as_deref(),
        &config,
    );

    Ok(Json(RoiReportResponse {
        employee_name: employee.name,
        summary: normalized.summary,
        metrics,
    }))
}

pub async fn product_sales_report(
    State(state): State<AppState>,
    Query(query): Query<RoiReportQuery>,
) -> Result<Json<ProductSalesReport>, AppError> {
    query.validate()?;

    let config = state.config.report_config();
    let fallback = RangeFallback {
        year: query.year,
        month: query.month,
        day: None,
    };
    let (normalized, start, end) = normalize(query.ranges.as_deref(), fallback, &config)?;
    let employee = lookup_employee(&state, &query.employee).await?;

    let sales = state
        .store
        .fetch_sales_rows(start, end, &employee.name, query.store.clone())
        .await?;

    Ok(Json(build_product_sales_report(
        &normalized,
        &sales,
        &config,
    )))
}
