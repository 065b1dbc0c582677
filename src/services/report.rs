//! Report assembly: month bucketing, pagination, and the entry points the
//! HTTP layer calls once the raw rows are fetched. Everything here is pure;
//! the assembler is the only stage aware of the delivery mode.
//!
//! Pagination is month-based: one page is one month, selected 1-indexed from
//! the chronologically sorted month set. Export mode ignores pagination and
//! returns the complete row set; only the JSON view is paginated.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::models::day_report::{DayReport, MonthGroup};
use crate::models::employee::Employee;
use crate::models::event::RawEvent;
use crate::models::expense::{ExpenseRecord, TargetRecord};
use crate::models::leave::LeaveRecord;
use crate::models::roi::RoiMetrics;
use crate::models::sale::{ProductSales, RawSaleEvent, SaleEvent};
use crate::models::store::{province_lookup, StoreRecord};
use crate::services::calendar::NormalizedRanges;
use crate::services::day_status::{build_leave_map, classify_days};
use crate::services::metrics::{aggregate_products, build_roi_metrics, RoiInputs};
use crate::services::sessions::{sessions_by_day, SessionFilter};

/// How the assembled rows are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// JSON view; the page selects one month, 1-indexed.
    Paginated(usize),
    /// Downloadable report; always the full unpaginated row set.
    Export,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub total_pages: usize,
    pub current_month: Option<String>,
    pub months: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    pub employee_name: String,
    pub summary: String,
    pub months: Vec<MonthGroup>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySalesRow {
    pub date_iso: String,
    pub revenue: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSalesReport {
    pub summary: String,
    pub total_revenue: f64,
    pub total_quantity: f64,
    pub products: Vec<ProductSales>,
    pub daily: Vec<DailySalesRow>,
}

/// Buckets day reports by `YYYY-MM`, chronologically sorted.
pub fn group_by_month(days: Vec<DayReport>) -> Vec<MonthGroup> {
    let mut by_month: BTreeMap<String, Vec<DayReport>> = BTreeMap::new();
    for day in days {
        let month = day.date_iso.chars().take(7).collect::<String>();
        by_month.entry(month).or_default().push(day);
    }
    by_month
        .into_iter()
        .map(|(month, days)| MonthGroup { month, days })
        .collect()
}

fn paginate(groups: Vec<MonthGroup>, mode: ReportMode) -> (Vec<MonthGroup>, Pagination) {
    let months: Vec<String> = groups.iter().map(|g| g.month.clone()).collect();
    let total_pages = groups.len();

    match mode {
        ReportMode::Export => {
            let pagination = Pagination {
                page: 1,
                total_pages,
                current_month: None,
                months,
            };
            (groups, pagination)
        }
        ReportMode::Paginated(page) => {
            let page = page.max(1);
            let selected = groups.into_iter().nth(page - 1);
            let pagination = Pagination {
                page,
                total_pages,
                current_month: selected.as_ref().map(|g| g.month.clone()),
                months,
            };
            // A page past the last month yields an empty row set, not an error.
            (selected.into_iter().collect(), pagination)
        }
    }
}

/// Assembles the attendance report from pre-fetched rows.
#[allow(clippy::too_many_arguments)]
pub fn build_attendance_report(
    normalized: &NormalizedRanges,
    raw_rows: &[RawEvent],
    leaves: &[LeaveRecord],
    stores: &[StoreRecord],
    employee: &Employee,
    store_filter: Option<&str>,
    mode: ReportMode,
    config: &ReportConfig,
) -> AttendanceReport {
    let filter = SessionFilter {
        employee_name: &employee.name,
        store_name: store_filter,
    };
    let provinces = province_lookup(stores);
    let sessions = sessions_by_day(raw_rows, &filter, &provinces, &config.time_zone);
    let leave_map = build_leave_map(leaves);
    let days = classify_days(&normalized.dates, &sessions, &leave_map, employee);

    let (months, pagination) = paginate(group_by_month(days), mode);

    AttendanceReport {
        employee_name: employee.name.clone(),
        summary: normalized.summary.clone(),
        months,
        pagination,
    }
}

/// Assembles the ROI report from pre-fetched rows.
#[allow(clippy::too_many_arguments)]
pub fn build_roi_report(
    normalized: &NormalizedRanges,
    sales_rows: &[RawSaleEvent],
    attendance_rows: &[RawEvent],
    expense_baseline: Option<&ExpenseRecord>,
    target: Option<&TargetRecord>,
    stores: &[StoreRecord],
    employee: &Employee,
    store_filter: Option<&str>,
    config: &ReportConfig,
) -> RoiMetrics {
    let filter = SessionFilter {
        employee_name: &employee.name,
        store_name: store_filter,
    };
    let provinces = province_lookup(stores);
    let sessions = sessions_by_day(attendance_rows, &filter, &provinces, &config.time_zone);
    let sales = parse_sales(sales_rows, &normalized.dates);

    build_roi_metrics(
        &RoiInputs {
            dates: &normalized.dates,
            sessions_by_day: &sessions,
            sales: &sales,
            expense_baseline,
            target,
        },
        config,
    )
}

/// Assembles the product-sales report from pre-fetched sales rows.
pub fn build_product_sales_report(
    normalized: &NormalizedRanges,
    sales_rows: &[RawSaleEvent],
    config: &ReportConfig,
) -> ProductSalesReport {
    let sales = parse_sales(sales_rows, &normalized.dates);
    let products = aggregate_products(&sales, config.profit_margin);

    let mut daily: BTreeMap<NaiveDate, (f64, f64)> = normalized
        .dates
        .iter()
        .map(|date| (*date, (0.0, 0.0)))
        .collect();
    for sale in &sales {
        if let Some(entry) = daily.get_mut(&sale.date) {
            entry.0 += sale.amount;
            entry.1 += sale.quantity;
        }
    }

    ProductSalesReport {
        summary: normalized.summary.clone(),
        total_revenue: sales.iter().map(|s| s.amount).sum(),
        total_quantity: sales.iter().map(|s| s.quantity).sum(),
        products,
        daily: daily
            .into_iter()
            .map(|(date, (revenue, quantity))| DailySalesRow {
                date_iso: date.format("%Y-%m-%d").to_string(),
                revenue,
                quantity,
            })
            .collect(),
    }
}

/// Defensive parse of sales rows, keeping only rows inside the requested
/// dates.
fn parse_sales(rows: &[RawSaleEvent], dates: &[NaiveDate]) -> Vec<SaleEvent> {
    rows.iter()
        .filter_map(RawSaleEvent::parse)
        .filter(|sale| dates.binary_search(&sale.date).is_ok())
        .collect()
}
