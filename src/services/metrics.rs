//! ROI and sales/attendance metric aggregation.
//!
//! All ratios degrade to 0 when their denominator is 0; missing reference
//! data (expense baseline, monthly target) degrades to zero/None. Data
//! quality anomalies never surface as errors.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::config::ReportConfig;
use crate::models::expense::{ExpenseBreakdownLine, ExpenseRecord, TargetRecord};
use crate::models::roi::{DailyTrendEntry, RoiMetrics};
use crate::models::sale::{ProductSales, SaleEvent};
use crate::models::session::Session;

/// Sessions longer than this are treated as corrupted and contribute zero
/// working time.
const MAX_SESSION_MILLIS: i64 = 24 * 3_600_000;

/// Label of the synthetic per-diem line in the expense breakdown.
pub const ALLOWANCE_LABEL: &str = "เบี้ยเลี้ยงรายวัน";

/// Top-N cutoff for the product ranking.
const TOP_PRODUCTS: usize = 5;

pub struct RoiInputs<'a> {
    pub dates: &'a [NaiveDate],
    pub sessions_by_day: &'a BTreeMap<NaiveDate, Vec<Session>>,
    pub sales: &'a [SaleEvent],
    pub expense_baseline: Option<&'a ExpenseRecord>,
    pub target: Option<&'a TargetRecord>,
}

#[derive(Debug, Default, PartialEq)]
pub struct WorkingTime {
    /// Days with at least one check-in.
    pub working_days: usize,
    /// Days with at least one completed check-in/check-out pair, the basis
    /// for the per-diem allowance.
    pub full_attendance_days: usize,
    pub total_millis: i64,
}

impl WorkingTime {
    pub fn total_hours(&self) -> f64 {
        self.total_millis as f64 / 3_600_000.0
    }
}

/// Tallies working days and hours. A session only adds to the total when its
/// duration is positive and under 24 hours.
pub fn working_time(sessions_by_day: &BTreeMap<NaiveDate, Vec<Session>>) -> WorkingTime {
    let mut tally = WorkingTime::default();
    for sessions in sessions_by_day.values() {
        if sessions.is_empty() {
            continue;
        }
        tally.working_days += 1;
        if sessions.iter().any(Session::is_closed) {
            tally.full_attendance_days += 1;
        }
        tally.total_millis += sessions
            .iter()
            .filter_map(Session::duration_millis)
            .filter(|millis| *millis < MAX_SESSION_MILLIS)
            .sum::<i64>();
    }
    tally
}

/// Groups sales by product name, revenue descending. Estimated profit is
/// `revenue * margin`, a fixed business assumption.
pub fn aggregate_products(sales: &[SaleEvent], margin: f64) -> Vec<ProductSales> {
    let mut by_product: HashMap<&str, (f64, f64)> = HashMap::new();
    for sale in sales {
        let entry = by_product.entry(sale.product_name.as_str()).or_default();
        entry.0 += sale.quantity;
        entry.1 += sale.amount;
    }

    let mut products: Vec<ProductSales> = by_product
        .into_iter()
        .map(|(name, (quantity, revenue))| ProductSales {
            product_name: name.to_string(),
            quantity,
            revenue,
            estimated_profit: revenue * margin,
        })
        .collect();
    products.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    products
}

pub fn top_products(sales: &[SaleEvent], margin: f64) -> Vec<ProductSales> {
    let mut products = aggregate_products(sales, margin);
    products.truncate(TOP_PRODUCTS);
    products
}

/// Computes the full KPI set for one employee over the requested dates.
pub fn build_roi_metrics(inputs: &RoiInputs<'_>, config: &ReportConfig) -> RoiMetrics {
    let time = working_time(inputs.sessions_by_day);

    let total_sales: f64 = inputs.sales.iter().map(|s| s.amount).sum();
    let baseline_total = inputs.expense_baseline.map(ExpenseRecord::total).unwrap_or(0.0);
    let daily_allowance = config.daily_allowance_rate * time.full_attendance_days as f64;
    let total_expenses = baseline_total + daily_allowance;
    let net_profit = total_sales - total_expenses;

    let (roi, revenue_per_expense) = if total_expenses > 0.0 {
        (net_profit / total_expenses, total_sales / total_expenses)
    } else {
        (0.0, 0.0)
    };

    let average_revenue_per_day = if time.working_days > 0 {
        total_sales / time.working_days as f64
    } else {
        0.0
    };
    let total_hours = time.total_hours();
    let average_revenue_per_hour = if total_hours > 0.0 {
        total_sales / total_hours
    } else {
        0.0
    };

    let achievement_percentage = inputs
        .target
        .filter(|t| t.target_revenue > 0.0)
        .map(|t| round1(total_sales / t.target_revenue * 100.0));

    RoiMetrics {
        total_sales,
        total_expenses,
        net_profit,
        roi,
        roi_percentage: roi * 100.0,
        revenue_per_expense,
        working_days: time.working_days,
        full_attendance_days: time.full_attendance_days,
        total_working_hours: total_hours,
        average_revenue_per_day,
        average_revenue_per_hour,
        daily_allowance,
        top_products: top_products(inputs.sales, config.profit_margin),
        daily_trend: daily_trend(
            inputs.dates,
            inputs.sales,
            total_expenses,
            time.working_days,
            config.profit_margin,
        ),
        expense_breakdown: expense_breakdown(inputs.expense_baseline, daily_allowance),
        achievement_percentage,
    }
}

/// One trend point per requested date. The expense is a flat even allocation
/// of the period total over working days, not a per-date figure.
fn daily_trend(
    dates: &[NaiveDate],
    sales: &[SaleEvent],
    total_expenses: f64,
    working_days: usize,
    margin: f64,
) -> Vec<DailyTrendEntry> {
    let allocated_expense = if working_days > 0 {
        total_expenses / working_days as f64
    } else {
        0.0
    };

    let mut sales_by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for sale in sales {
        *sales_by_day.entry(sale.date).or_default() += sale.amount;
    }

    dates
        .iter()
        .map(|date| {
            let day_sales = sales_by_day.get(date).copied().unwrap_or(0.0);
            DailyTrendEntry {
                date_iso: date.format("%Y-%m-%d").to_string(),
                sales: day_sales,
                estimated_profit: day_sales * margin,
                allocated_expense,
            }
        })
        .collect()
}

/// Baseline line items plus the synthetic allowance line, amount descending,
/// each with its share of the expense total.
fn expense_breakdown(
    baseline: Option<&ExpenseRecord>,
    daily_allowance: f64,
) -> Vec<ExpenseBreakdownLine> {
    let mut lines: Vec<(String, f64)> = baseline
        .map(|record| {
            record
                .items
                .iter()
                .map(|item| (item.label.clone(), item.amount))
                .collect()
        })
        .unwrap_or_default();
    lines.push((ALLOWANCE_LABEL.to_string(), daily_allowance));

    let total: f64 = lines.iter().map(|(_, amount)| amount).sum();
    lines.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    lines
        .into_iter()
        .map(|(label, amount)| ExpenseBreakdownLine {
            label,
            amount,
            share_percentage: if total > 0.0 {
                round1(amount / total * 100.0)
            } else {
                0.0
            },
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
