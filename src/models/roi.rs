use serde::{Deserialize, Serialize};

use crate::models::expense::ExpenseBreakdownLine;
use crate::models::sale::ProductSales;

/// Aggregate KPIs for one employee over a date range.
///
/// `roi` and `revenue_per_expense` are deliberately distinct ratios
/// (net profit vs gross revenue over the same expense base) and both are
/// reported. Both degrade to 0 when expenses are 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiMetrics {
    pub total_sales: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub roi: f64,
    pub roi_percentage: f64,
    pub revenue_per_expense: f64,
    pub working_days: usize,
    pub full_attendance_days: usize,
    pub total_working_hours: f64,
    pub average_revenue_per_day: f64,
    pub average_revenue_per_hour: f64,
    pub daily_allowance: f64,
    pub top_products: Vec<ProductSales>,
    pub daily_trend: Vec<DailyTrendEntry>,
    pub expense_breakdown: Vec<ExpenseBreakdownLine>,
    /// Revenue against the monthly target, percent, 1 decimal. None when no
    /// target exists for the effective month (never zero).
    pub achievement_percentage: Option<f64>,
}

/// One point of the ROI daily trend. `allocated_expense` is a flat even
/// allocation of the period total over working days, not a per-date figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrendEntry {
    pub date_iso: String,
    pub sales: f64,
    pub estimated_profit: f64,
    pub allocated_expense: f64,
}
