use fieldops_backend::config::ReportConfig;
use fieldops_backend::models::employee::Employee;
use fieldops_backend::models::event::RawEvent;
use fieldops_backend::models::expense::{ExpenseItem, ExpenseRecord, TargetRecord};
use fieldops_backend::models::sale::RawSaleEvent;
use fieldops_backend::services::calendar::{normalize_ranges, NormalizedRanges, RangeFallback};
use fieldops_backend::services::metrics::ALLOWANCE_LABEL;
use fieldops_backend::services::report::{build_product_sales_report, build_roi_report};

use chrono::NaiveDate;

fn config() -> ReportConfig {
    ReportConfig {
        time_zone: "Asia/Bangkok".parse().unwrap(),
        daily_allowance_rate: 150.0,
        profit_margin: 0.3,
    }
}

fn somchai() -> Employee {
    Employee {
        id: "emp-1".into(),
        name: "Somchai".into(),
        regular_day_off: None,
    }
}

fn normalized(range: &str) -> NormalizedRanges {
    let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    normalize_ranges(&[range.to_string()], &RangeFallback::default(), today)
}

fn punch(date: &str, time: &str, status: &str) -> RawEvent {
    RawEvent {
        date: date.into(),
        time: time.into(),
        status: status.into(),
        employee_name: "Somchai".into(),
        store_name: "Store A".into(),
    }
}

fn sale(date: &str, product: &str, quantity: f64, amount: f64) -> RawSaleEvent {
    RawSaleEvent {
        date: date.into(),
        product_name: product.into(),
        quantity,
        amount,
        employee_name: "Somchai".into(),
        store_name: "Store A".into(),
    }
}

#[test]
fn roi_report_combines_sales_sessions_and_baseline() {
    let normalized = normalized("2024-01-01:2024-01-10");

    // Three full days, one dangling check-in day.
    let mut attendance = Vec::new();
    for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        attendance.push(punch(day, "08:00", "check-in"));
        attendance.push(punch(day, "16:00", "check-out"));
    }
    attendance.push(punch("2024-01-04", "08:00", "check-in"));

    let sales = vec![
        sale("2024-01-01", "Fish Sauce", 2.0, 3000.0),
        sale("2024-01-02", "Shrimp Paste", 1.0, 1500.0),
        sale("2024-01-02", "Fish Sauce", 1.0, 1000.0),
    ];
    let baseline = ExpenseRecord {
        employee_id: "emp-1".into(),
        effective_month: "2024-01".into(),
        items: vec![ExpenseItem {
            label: "fuel".into(),
            amount: 500.0,
        }],
    };
    let target = TargetRecord {
        employee_id: "emp-1".into(),
        effective_month: "2024-01".into(),
        target_revenue: 11_000.0,
    };

    let metrics = build_roi_report(
        &normalized,
        &sales,
        &attendance,
        Some(&baseline),
        Some(&target),
        &[],
        &somchai(),
        None,
        &config(),
    );

    assert_eq!(metrics.working_days, 4);
    assert_eq!(metrics.full_attendance_days, 3);
    assert_eq!(metrics.total_working_hours, 24.0);

    assert_eq!(metrics.total_sales, 5500.0);
    assert_eq!(metrics.daily_allowance, 450.0);
    assert_eq!(metrics.total_expenses, 950.0);
    assert_eq!(metrics.net_profit, 4550.0);
    assert_eq!(metrics.roi, 4550.0 / 950.0);
    assert_eq!(metrics.revenue_per_expense, 5500.0 / 950.0);
    assert_eq!(metrics.average_revenue_per_day, 1375.0);
    assert_eq!(metrics.average_revenue_per_hour, 5500.0 / 24.0);
    assert_eq!(metrics.achievement_percentage, Some(50.0));

    assert_eq!(metrics.top_products.len(), 2);
    assert_eq!(metrics.top_products[0].product_name, "Fish Sauce");
    assert_eq!(metrics.top_products[0].revenue, 4000.0);
    assert_eq!(metrics.top_products[0].quantity, 3.0);

    assert_eq!(metrics.daily_trend.len(), 10);
    assert!(metrics
        .daily_trend
        .iter()
        .all(|entry| entry.allocated_expense == 950.0 / 4.0));
    assert_eq!(metrics.daily_trend[0].sales, 3000.0);
    assert_eq!(metrics.daily_trend[4].sales, 0.0);

    assert_eq!(metrics.expense_breakdown.len(), 2);
    assert_eq!(metrics.expense_breakdown[0].label, "fuel");
    assert_eq!(metrics.expense_breakdown[1].label, ALLOWANCE_LABEL);
    assert_eq!(metrics.expense_breakdown[0].share_percentage, 52.6);
    assert_eq!(metrics.expense_breakdown[1].share_percentage, 47.4);
}

#[test]
fn roi_report_degrades_cleanly_without_reference_data() {
    let normalized = normalized("2024-01-01:2024-01-05");
    let metrics = build_roi_report(
        &normalized,
        &[],
        &[],
        None,
        None,
        &[],
        &somchai(),
        None,
        &config(),
    );
    assert_eq!(metrics.working_days, 0);
    assert_eq!(metrics.total_expenses, 0.0);
    assert_eq!(metrics.roi, 0.0);
    assert_eq!(metrics.revenue_per_expense, 0.0);
    assert_eq!(metrics.achievement_percentage, None);
    assert_eq!(metrics.daily_trend.len(), 5);
    // Only the synthetic allowance line, itself zero.
    assert_eq!(metrics.expense_breakdown.len(), 1);
    assert_eq!(metrics.expense_breakdown[0].amount, 0.0);
}

#[test]
fn product_sales_report_keeps_only_requested_dates() {
    let normalized = normalized("2024-01-01:2024-01-02");
    let sales = vec![
        sale("2024-01-01", "Fish Sauce", 1.0, 700.0),
        sale("2024-01-02", "Fish Sauce", 2.0, 800.0),
        sale("2024-02-15", "Fish Sauce", 9.0, 9000.0),
        sale("bad-date", "Fish Sauce", 1.0, 100.0),
    ];

    let report = build_product_sales_report(&normalized, &sales, &config());
    assert_eq!(report.summary, "1-2 มกราคม 2024");
    assert_eq!(report.total_revenue, 1500.0);
    assert_eq!(report.total_quantity, 3.0);
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].estimated_profit, 450.0);
    assert_eq!(report.daily.len(), 2);
    assert_eq!(report.daily[0].revenue, 700.0);
    assert_eq!(report.daily[1].quantity, 2.0);
}
