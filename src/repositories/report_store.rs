//! Report data store: the ingestion adapter behind the report pipeline.
//!
//! Fetches raw attendance/sales/leave/expense rows filtered by employee and
//! date range. Rows come back loosely typed; the core validates each row
//! defensively and never trusts this layer for completeness or ordering.
//! The trait is mockable with mockall for handler and pipeline tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

use crate::error::AppError;
use crate::models::employee::Employee;
use crate::models::event::RawEvent;
use crate::models::expense::{ExpenseItem, ExpenseRecord, TargetRecord};
use crate::models::leave::{LeaveRecord, LeaveStatus};
use crate::models::sale::RawSaleEvent;
use crate::models::store::StoreRecord;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportStoreTrait: Send + Sync {
    /// Raw punch rows for a date range, optionally narrowed to one store.
    async fn fetch_attendance_rows(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_name: &str,
        store_name: Option<String>,
    ) -> Result<Vec<RawEvent>, AppError>;

    /// Raw sales rows for a date range, optionally narrowed to one store.
    async fn fetch_sales_rows(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_name: &str,
        store_name: Option<String>,
    ) -> Result<Vec<RawSaleEvent>, AppError>;

    /// Leave records overlapping the date range.
    async fn fetch_leaves(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LeaveRecord>, AppError>;

    /// Monthly expense baseline for the effective month, if any.
    async fn fetch_expense_baseline(
        &self,
        employee_id: &str,
        month: &str,
    ) -> Result<Option<ExpenseRecord>, AppError>;

    /// Monthly revenue target for the effective month, if any.
    async fn fetch_monthly_target(
        &self,
        employee_id: &str,
        month: &str,
    ) -> Result<Option<TargetRecord>, AppError>;

    /// All known stores, for the name to province lookup.
    async fn fetch_stores(&self) -> Result<Vec<StoreRecord>, AppError>;

    /// Employee lookup by exact name.
    async fn fetch_employee(&self, name: &str) -> Result<Option<Employee>, AppError>;
}

#[derive(Clone)]
pub struct ReportStore {
    pool: PgPool,
}

impl ReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStoreTrait for ReportStore {
    async fn fetch_attendance_rows(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_name: &str,
        store_name: Option<String>,
    ) -> Result<Vec<RawEvent>, AppError> {
        let rows = sqlx::query(
            "SELECT date::text AS date, time::text AS time, status, employee_name, store_name \
             FROM attendance_events \
             WHERE employee_name = $1 AND date >= $2 AND date <= $3 \
               AND ($4::text IS NULL OR store_name = $4) \
             ORDER BY date, time",
        )
        .bind(employee_name)
        .bind(start)
        .bind(end)
        .bind(store_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RawEvent {
                date: row.try_get("date").unwrap_or_default(),
                time: row.try_get("time").unwrap_or_default(),
                status: row.try_get("status").unwrap_or_default(),
                employee_name: row.try_get("employee_name").unwrap_or_default(),
                store_name: row.try_get("store_name").unwrap_or_default(),
            })
            .collect())
    }

    async fn fetch_sales_rows(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_name: &str,
        store_name: Option<String>,
    ) -> Result<Vec<RawSaleEvent>, AppError> {
        let rows = sqlx::query(
            "SELECT date::text AS date, product_name, quantity, amount, employee_name, store_name \
             FROM sales_events \
             WHERE employee_name = $1 AND date >= $2 AND date <= $3 \
               AND ($4::text IS NULL OR store_name = $4) \
             ORDER BY date",
        )
        .bind(employee_name)
        .bind(start)
        .bind(end)
        .bind(store_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RawSaleEvent {
                date: row.try_get("date").unwrap_or_default(),
                product_name: row.try_get("product_name").unwrap_or_default(),
                quantity: row.try_get("quantity").unwrap_or_default(),
                amount: row.try_get("amount").unwrap_or_default(),
                employee_name: row.try_get("employee_name").unwrap_or_default(),
                store_name: row.try_get("store_name").unwrap_or_default(),
            })
            .collect())
    }

    async fn fetch_leaves(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LeaveRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT employee_id, start_date, end_date, status, leave_type \
             FROM leave_records \
             WHERE employee_id = $1 AND start_date <= $2 AND end_date >= $3",
        )
        .bind(employee_id)
        .bind(end)
        .bind(start)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let start_date: NaiveDate = row.try_get("start_date").ok()?;
                let end_date: NaiveDate = row.try_get("end_date").ok()?;
                let status: String = row.try_get("status").unwrap_or_default();
                Some(LeaveRecord {
                    employee_id: row.try_get("employee_id").unwrap_or_default(),
                    start_date,
                    end_date,
                    status: LeaveStatus::parse(&status),
                    leave_type: row.try_get("leave_type").unwrap_or_default(),
                })
            })
            .collect())
    }

    async fn fetch_expense_baseline(
        &self,
        employee_id: &str,
        month: &str,
    ) -> Result<Option<ExpenseRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT label, amount \
             FROM expense_baselines \
             WHERE employee_id = $1 AND effective_month = $2 \
             ORDER BY label",
        )
        .bind(employee_id)
        .bind(month)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(ExpenseRecord {
            employee_id: employee_id.to_string(),
            effective_month: month.to_string(),
            items: rows
                .into_iter()
                .map(|row| ExpenseItem {
                    label: row.try_get("label").unwrap_or_default(),
                    amount: row.try_get("amount").unwrap_or_default(),
                })
                .collect(),
        }))
    }

    async fn fetch_monthly_target(
        &self,
        employee_id: &str,
        month: &str,
    ) -> Result<Option<TargetRecord>, AppError> {
        let row = sqlx::query(
            "SELECT target_revenue \
             FROM monthly_targets \
             WHERE employee_id = $1 AND effective_month = $2",
        )
        .bind(employee_id)
        .bind(month)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| TargetRecord {
            employee_id: employee_id.to_string(),
            effective_month: month.to_string(),
            target_revenue: row.try_get("target_revenue").unwrap_or_default(),
        }))
    }

    async fn fetch_stores(&self) -> Result<Vec<StoreRecord>, AppError> {
        let rows = sqlx::query("SELECT name, province FROM stores ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| StoreRecord {
                name: row.try_get("name").unwrap_or_default(),
                province: row.try_get("province").unwrap_or_default(),
            })
            .collect())
    }

    async fn fetch_employee(&self, name: &str) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, regular_day_off FROM employees WHERE TRIM(name) = TRIM($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Employee {
            id: row.try_get("id").unwrap_or_default(),
            name: row.try_get("name").unwrap_or_default(),
            regular_day_off: row.try_get("regular_day_off").unwrap_or_default(),
        }))
    }
}
