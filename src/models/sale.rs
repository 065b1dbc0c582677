use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time;

/// One sales row as stored externally, prior to validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSaleEvent {
    pub date: String,
    pub product_name: String,
    pub quantity: f64,
    pub amount: f64,
    pub employee_name: String,
    pub store_name: String,
}

/// A validated sales event attributed to a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleEvent {
    pub date: NaiveDate,
    pub product_name: String,
    pub quantity: f64,
    pub amount: f64,
}

impl RawSaleEvent {
    /// Parse-and-validate boundary for sales rows. Rows lacking a parsable
    /// date or a product name are skipped.
    pub fn parse(&self) -> Option<SaleEvent> {
        let date = time::parse_iso_date(&self.date)?;
        let product_name = self.product_name.trim();
        if product_name.is_empty() {
            return None;
        }
        Some(SaleEvent {
            date,
            product_name: product_name.to_string(),
            quantity: self.quantity,
            amount: self.amount,
        })
    }
}

/// Per-product sales rollup. Estimated profit assumes the configured fixed
/// margin, not a measured cost basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_name: String,
    pub quantity: f64,
    pub revenue: f64,
    pub estimated_profit: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_valid_row() {
        let raw = RawSaleEvent {
            date: "2024-01-10".into(),
            product_name: " Fish Sauce ".into(),
            quantity: 3.0,
            amount: 450.0,
            ..Default::default()
        };
        let sale = raw.parse().unwrap();
        assert_eq!(sale.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(sale.product_name, "Fish Sauce");
        assert_eq!(sale.amount, 450.0);
    }

    #[test]
    fn parse_skips_rows_missing_date_or_product() {
        let raw = RawSaleEvent {
            date: "10/01/2024".into(),
            product_name: "Fish Sauce".into(),
            ..Default::default()
        };
        assert!(raw.parse().is_none());

        let raw = RawSaleEvent {
            date: "2024-01-10".into(),
            product_name: "   ".into(),
            ..Default::default()
        };
        assert!(raw.parse().is_none());
    }
}
