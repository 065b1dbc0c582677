use serde::{Deserialize, Serialize};

/// One itemized line of a monthly expense baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub label: String,
    pub amount: f64,
}

/// Fixed monthly expense baseline matched by employee and effective month
/// (`YYYY-MM`). Absence of a baseline degrades to zero, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub employee_id: String,
    pub effective_month: String,
    pub items: Vec<ExpenseItem>,
}

impl ExpenseRecord {
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.amount).sum()
    }
}

/// Monthly revenue target matched by employee and effective month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRecord {
    pub employee_id: String,
    pub effective_month: String,
    pub target_revenue: f64,
}

/// One line of the ROI expense breakdown with its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdownLine {
    pub label: String,
    pub amount: f64,
    pub share_percentage: f64,
}
