use serde::{Deserialize, Serialize};

/// Field employee subject to a report. `regular_day_off` is a weekday name,
/// accepted in English or Thai.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub regular_day_off: Option<String>,
}
