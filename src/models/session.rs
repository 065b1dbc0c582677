use serde::{Deserialize, Serialize};

/// One reconstructed check-in/check-out work interval at a store. A session
/// without a matching checkout keeps an empty `check_out_time` and a zero
/// `check_out_timestamp` rather than being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub store_name: String,
    pub store_province: Option<String>,
    pub check_in_time: String,
    pub check_out_time: String,
    pub check_in_timestamp: i64,
    pub check_out_timestamp: i64,
}

impl Session {
    pub fn open(
        store_name: String,
        store_province: Option<String>,
        check_in_time: String,
        check_in_timestamp: i64,
    ) -> Self {
        Self {
            store_name,
            store_province,
            check_in_time,
            check_out_time: String::new(),
            check_in_timestamp,
            check_out_timestamp: 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.check_out_timestamp > 0
    }

    /// Session length in milliseconds. Only positive durations count; an
    /// unclosed session or a checkout earlier than the check-in yields None.
    pub fn duration_millis(&self) -> Option<i64> {
        if self.check_out_timestamp > self.check_in_timestamp {
            Some(self.check_out_timestamp - self.check_in_timestamp)
        } else {
            None
        }
    }
}
