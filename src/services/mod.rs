pub mod calendar;
pub mod day_status;
pub mod metrics;
pub mod report;
pub mod sessions;

pub use calendar::*;
pub use day_status::*;
pub use metrics::*;
pub use report::*;
pub use sessions::*;
