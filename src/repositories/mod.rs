pub mod report_store;

pub use report_store::{ReportStore, ReportStoreTrait};

#[cfg(test)]
pub use report_store::MockReportStoreTrait;
