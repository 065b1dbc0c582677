pub mod day_report;
pub mod employee;
pub mod event;
pub mod expense;
pub mod leave;
pub mod roi;
pub mod sale;
pub mod session;
pub mod store;

pub use day_report::*;
pub use employee::*;
pub use event::*;
pub use expense::*;
pub use leave::*;
pub use roi::*;
pub use sale::*;
pub use session::*;
pub use store::*;
