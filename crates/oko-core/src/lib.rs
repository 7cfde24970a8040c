pub mod domain;
pub mod error;
pub mod limit;
pub mod report;

pub use domain::*;
pub use error::CoreError;
pub use limit::{evaluate_window, LimitDecision, RateLimits};
pub use report::{build_report, DataLine, RecordBlock, ReportSummary};
