// Saved report persistence (JSON snapshot under the data directory)
pub mod saved_report;
pub mod store;

pub use saved_report::{NewReport, ReportUpdate, SavedReport};
pub use store::ReportStore;
