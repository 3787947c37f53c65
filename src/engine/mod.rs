//! Report query engine
//!
//! `ReportExecutor::run` drives the pipeline: validate → filter → sort →
//! paginate → project. Each stage is usable on its own.

mod filter;
mod sort;
mod paginate;
mod projection;
mod report;

pub use filter::{ChainMode, FilterEvaluator};
pub use sort::SortComparator;
pub use paginate::{Page, PageMeta, Paginator};
pub use projection::{ColumnProjector, ProjectedRow};
pub use report::{DEFAULT_PER_PAGE, EngineOptions, MAX_PER_PAGE, ReportExecutor, ReportResponse};
