//! Report definition types: filters, sort keys and the request envelope
//!
//! These are the plain data structures a caller sends; the engine module
//! evaluates them.

mod operator;
mod filter;
mod sort;
mod request;

pub use operator::{FilterOperator, LogicalOperator, ValueShape};
pub use filter::ReportFilter;
pub use sort::{ReportSort, SortDirection};
pub use request::{ReportRequest, validate_filters};
