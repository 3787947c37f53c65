// reportql - ad-hoc report query engine over voter records
// Modular architecture: data model, report definitions, engine, service

// Clippy configuration - allow non-critical pedantic warnings
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::wildcard_enum_match_arm)]

// Data model: values, field schema, voter record, datasets, errors
pub mod core;

// Report definitions (filters, sorting, request envelope, validation)
pub mod query;

// Query engine (filter, sort, paginate, project)
pub mod engine;

// Text query language for the shell
pub mod parser;

// Saved report persistence
pub mod storage;

// Network protocol (TCP server, line-delimited JSON)
pub mod network;

// Table output for the command-line tools
pub mod render;

// Layered settings and tracing setup
pub mod settings;
pub mod logging;

// Re-export commonly used types for convenience
pub use core::{Dataset, JsonRecord, Record, ReportError, Value, Voter, validate_voter};
pub use query::{FilterOperator, LogicalOperator, ReportFilter, ReportRequest, ReportSort, SortDirection};
pub use engine::{ChainMode, EngineOptions, ReportExecutor, ReportResponse};
pub use parser::{parse_columns, parse_filters, parse_sort};
pub use storage::{ReportStore, SavedReport};
pub use network::Server;
pub use settings::Settings;
