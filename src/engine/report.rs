use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Record, ReportError, Violation, ViolationKind, violation};
use crate::query::ReportRequest;
use super::filter::{ChainMode, FilterEvaluator};
use super::paginate::{Page, Paginator};
use super::projection::{ColumnProjector, ProjectedRow};
use super::sort::SortComparator;

pub const DEFAULT_PER_PAGE: usize = 50;
pub const MAX_PER_PAGE: usize = 1000;

/// A page of projected rows plus pagination metadata
pub type ReportResponse = Page<ProjectedRow>;

/// Engine behaviour switches, normally filled from the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    pub chain_mode: ChainMode,
    /// Reject filter/sort fields that are not in the record schema
    pub strict_fields: bool,
    pub default_per_page: usize,
    pub max_per_page: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            chain_mode: ChainMode::Standard,
            strict_fields: true,
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
        }
    }
}

pub struct ReportExecutor;

impl ReportExecutor {
    /// Run a report: validate, filter, sort, paginate, project.
    pub fn run<R: Record>(
        records: &[R],
        request: &ReportRequest,
        options: &EngineOptions,
    ) -> Result<ReportResponse, ReportError> {
        let page = request.page.unwrap_or(1);
        let per_page = request.per_page.unwrap_or(options.default_per_page);

        let mut violations = request.validate(R::schema());
        if !options.strict_fields {
            violations.retain(|v| v.kind != ViolationKind::UnknownField);
        }
        if per_page > options.max_per_page {
            violations.push(Violation::new(
                "perPage",
                ViolationKind::InvalidValue,
                format!("must not exceed {}", options.max_per_page),
            ));
        }
        violation::into_result(violations)?;

        let filtered: Vec<&R> = records
            .iter()
            .filter(|record| FilterEvaluator::matches(*record, &request.filters, options.chain_mode))
            .collect();
        let sorted = SortComparator::sort(&filtered, &request.sorting);
        let paged = Paginator::paginate(&sorted, page, per_page)?;

        debug!(
            scanned = records.len(),
            matched = paged.meta.total,
            page = paged.meta.page,
            returned = paged.data.len(),
            "report executed"
        );

        Ok(paged.map(|record| ColumnProjector::project_one(record, &request.columns)))
    }
}
