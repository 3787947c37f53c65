use serde::{Deserialize, Serialize};

use crate::core::ReportError;

/// Pagination metadata returned next to every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Transform the page items, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

pub struct Paginator;

impl Paginator {
    /// Slice out page `page` (1-based) of `per_page` items.
    ///
    /// A page past the end is empty but still reports the totals.
    pub fn paginate<T: Clone>(records: &[T], page: usize, per_page: usize) -> Result<Page<T>, ReportError> {
        if page == 0 {
            return Err(ReportError::InvalidArgument("page must be at least 1".to_string()));
        }
        if per_page == 0 {
            return Err(ReportError::InvalidArgument("perPage must be positive".to_string()));
        }

        let total = records.len();
        let meta = PageMeta {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        };

        let data = (page - 1)
            .checked_mul(per_page)
            .filter(|start| *start < total)
            .map(|start| records.iter().skip(start).take(per_page).cloned().collect())
            .unwrap_or_default();

        Ok(Page { data, meta })
    }
}
