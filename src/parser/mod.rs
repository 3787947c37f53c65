//! Parser for the shell's compact report language
//!
//! ```text
//! age >= 18 and city = 'Recife' or supportLevel in ('strongSupport', 'undecided')
//! age desc, name
//! name, email, phone
//! ```

mod common;
mod filters;
mod listing;

use crate::core::ReportError;
use crate::query::{ReportFilter, ReportSort};
use nom::IResult;

fn finish<T>(result: IResult<&str, T>, what: &str) -> Result<T, ReportError> {
    match result {
        Ok((remaining, parsed)) => {
            if remaining.trim().is_empty() {
                Ok(parsed)
            } else {
                Err(ReportError::Parse(format!(
                    "Unexpected input after {what}: {}",
                    remaining.trim()
                )))
            }
        }
        Err(e) => Err(ReportError::Parse(format!("Invalid {what}: {e}"))),
    }
}

/// Parse a filter expression. Blank input means no filters.
pub fn parse_filters(input: &str) -> Result<Vec<ReportFilter>, ReportError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    finish(filters::filter_chain(input), "filter")
}

/// Parse a sort list such as `age desc, name`. Blank input means no sorting.
pub fn parse_sort(input: &str) -> Result<Vec<ReportSort>, ReportError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    finish(listing::sort_list(input), "sort list")
}

/// Parse a column list; blank input or `*` selects every column
pub fn parse_columns(input: &str) -> Result<Vec<String>, ReportError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    finish(listing::column_list(input), "column list")
}
