//! Filter evaluation for report queries
//!
//! Decides record inclusion for a list of typed filters. Supports: equals,
//! notEquals, contains, notContains, startsWith, endsWith, greaterThan,
//! lessThan, greaterThanOrEqual, lessThanOrEqual, between, in, notIn,
//! isEmpty, isNotEmpty, chained with AND/OR.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::core::{Record, ReportError, Value, violation};
use crate::query::{FilterOperator, LogicalOperator, ReportFilter, validate_filters};

/// How AND/OR links between consecutive filters are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainMode {
    /// AND binds tighter than OR: the list is split at OR links into groups
    /// and a record passes when every filter of some group passes.
    #[default]
    Standard,
    /// Parity with the old report builder: every filter must pass, except that
    /// an OR-linked filter passes for free when the previous filter passed.
    Legacy,
}

impl FromStr for ChainMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("Unknown chain mode: {other} (expected standard or legacy)")),
        }
    }
}

pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Keep the records that satisfy the filter list, in input order.
    ///
    /// Malformed filters (wrong value shape for the operator) are rejected
    /// with `InvalidArgument` instead of silently matching nothing.
    pub fn apply<'a, R: Record>(
        records: &'a [R],
        filters: &[ReportFilter],
        mode: ChainMode,
    ) -> Result<Vec<&'a R>, ReportError> {
        violation::into_result(validate_filters(filters, None))?;
        Ok(records
            .iter()
            .filter(|record| Self::matches(*record, filters, mode))
            .collect())
    }

    /// Evaluate a whole filter chain against one record
    pub fn matches<R: Record>(record: &R, filters: &[ReportFilter], mode: ChainMode) -> bool {
        match mode {
            ChainMode::Standard => Self::matches_standard(record, filters),
            ChainMode::Legacy => Self::matches_legacy(record, filters),
        }
    }

    fn matches_standard<R: Record>(record: &R, filters: &[ReportFilter]) -> bool {
        let mut group_passed = true;
        for (idx, filter) in filters.iter().enumerate() {
            if idx > 0 && filter.logical_operator == LogicalOperator::Or {
                if group_passed {
                    return true;
                }
                group_passed = true;
            }
            if group_passed {
                group_passed = Self::evaluate(record, filter);
            }
        }
        group_passed
    }

    fn matches_legacy<R: Record>(record: &R, filters: &[ReportFilter]) -> bool {
        let mut previous_passed = false;
        for (idx, filter) in filters.iter().enumerate() {
            let passed = Self::evaluate(record, filter);
            let linked_by_or = idx > 0 && filter.logical_operator == LogicalOperator::Or;
            if !passed && !(linked_by_or && previous_passed) {
                return false;
            }
            previous_passed = passed;
        }
        true
    }

    /// Evaluate a single filter against a record. Missing fields read as Null.
    pub fn evaluate<R: Record>(record: &R, filter: &ReportFilter) -> bool {
        let value = record.value_of(&filter.field);
        let operand = &filter.value;

        match filter.operator {
            FilterOperator::Equals => value.strict_eq(operand),
            FilterOperator::NotEquals => !value.strict_eq(operand),
            FilterOperator::Contains => Self::match_text(&value, operand, |v, p| v.contains(p)),
            FilterOperator::NotContains => !Self::match_text(&value, operand, |v, p| v.contains(p)),
            FilterOperator::StartsWith => Self::match_text(&value, operand, |v, p| v.starts_with(p)),
            FilterOperator::EndsWith => Self::match_text(&value, operand, |v, p| v.ends_with(p)),
            FilterOperator::GreaterThan => {
                matches!(value.compare_ordered(operand), Some(Ordering::Greater))
            }
            FilterOperator::LessThan => {
                matches!(value.compare_ordered(operand), Some(Ordering::Less))
            }
            FilterOperator::GreaterThanOrEqual => {
                matches!(value.compare_ordered(operand), Some(Ordering::Greater | Ordering::Equal))
            }
            FilterOperator::LessThanOrEqual => {
                matches!(value.compare_ordered(operand), Some(Ordering::Less | Ordering::Equal))
            }
            FilterOperator::Between => match operand.as_list() {
                Some([low, high]) => {
                    let ge_low = matches!(value.compare_ordered(low), Some(Ordering::Greater | Ordering::Equal));
                    let le_high = matches!(value.compare_ordered(high), Some(Ordering::Less | Ordering::Equal));
                    ge_low && le_high
                }
                _ => false,
            },
            FilterOperator::In => operand
                .as_list()
                .is_some_and(|candidates| Self::is_member(&value, candidates)),
            FilterOperator::NotIn => operand
                .as_list()
                .is_some_and(|candidates| !Self::is_member(&value, candidates)),
            FilterOperator::IsEmpty => value.is_empty_like(),
            FilterOperator::IsNotEmpty => !value.is_empty_like(),
        }
    }

    /// Case-insensitive text match on the rendered values
    fn match_text(value: &Value, pattern: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
        let text = value.to_text().to_lowercase();
        let pattern = pattern.to_text().to_lowercase();
        test(&text, &pattern)
    }

    /// List-valued fields are members when any of their elements is
    fn is_member(value: &Value, candidates: &[Value]) -> bool {
        match value {
            Value::List(items) => items
                .iter()
                .any(|item| candidates.iter().any(|c| item.strict_eq(c))),
            single => candidates.iter().any(|c| single.strict_eq(c)),
        }
    }
}
