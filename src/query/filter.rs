use serde::{Deserialize, Serialize};
use crate::core::Value;
use super::operator::{FilterOperator, LogicalOperator};

/// A predicate over a single field.
///
/// `logical_operator` links this filter to the one before it and is ignored on
/// the first filter of a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
    #[serde(default)]
    pub logical_operator: LogicalOperator,
}

impl ReportFilter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            logical_operator: LogicalOperator::And,
        }
    }

    /// Filter for the operators that take no value
    pub fn unary(field: impl Into<String>, operator: FilterOperator) -> Self {
        Self::new(field, operator, Value::Null)
    }

    pub fn between(field: impl Into<String>, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Between, Value::List(vec![min.into(), max.into()]))
    }

    pub fn one_of<V: Into<Value>>(field: impl Into<String>, operator: FilterOperator, values: Vec<V>) -> Self {
        Self::new(
            field,
            operator,
            Value::List(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Link this filter to the previous one with OR
    #[must_use]
    pub fn or(mut self) -> Self {
        self.logical_operator = LogicalOperator::Or;
        self
    }
}
