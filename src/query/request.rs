use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::{ReportError, Schema, Value, Violation, ViolationKind};
use super::filter::ReportFilter;
use super::operator::{FilterOperator, ValueShape};
use super::sort::ReportSort;

/// Ad-hoc report definition as received from a caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    pub filters: Vec<ReportFilter>,
    #[serde(default)]
    pub sorting: Vec<ReportSort>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
}

impl ReportRequest {
    /// Decode a request; malformed JSON or unknown operators are rejected as
    /// `InvalidArgument`
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        serde_json::from_str(json)
            .map_err(|e| ReportError::InvalidArgument(format!("malformed report request: {e}")))
    }

    /// Check the request shape.
    ///
    /// With a schema, filter and sort fields must exist in it. Operand types are
    /// not checked here: a value that does not coerce simply fails to match.
    /// Returns every violation found.
    #[must_use]
    pub fn validate(&self, schema: Option<&Schema>) -> Vec<Violation> {
        let mut violations = validate_filters(&self.filters, schema);

        let mut seen = HashSet::new();
        for sort in &self.sorting {
            if sort.field.trim().is_empty() {
                violations.push(Violation::new(
                    "sorting",
                    ViolationKind::InvalidValue,
                    "sort field name must not be empty",
                ));
                continue;
            }
            if let Some(schema) = schema {
                if !schema.contains(&sort.field) {
                    violations.push(Violation::new(
                        sort.field.as_str(),
                        ViolationKind::UnknownField,
                        format!("is not a field of {}", schema.name),
                    ));
                }
            }
            if !seen.insert(sort.field.as_str()) {
                violations.push(Violation::new(
                    sort.field.as_str(),
                    ViolationKind::InvalidValue,
                    "is sorted more than once",
                ));
            }
        }

        if self.page == Some(0) {
            violations.push(Violation::new("page", ViolationKind::InvalidValue, "pages start at 1"));
        }
        if self.per_page == Some(0) {
            violations.push(Violation::new("perPage", ViolationKind::InvalidValue, "must be positive"));
        }

        violations
    }
}

/// Check filter shapes (and, with a schema, field names)
#[must_use]
pub fn validate_filters(filters: &[ReportFilter], schema: Option<&Schema>) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (idx, filter) in filters.iter().enumerate() {
        validate_filter(idx, filter, schema, &mut violations);
    }
    violations
}

fn validate_filter(
    idx: usize,
    filter: &ReportFilter,
    schema: Option<&Schema>,
    violations: &mut Vec<Violation>,
) {
    let op = filter.operator;
    if filter.field.trim().is_empty() {
        violations.push(Violation::new(
            format!("filters[{idx}]"),
            ViolationKind::InvalidValue,
            "field name must not be empty",
        ));
        return;
    }
    let field = filter.field.as_str();

    let shape_error = match (op.value_shape(), &filter.value) {
        (ValueShape::Absent, Value::Null) => None,
        (ValueShape::Absent, _) => Some(format!("operator '{op}' takes no value")),
        (ValueShape::Pair, Value::List(items)) if items.len() == 2 && items.iter().all(|v| !v.is_null()) => None,
        (ValueShape::Pair, _) => Some(format!("operator '{op}' takes a [min, max] array")),
        (ValueShape::List, Value::List(_)) => None,
        (ValueShape::List, _) => Some(format!("operator '{op}' takes an array of values")),
        (ValueShape::Scalar, Value::Null) => Some(format!("operator '{op}' requires a value")),
        (ValueShape::Scalar, Value::List(_)) => Some(format!("operator '{op}' takes a single value, not an array")),
        (ValueShape::Scalar, _) => None,
    };
    if let Some(message) = shape_error {
        violations.push(Violation::new(field, ViolationKind::InvalidValue, message));
        return;
    }

    if op == FilterOperator::Between {
        if let Some([min, max]) = filter.value.as_list().and_then(|items| <&[Value; 2]>::try_from(items).ok()) {
            match min.compare_ordered(max) {
                Some(std::cmp::Ordering::Greater) => violations.push(Violation::new(
                    field,
                    ViolationKind::InvalidValue,
                    format!("between range is inverted ({min} > {max})"),
                )),
                Some(_) => {}
                None => violations.push(Violation::new(
                    field,
                    ViolationKind::InvalidValue,
                    format!("between bounds {min} and {max} are not comparable"),
                )),
            }
        }
    }

    let Some(schema) = schema else {
        return;
    };
    if !schema.contains(field) {
        violations.push(Violation::new(
            field,
            ViolationKind::UnknownField,
            format!("is not a field of {}", schema.name),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VOTER_SCHEMA;
    use crate::query::SortDirection;

    #[test]
    fn test_decode_request_with_defaults() {
        let request = ReportRequest::from_json(
            r#"{"filters":[{"field":"age","operator":"greater_than","value":30}],"columns":["name"]}"#,
        )
        .unwrap();
        assert_eq!(request.filters[0].operator, FilterOperator::GreaterThan);
        assert_eq!(request.filters[0].value, Value::Integer(30));
        assert!(request.sorting.is_empty());
        assert_eq!(request.page, None);
    }

    #[test]
    fn test_decode_sorting_and_paging() {
        let request = ReportRequest::from_json(
            r#"{"sorting":[{"field":"age","direction":"desc"},{"field":"name"}],"page":2,"perPage":25}"#,
        )
        .unwrap();
        assert_eq!(request.sorting[0].direction, SortDirection::Desc);
        assert_eq!(request.sorting[1].direction, SortDirection::Asc);
        assert_eq!(request.per_page, Some(25));
    }

    #[test]
    fn test_unknown_operator_is_invalid_argument() {
        let result = ReportRequest::from_json(r#"{"filters":[{"field":"age","operator":"like","value":1}]}"#);
        assert!(matches!(result, Err(ReportError::InvalidArgument(_))));
    }

    #[test]
    fn test_value_shape_violations() {
        let request = ReportRequest {
            filters: vec![
                ReportFilter::new("email", FilterOperator::IsEmpty, "x"),
                ReportFilter::new("age", FilterOperator::Between, Value::List(vec![Value::Integer(1)])),
                ReportFilter::new("city", FilterOperator::In, "Recife"),
                ReportFilter::unary("city", FilterOperator::Equals),
            ],
            ..ReportRequest::default()
        };
        let violations = request.validate(None);
        assert_eq!(violations.len(), 4);
        assert!(violations.iter().all(|v| v.kind == ViolationKind::InvalidValue));
    }

    #[test]
    fn test_inverted_between_is_rejected() {
        let request = ReportRequest {
            filters: vec![ReportFilter::between("score", 10, 5)],
            ..ReportRequest::default()
        };
        let violations = request.validate(None);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("inverted"));
    }

    #[test]
    fn test_schema_checks() {
        let request = ReportRequest {
            filters: vec![
                ReportFilter::new("shoeSize", FilterOperator::Equals, 42),
                ReportFilter::new("electoralZone", FilterOperator::GreaterThan, 10),
                ReportFilter::new("age", FilterOperator::LessThan, "old"),
                ReportFilter::new("supportLevel", FilterOperator::Equals, "maybe"),
            ],
            sorting: vec![ReportSort::asc("age"), ReportSort::desc("age")],
            ..ReportRequest::default()
        };
        let violations = request.validate(Some(&VOTER_SCHEMA));
        let kinds: Vec<(&str, ViolationKind)> =
            violations.iter().map(|v| (v.field.as_str(), v.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("shoeSize", ViolationKind::UnknownField),
                ("age", ViolationKind::InvalidValue),
            ]
        );
    }

    #[test]
    fn test_zero_paging_is_rejected() {
        let request = ReportRequest {
            page: Some(0),
            per_page: Some(0),
            ..ReportRequest::default()
        };
        assert_eq!(request.validate(None).len(), 2);
    }
}
