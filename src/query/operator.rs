use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Operand shape an operator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// No value at all (`isEmpty`, `isNotEmpty`)
    Absent,
    Scalar,
    /// Two-element `[min, max]` array
    Pair,
    List,
}

/// Filter operators. Wire names are camelCase; the snake_case names used by
/// the persistence backend are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    #[serde(alias = "not_equals")]
    NotEquals,
    Contains,
    #[serde(alias = "not_contains")]
    NotContains,
    #[serde(alias = "starts_with")]
    StartsWith,
    #[serde(alias = "ends_with")]
    EndsWith,
    #[serde(alias = "greater_than")]
    GreaterThan,
    #[serde(alias = "less_than")]
    LessThan,
    #[serde(alias = "greater_than_or_equal")]
    GreaterThanOrEqual,
    #[serde(alias = "less_than_or_equal")]
    LessThanOrEqual,
    Between,
    In,
    #[serde(alias = "not_in")]
    NotIn,
    #[serde(alias = "is_empty")]
    IsEmpty,
    #[serde(alias = "is_not_empty")]
    IsNotEmpty,
}

impl FilterOperator {
    pub const ALL: [Self; 15] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::NotContains,
        Self::StartsWith,
        Self::EndsWith,
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterThanOrEqual,
        Self::LessThanOrEqual,
        Self::Between,
        Self::In,
        Self::NotIn,
        Self::IsEmpty,
        Self::IsNotEmpty,
    ];

    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::Between => "between",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
        }
    }

    /// snake_case name used by the persistence backend
    #[must_use]
    pub const fn backend_name(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::GreaterThanOrEqual => "greater_than_or_equal",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::Between => "between",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::IsEmpty => "is_empty",
            Self::IsNotEmpty => "is_not_empty",
        }
    }

    #[must_use]
    pub fn from_backend_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.backend_name() == name)
    }

    #[must_use]
    pub const fn value_shape(self) -> ValueShape {
        match self {
            Self::IsEmpty | Self::IsNotEmpty => ValueShape::Absent,
            Self::Between => ValueShape::Pair,
            Self::In | Self::NotIn => ValueShape::List,
            _ => ValueShape::Scalar,
        }
    }

    /// Operators that compare by order rather than equality or text
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(
            self,
            Self::GreaterThan
                | Self::LessThan
                | Self::GreaterThanOrEqual
                | Self::LessThanOrEqual
                | Self::Between
        )
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.wire_name() == s || op.backend_name() == s)
            .ok_or_else(|| format!("Unknown filter operator: {s}"))
    }
}

/// Connector between a filter and the one before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_and_backend_names() {
        for op in FilterOperator::ALL {
            assert_eq!(op.wire_name().parse::<FilterOperator>().unwrap(), op);
            assert_eq!(FilterOperator::from_backend_name(op.backend_name()), Some(op));
        }
        assert_eq!(FilterOperator::NotEquals.backend_name(), "not_equals");
        assert!("like".parse::<FilterOperator>().is_err());
    }

    #[test]
    fn test_serde_accepts_both_spellings() {
        let camel: FilterOperator = serde_json::from_str(r#""greaterThanOrEqual""#).unwrap();
        let snake: FilterOperator = serde_json::from_str(r#""greater_than_or_equal""#).unwrap();
        assert_eq!(camel, snake);
        assert_eq!(serde_json::to_string(&snake).unwrap(), r#""greaterThanOrEqual""#);
        assert!(serde_json::from_str::<FilterOperator>(r#""fuzzy""#).is_err());
    }

    #[test]
    fn test_value_shapes() {
        assert_eq!(FilterOperator::IsEmpty.value_shape(), ValueShape::Absent);
        assert_eq!(FilterOperator::Between.value_shape(), ValueShape::Pair);
        assert_eq!(FilterOperator::NotIn.value_shape(), ValueShape::List);
        assert_eq!(FilterOperator::Contains.value_shape(), ValueShape::Scalar);
    }
}
