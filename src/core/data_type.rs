use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldType {
    // Numeric types
    Integer,
    Real,
    Decimal,
    // String types
    Text,
    TextList,
    // Boolean
    Boolean,
    // Date/Time types
    Date,
    Timestamp,
    // Special types
    Uuid,
    Enum { values: &'static [&'static str] },
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
            Self::Decimal => write!(f, "decimal"),
            Self::Text => write!(f, "text"),
            Self::TextList => write!(f, "text[]"),
            Self::Boolean => write!(f, "boolean"),
            Self::Date => write!(f, "date"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Uuid => write!(f, "uuid"),
            Self::Enum { values } => write!(f, "enum({})", values.join("|")),
        }
    }
}
