// Module declarations
pub mod error;
pub mod value;
pub mod data_type;
pub mod constraints;
pub mod field;
pub mod violation;
pub mod record;
pub mod voter;
pub mod dataset;

// Re-exports for convenience
pub use error::ReportError;
pub use value::Value;
pub use data_type::FieldType;
pub use constraints::Constraint;
pub use field::{FieldSpec, Schema};
pub use violation::{Violation, ViolationKind};
pub use record::{JsonRecord, Record};
pub use voter::{ContactPreference, SupportLevel, Voter, VoterStatus, VOTER_FIELDS, VOTER_SCHEMA, validate_voter};
pub use dataset::Dataset;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Real(3.5).to_string(), "3.5");
        assert_eq!(Value::Real(10.0).to_string(), "10");
        assert_eq!(Value::Text("hello".to_string()).to_string(), "hello");
        assert_eq!(Value::Boolean(true).to_string(), "true");
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::Integer(2)]).to_text(),
            "a,2"
        );
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(Value::Date(date).to_text(), "2024-03-01");
    }

    #[test]
    fn test_value_as_number() {
        assert_eq!(Value::Integer(42).as_number(), Some(42.0));
        assert_eq!(Value::Text(" 7.5 ".to_string()).as_number(), Some(7.5));
        assert_eq!(Value::Text(String::new()).as_number(), None);
        assert_eq!(Value::Text("abc".to_string()).as_number(), None);
        assert_eq!(Value::Boolean(true).as_number(), Some(1.0));
        assert_eq!(Value::Null.as_number(), None);
        assert_eq!(Value::Real(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_value_strict_eq() {
        assert!(Value::Integer(5).strict_eq(&Value::Real(5.0)));
        assert!(!Value::Integer(5).strict_eq(&Value::Text("5".to_string())));
        assert!(Value::Null.strict_eq(&Value::Null));
        assert!(!Value::Null.strict_eq(&Value::Text(String::new())));

        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(Value::Date(date).strict_eq(&Value::from("2024-03-01")));

        let id = uuid::Uuid::new_v4();
        assert!(Value::Uuid(id).strict_eq(&Value::Text(id.to_string())));
    }

    #[test]
    fn test_value_is_empty_like() {
        assert!(Value::Null.is_empty_like());
        assert!(Value::Text(String::new()).is_empty_like());
        assert!(Value::Integer(0).is_empty_like());
        assert!(Value::Boolean(false).is_empty_like());
        assert!(Value::List(vec![]).is_empty_like());
        assert!(!Value::Text(" ".to_string()).is_empty_like());
        assert!(!Value::Integer(3).is_empty_like());
    }

    #[test]
    fn test_value_compare_ordered() {
        assert_eq!(
            Value::Integer(3).compare_ordered(&Value::Text("10".to_string())),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("2024-01-02").compare_ordered(&Value::from("2023-12-31")),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::from("abc").compare_ordered(&Value::Integer(1)), None);
    }

    #[test]
    fn test_value_sort_cmp_is_class_ranked() {
        assert_eq!(Value::Integer(2).sort_cmp(&Value::Real(1.5), false), Ordering::Greater);
        assert_eq!(Value::from("b").sort_cmp(&Value::from("a"), false), Ordering::Greater);
        assert_eq!(Value::Integer(1000).sort_cmp(&Value::from("a"), true), Ordering::Less);
        assert_eq!(Value::Boolean(false).sort_cmp(&Value::Boolean(true), false), Ordering::Less);
    }

    #[test]
    fn test_value_sort_cmp_numeric_text() {
        assert_eq!(Value::from("10").sort_cmp(&Value::from("9"), false), Ordering::Less);
        assert_eq!(Value::from("10").sort_cmp(&Value::from("9"), true), Ordering::Greater);
        assert_eq!(Value::Integer(20).sort_cmp(&Value::from("10"), true), Ordering::Greater);
        assert_eq!(Value::Integer(10).sort_cmp(&Value::from(" 10 "), true), Ordering::Equal);
        assert_eq!(Value::from("abc").sort_cmp(&Value::Integer(5), true), Ordering::Greater);
    }

    #[test]
    fn test_value_json_round_trip() {
        let value: Value = serde_json::from_str(r#"[5, 10.5, "x", null, true]"#).unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::Integer(5),
                Value::Real(10.5),
                Value::from("x"),
                Value::Null,
                Value::Boolean(true),
            ])
        );
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[5,10.5,"x",null,true]"#);
    }

    #[test]
    fn test_constraint_check() {
        assert!(Constraint::Email.check(&Value::from("a@b.co")).is_none());
        assert!(Constraint::Email.check(&Value::from("a@b")).is_some());
        assert!(Constraint::Range { min: 0.0, max: 10.0 }.check(&Value::Integer(11)).is_some());
        assert!(Constraint::MaxLength { max: 3 }.check(&Value::from("abcd")).is_some());
        assert!(Constraint::Digits.check(&Value::from("(11) 98765-4321")).is_none());
        assert!(Constraint::Digits.check(&Value::from("call me")).is_some());
        assert!(Constraint::NotBlank.check(&Value::Null).is_none());
    }
}
