use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::{Record, Value};

/// A record reduced to the requested columns, in column order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedRow(pub Vec<(String, Value)>);

impl ProjectedRow {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.iter().find(|(name, _)| name == column).map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ProjectedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

pub struct ColumnProjector;

impl ColumnProjector {
    /// Project each record onto `columns`.
    ///
    /// Columns the record does not have are dropped, repeated columns are kept
    /// once, and an empty column list keeps every field.
    pub fn project<R: Record>(records: &[&R], columns: &[String]) -> Vec<ProjectedRow> {
        records.iter().map(|record| Self::project_one(*record, columns)).collect()
    }

    pub fn project_one<R: Record>(record: &R, columns: &[String]) -> ProjectedRow {
        let names: Vec<String> = if columns.is_empty() {
            record.field_names()
        } else {
            let mut unique: Vec<String> = Vec::with_capacity(columns.len());
            for column in columns {
                if !unique.contains(column) {
                    unique.push(column.clone());
                }
            }
            unique
        };

        ProjectedRow(
            names
                .into_iter()
                .filter_map(|name| record.field(&name).map(|value| (name, value)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{JsonRecord, Voter};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_projection_keeps_requested_order() {
        let record = JsonRecord::new().with("name", "Ana").with("score", 10).with("city", "Natal");
        let rows = ColumnProjector::project(&[&record], &cols(&["score", "name"]));
        assert_eq!(rows[0].columns().collect::<Vec<_>>(), vec!["score", "name"]);
        assert_eq!(
            serde_json::to_string(&rows[0]).unwrap(),
            r#"{"score":10,"name":"Ana"}"#
        );
    }

    #[test]
    fn test_unknown_and_repeated_columns() {
        let record = JsonRecord::new().with("name", "Ana");
        let row = ColumnProjector::project_one(&record, &cols(&["name", "shoeSize", "name"]));
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("name"), Some(&Value::Text("Ana".into())));
        assert_eq!(row.get("shoeSize"), None);
    }

    #[test]
    fn test_voter_projection_keeps_null_fields() {
        let voter = Voter::new("Ana");
        let row = ColumnProjector::project_one(&voter, &cols(&["name", "email"]));
        assert_eq!(row.get("email"), Some(&Value::Null));
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"name":"Ana","email":null}"#);
    }

    #[test]
    fn test_empty_columns_project_everything() {
        let voter = Voter::new("Ana");
        let row = ColumnProjector::project_one(&voter, &[]);
        assert_eq!(row.len(), voter.field_names().len());
        assert_eq!(row.columns().next(), Some("name"));
    }
}
