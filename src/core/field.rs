use serde::Serialize;
use super::constraints::Constraint;
use super::data_type::FieldType;

/// One entry of a record schema: name, type and validation constraints
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub constraints: &'static [Constraint],
}

impl FieldSpec {
    #[must_use]
    pub const fn required(
        name: &'static str,
        field_type: FieldType,
        constraints: &'static [Constraint],
    ) -> Self {
        Self { name, field_type, required: true, constraints }
    }

    #[must_use]
    pub const fn optional(
        name: &'static str,
        field_type: FieldType,
        constraints: &'static [Constraint],
    ) -> Self {
        Self { name, field_type, required: false, constraints }
    }
}

/// Field table for a record shape
#[derive(Debug, Serialize)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}
