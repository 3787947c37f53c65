use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{ReportFilter, ReportRequest, ReportSort};

/// A named, persisted report definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub filters: Vec<ReportFilter>,
    #[serde(default)]
    pub sorting: Vec<ReportSort>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl SavedReport {
    /// The stored definition as a runnable request
    #[must_use]
    pub fn request(&self, page: Option<usize>, per_page: Option<usize>) -> ReportRequest {
        ReportRequest {
            filters: self.filters.clone(),
            sorting: self.sorting.clone(),
            columns: self.columns.clone(),
            page,
            per_page,
        }
    }
}

/// Input for creating a saved report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filters: Vec<ReportFilter>,
    #[serde(default)]
    pub sorting: Vec<ReportSort>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl NewReport {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial edit of a saved report; `None` leaves the field as it is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filters: Option<Vec<ReportFilter>>,
    #[serde(default)]
    pub sorting: Option<Vec<ReportSort>>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub is_public: Option<bool>,
}
