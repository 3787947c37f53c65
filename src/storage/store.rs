use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::{Record, ReportError, VOTER_SCHEMA, Violation, ViolationKind, violation};
use crate::engine::{EngineOptions, ReportExecutor, ReportResponse};
use crate::query::ReportRequest;
use super::saved_report::{NewReport, ReportUpdate, SavedReport};

const SNAPSHOT_FILE: &str = "reports.json";
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    reports: Vec<SavedReport>,
}

/// Saved report definitions, kept in memory and written through to a JSON
/// snapshot after every change
pub struct ReportStore {
    path: Option<PathBuf>,
    reports: Vec<SavedReport>,
}

impl ReportStore {
    /// Open (or start) the store under `data_dir`
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, ReportError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(SNAPSHOT_FILE);

        let reports = if path.exists() {
            let data = fs::read_to_string(&path)?;
            let snapshot: Snapshot = serde_json::from_str(&data)?;
            snapshot.reports
        } else {
            Vec::new()
        };
        info!(path = %path.display(), reports = reports.len(), "report store opened");

        Ok(Self {
            path: Some(path),
            reports,
        })
    }

    /// Store that never touches the disk
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            path: None,
            reports: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn create(&mut self, draft: NewReport) -> Result<SavedReport, ReportError> {
        let name = draft.name.trim().to_string();
        Self::check_definition(&name, &draft.filters, &draft.sorting, &draft.columns)?;

        let now = Utc::now();
        let report = SavedReport {
            id: Uuid::new_v4(),
            name,
            description: draft.description.filter(|d| !d.trim().is_empty()),
            filters: draft.filters,
            sorting: draft.sorting,
            columns: draft.columns,
            is_public: draft.is_public,
            created_by: draft.created_by,
            created_at: now,
            updated_at: now,
            usage_count: 0,
            last_used_at: None,
        };
        let mut next = self.reports.clone();
        next.push(report.clone());
        self.commit(next)?;
        info!(id = %report.id, name = %report.name, "saved report created");
        Ok(report)
    }

    pub fn get(&self, id: Uuid) -> Result<&SavedReport, ReportError> {
        self.reports
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ReportError::NotFound(id.to_string()))
    }

    /// Reports in creation order, optionally only the public ones
    #[must_use]
    pub fn list(&self, public_only: bool) -> Vec<&SavedReport> {
        self.reports
            .iter()
            .filter(|r| !public_only || r.is_public)
            .collect()
    }

    pub fn update(&mut self, id: Uuid, update: ReportUpdate) -> Result<SavedReport, ReportError> {
        let current = self.get(id)?;
        let name = update
            .name
            .map_or_else(|| current.name.clone(), |n| n.trim().to_string());
        let filters = update.filters.unwrap_or_else(|| current.filters.clone());
        let sorting = update.sorting.unwrap_or_else(|| current.sorting.clone());
        let columns = update.columns.unwrap_or_else(|| current.columns.clone());
        Self::check_definition(&name, &filters, &sorting, &columns)?;

        let mut next = self.reports.clone();
        let report = Self::slot(&mut next, id)?;
        report.name = name;
        report.filters = filters;
        report.sorting = sorting;
        report.columns = columns;
        if let Some(description) = update.description {
            report.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(is_public) = update.is_public {
            report.is_public = is_public;
        }
        report.updated_at = Utc::now();
        let updated = report.clone();

        self.commit(next)?;
        debug!(id = %id, "saved report updated");
        Ok(updated)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<SavedReport, ReportError> {
        let idx = self
            .reports
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ReportError::NotFound(id.to_string()))?;
        let mut next = self.reports.clone();
        let removed = next.remove(idx);
        self.commit(next)?;
        info!(id = %id, name = %removed.name, "saved report deleted");
        Ok(removed)
    }

    /// Count one run of the report
    pub fn record_usage(&mut self, id: Uuid) -> Result<SavedReport, ReportError> {
        let mut next = self.reports.clone();
        let report = Self::slot(&mut next, id)?;
        report.usage_count += 1;
        report.last_used_at = Some(Utc::now());
        let used = report.clone();
        self.commit(next)?;
        Ok(used)
    }

    /// Load a saved report, run it over `records` and count the use
    pub fn run_saved<R: Record>(
        &mut self,
        id: Uuid,
        records: &[R],
        page: Option<usize>,
        per_page: Option<usize>,
        options: &EngineOptions,
    ) -> Result<ReportResponse, ReportError> {
        let request = self.get(id)?.request(page, per_page);
        let response = ReportExecutor::run(records, &request, options)?;
        self.record_usage(id)?;
        Ok(response)
    }

    fn slot(reports: &mut [SavedReport], id: Uuid) -> Result<&mut SavedReport, ReportError> {
        reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ReportError::NotFound(id.to_string()))
    }

    fn check_definition(
        name: &str,
        filters: &[crate::query::ReportFilter],
        sorting: &[crate::query::ReportSort],
        columns: &[String],
    ) -> Result<(), ReportError> {
        let request = ReportRequest {
            filters: filters.to_vec(),
            sorting: sorting.to_vec(),
            columns: columns.to_vec(),
            page: None,
            per_page: None,
        };
        let mut violations = Vec::new();
        if name.is_empty() {
            violations.push(Violation::new("name", ViolationKind::Required, "is required"));
        }
        violations.extend(request.validate(Some(&VOTER_SCHEMA)));
        for column in columns {
            if !VOTER_SCHEMA.contains(column) {
                violations.push(Violation::new(
                    column.as_str(),
                    ViolationKind::UnknownField,
                    "is not a voter column",
                ));
            }
        }
        violation::into_result(violations)
    }

    /// Write `next` out, then make it the live list; on error nothing changes
    fn commit(&mut self, next: Vec<SavedReport>) -> Result<(), ReportError> {
        if let Some(path) = &self.path {
            Self::persist(path, &next)?;
        }
        self.reports = next;
        Ok(())
    }

    // Temp file + rename: the snapshot is replaced atomically
    fn persist(path: &Path, reports: &[SavedReport]) -> Result<(), ReportError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            reports: reports.to_vec(),
        };
        let encoded = serde_json::to_string_pretty(&snapshot)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, encoded)?;
        fs::rename(&tmp_path, path)?;
        debug!(path = %path.display(), reports = reports.len(), "report snapshot written");
        Ok(())
    }
}
