//! Dashboard state
//!
//! Holds the full record list, the filtered view and its summary, the edit
//! buffer and the queue of user-facing notices. Every failure path ends
//! with `is_loading == false` and a notice; nothing here is fatal.

use crate::api::RecordService;
use crate::error::{DashboardError, Result};
use crate::export::{self, ReportOptions};
use damaged_box_common::{
    apply_filter, count_by_issue_type, issue_type_counts, DamagedBox, FilterCriteria, Summary,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Message for the operator (the CLI prints these)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Private copy of one record being edited
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    id: i64,
    record: DamagedBox,
}

impl EditBuffer {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn record(&self) -> &DamagedBox {
        &self.record
    }

    /// Mutable access to the fields. The id is restored on save.
    pub fn record_mut(&mut self) -> &mut DamagedBox {
        &mut self.record
    }
}

pub struct Dashboard<S> {
    service: S,
    records: Vec<DamagedBox>,
    filtered: Vec<DamagedBox>,
    criteria: FilterCriteria,
    summary: Summary,
    is_loading: bool,
    edit: Option<EditBuffer>,
    notices: Vec<Notice>,
}

impl<S: RecordService> Dashboard<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            records: Vec::new(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            summary: Summary::default(),
            is_loading: false,
            edit: None,
            notices: Vec::new(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn records(&self) -> &[DamagedBox] {
        &self.records
    }

    pub fn filtered(&self) -> &[DamagedBox] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit.as_ref()
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.edit.as_mut()
    }

    /// Drain queued notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ---------------------------------------------------------------
    // Fetch
    // ---------------------------------------------------------------

    /// Fetch the full list and replace the in-memory records
    pub async fn fetch_data(&mut self) -> Result<()> {
        tracing::debug!("fetch started");
        self.is_loading = true;
        let result = self.service.fetch_all().await;
        self.apply_fetch_result(result)
    }

    /// Apply a finished fetch. The last result applied wins, whichever
    /// request it belonged to.
    pub fn apply_fetch_result(&mut self, result: Result<Vec<DamagedBox>>) -> Result<()> {
        self.is_loading = false;
        match result {
            Ok(records) => {
                tracing::info!("loaded {} records", records.len());
                self.records = records;
                self.apply_filter();
                Ok(())
            }
            Err(e) => {
                tracing::error!("fetch failed: {}", e);
                self.notices.push(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Periodic refresh. Skipped while an edit is open so the buffer is not
    /// shown against a list it no longer belongs to. Returns whether a fetch ran.
    pub async fn refresh_tick(&mut self) -> bool {
        if self.is_editing() {
            tracing::debug!("refresh skipped: edit in progress");
            return false;
        }
        // failure already queued as a notice; the next tick retries
        let _ = self.fetch_data().await;
        true
    }

    // ---------------------------------------------------------------
    // Filtering
    // ---------------------------------------------------------------

    fn apply_filter(&mut self) {
        self.filtered = apply_filter(&self.records, &self.criteria);
        self.summary = Summary::of(&self.filtered);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.apply_filter();
    }

    pub fn set_issue_type(&mut self, issue_type: Option<String>) {
        self.criteria.set_issue_type(issue_type);
        self.apply_filter();
    }

    /// Toggle an issue-type filter (selecting the active type clears it)
    pub fn select_issue_type(&mut self, issue_type: &str) {
        self.criteria.select_issue_type(issue_type);
        self.apply_filter();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.apply_filter();
    }

    /// Count over all records, independent of the active filter
    pub fn count_by_issue_type(&self, issue_type: &str) -> usize {
        count_by_issue_type(&self.records, issue_type)
    }

    pub fn issue_type_counts(&self) -> Vec<(String, usize)> {
        issue_type_counts(&self.records)
    }

    // ---------------------------------------------------------------
    // Edit
    // ---------------------------------------------------------------

    /// Open an edit buffer on a copy of the record with `id`.
    /// An edit already in progress is replaced.
    pub fn start_edit(&mut self, id: i64) -> Result<&mut EditBuffer> {
        let Some(record) = self.records.iter().find(|r| r.id == id) else {
            self.notices.push(Notice::error(format!("Record {} not found", id)));
            return Err(DashboardError::RecordNotFound(id));
        };
        tracing::debug!(id, "edit started");
        Ok(self.edit.insert(EditBuffer { id, record: record.clone() }))
    }

    pub fn cancel_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            tracing::debug!(id = edit.id, "edit cancelled");
        }
    }

    /// Send the buffer to the server. On success the buffer is dropped and
    /// the list is fetched again; on failure the buffer is kept.
    pub async fn save_update(&mut self) -> Result<()> {
        let Some(edit) = self.edit.as_mut() else {
            return Err(DashboardError::NoEditInProgress);
        };
        edit.record.id = edit.id;
        let id = edit.id;

        self.is_loading = true;
        let result = self.service.update(&edit.record).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                tracing::info!(id, "record updated");
                self.edit = None;
                self.notices.push(Notice::info(format!("Record {} updated", id)));
                // refresh failure is reported through its own notice
                let _ = self.fetch_data().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(id, "update failed: {}", e);
                self.notices.push(Notice::error(format!("Update failed: {}", e)));
                Err(e)
            }
        }
    }

    // ---------------------------------------------------------------
    // Export
    // ---------------------------------------------------------------

    /// Export the filtered view. Returns `None` when there is nothing to
    /// export or the export failed; both leave a notice.
    pub async fn export_report(
        &mut self,
        options: &ReportOptions,
        output_dir: &Path,
    ) -> Option<PathBuf> {
        if self.filtered.is_empty() {
            self.notices.push(Notice::error(DashboardError::EmptyExport.to_string()));
            return None;
        }

        self.is_loading = true;
        let result = export::export_report(&self.filtered, &self.service, options, output_dir).await;
        self.is_loading = false;

        match result {
            Ok(path) => {
                tracing::info!("report written: {}", path.display());
                self.notices.push(Notice::info(format!("Report saved: {}", path.display())));
                Some(path)
            }
            Err(e) => {
                tracing::error!("export failed: {}", e);
                self.notices.push(Notice::error(format!("Export failed: {}", e)));
                None
            }
        }
    }
}
