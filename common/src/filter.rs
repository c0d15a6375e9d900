//! Record filtering and summary counters
//!
//! Filtering never reorders: the result is always a subsequence of the input.

use crate::types::DamagedBox;

/// Search term and issue-type selector that decide the visible subset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against `asn_no`
    pub search_term: String,
    /// Exact issue type; `None` shows every type
    pub issue_type: Option<String>,
}

impl FilterCriteria {
    pub fn new(search_term: impl Into<String>, issue_type: Option<String>) -> Self {
        let mut criteria = Self {
            search_term: search_term.into(),
            issue_type: None,
        };
        criteria.set_issue_type(issue_type);
        criteria
    }

    /// Replace the issue-type selector. An empty string clears it.
    pub fn set_issue_type(&mut self, issue_type: Option<String>) {
        self.issue_type = issue_type.filter(|t| !t.is_empty());
    }

    /// Toggle selection: picking the active type clears the filter,
    /// picking another type replaces it.
    pub fn select_issue_type(&mut self, issue_type: &str) {
        if self.issue_type.as_deref() == Some(issue_type) {
            self.issue_type = None;
        } else {
            self.set_issue_type(Some(issue_type.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.issue_type.is_none()
    }

    /// Inclusion rule for a single record
    pub fn matches(&self, record: &DamagedBox) -> bool {
        self.matches_search(record) && self.matches_issue_type(record)
    }

    fn matches_search(&self, record: &DamagedBox) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        record
            .asn_no
            .as_deref()
            .map(|asn| asn.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }

    fn matches_issue_type(&self, record: &DamagedBox) -> bool {
        match &self.issue_type {
            Some(issue_type) => &record.issue_type == issue_type,
            None => true,
        }
    }
}

/// Derived totals over the records currently in view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_issues: usize,
    pub total_qty: u64,
}

impl Summary {
    pub fn of(records: &[DamagedBox]) -> Self {
        Self {
            total_issues: records.len(),
            total_qty: records.iter().fold(0u64, |acc, r| acc.saturating_add(r.qty)),
        }
    }
}

/// Records matching `criteria`, in source order
pub fn apply_filter(records: &[DamagedBox], criteria: &FilterCriteria) -> Vec<DamagedBox> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// Number of records with the given issue type, ignoring any active filter
pub fn count_by_issue_type(records: &[DamagedBox], issue_type: &str) -> usize {
    records.iter().filter(|r| r.issue_type == issue_type).count()
}

/// Every non-empty issue type with its count, in first-seen order
pub fn issue_type_counts(records: &[DamagedBox]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records.iter().filter(|r| !r.issue_type.is_empty()) {
        match counts.iter_mut().find(|(t, _)| *t == record.issue_type) {
            Some((_, n)) => *n += 1,
            None => counts.push((record.issue_type.clone(), 1)),
        }
    }
    counts
}
