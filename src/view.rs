//! Terminal rendering of the record table and summary

use damaged_box_common::export::excel_core::format_timestamp;
use damaged_box_common::highlight::{highlight, render};
use damaged_box_common::{DamagedBox, IssueBadge, Summary};
use chrono::FixedOffset;

const MARK_OPEN: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        value.to_string()
    } else {
        format!("{}{}", value, " ".repeat(width - len))
    }
}

/// ASN cell with the search term marked, padded to `width`
pub fn asn_cell(asn: Option<&str>, search: &str, width: usize) -> String {
    let asn = asn.unwrap_or("-");
    let padding = width.saturating_sub(asn.chars().count());
    let marked = render(&highlight(asn, search), MARK_OPEN, RESET);
    format!("{}{}", marked, " ".repeat(padding))
}

/// Issue type as a colored badge
pub fn issue_badge(issue_type: &str) -> String {
    let badge = IssueBadge::classify(issue_type);
    let label = if issue_type.is_empty() { "-" } else { issue_type };
    format!("\x1b[{}m {} {}", badge.ansi_style(), label, RESET)
}

pub fn print_table(records: &[DamagedBox], search: &str, offset: &FixedOffset) {
    println!(
        "{} {} {} {} {} {} {}",
        pad("ID", 6),
        pad("Date", 15),
        pad("ASN No.", 16),
        pad("Item SKU", 18),
        pad("Qty", 5),
        pad("Reporter", 12),
        "Issue Type"
    );
    for record in records {
        println!(
            "{} {} {} {} {} {} {}",
            pad(&record.id.to_string(), 6),
            pad(&format_timestamp(record.created_at.as_deref(), offset), 15),
            asn_cell(record.asn_no.as_deref(), search, 16),
            pad(&record.item_sku, 18),
            pad(&record.qty.to_string(), 5),
            pad(&record.saved_by, 12),
            issue_badge(&record.issue_type),
        );
    }
}

pub fn print_summary(summary: &Summary) {
    println!("Total issues: {}   Total qty: {}", summary.total_issues, summary.total_qty);
}

pub fn print_issue_type_counts(counts: &[(String, usize)]) {
    if counts.is_empty() {
        return;
    }
    let line: Vec<String> = counts
        .iter()
        .map(|(issue_type, n)| format!("{} {}", issue_badge(issue_type), n))
        .collect();
    println!("{}", line.join("  "));
}
