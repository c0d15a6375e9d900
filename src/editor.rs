//! Record field editing for the `update` command
//!
//! Fields come either from command-line flags or, when none are given,
//! from interactive prompts pre-filled with the current values.

use crate::error::{DashboardError, Result};
use clap::Args;
use damaged_box_common::DamagedBox;
use dialoguer::{Confirm, Input};

/// Field overrides given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct FieldEdits {
    /// New quantity
    #[arg(long)]
    pub qty: Option<u64>,

    /// New issue type
    #[arg(long)]
    pub issue_type: Option<String>,

    /// New carton number
    #[arg(long)]
    pub carton_no: Option<String>,

    /// New item SKU
    #[arg(long)]
    pub item_sku: Option<String>,

    /// New barcode
    #[arg(long)]
    pub barcode: Option<String>,

    /// New PO/document reference
    #[arg(long)]
    pub ref_po: Option<String>,
}

impl FieldEdits {
    pub fn is_empty(&self) -> bool {
        self.qty.is_none()
            && self.issue_type.is_none()
            && self.carton_no.is_none()
            && self.item_sku.is_none()
            && self.barcode.is_none()
            && self.ref_po.is_none()
    }

    pub fn apply(&self, record: &mut DamagedBox) {
        if let Some(qty) = self.qty {
            record.qty = qty;
        }
        if let Some(v) = &self.issue_type {
            record.issue_type = v.clone();
        }
        if let Some(v) = &self.carton_no {
            record.carton_no = v.clone();
        }
        if let Some(v) = &self.item_sku {
            record.item_sku = v.clone();
        }
        if let Some(v) = &self.barcode {
            record.barcode = v.clone();
        }
        if let Some(v) = &self.ref_po {
            record.ref_po_doc = v.clone();
        }
    }
}

fn prompt_text(label: &str, current: &str) -> Result<String> {
    Input::new()
        .with_prompt(label)
        .default(current.to_string())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| DashboardError::Prompt(e.to_string()))
}

/// Walk through the editable fields with the current values as defaults
pub fn prompt_fields(record: &mut DamagedBox) -> Result<()> {
    println!("Editing record #{} (Enter keeps the current value)", record.id);

    record.issue_type = prompt_text("Issue type", &record.issue_type)?;
    record.qty = Input::new()
        .with_prompt("Qty")
        .default(record.qty)
        .interact_text()
        .map_err(|e| DashboardError::Prompt(e.to_string()))?;
    record.carton_no = prompt_text("Carton No.", &record.carton_no)?;
    record.item_sku = prompt_text("Item SKU", &record.item_sku)?;
    record.barcode = prompt_text("Barcode", &record.barcode)?;
    record.ref_po_doc = prompt_text("Ref PO", &record.ref_po_doc)?;
    Ok(())
}

pub fn confirm_save(id: i64) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Save changes to record #{}?", id))
        .default(true)
        .interact()
        .map_err(|e| DashboardError::Prompt(e.to_string()))
}
