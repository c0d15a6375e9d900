//! In-memory backend shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use damaged_box_common::DamagedBox;
use damaged_box_rust::api::RecordService;
use damaged_box_rust::error::{DashboardError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Stamp the fake server writes on every updated record
pub const SERVER_STAMP: &str = "2026-02-01T09:00:00Z";

/// 1x1 transparent PNG
pub const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
    0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
    0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
    0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
    0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[derive(Default)]
pub struct FakeService {
    pub records: Mutex<Vec<DamagedBox>>,
    pub images: HashMap<String, Vec<u8>>,
    pub fail_fetch: AtomicBool,
    pub fail_update: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub updates: Mutex<Vec<DamagedBox>>,
    pub image_requests: Mutex<Vec<String>>,
}

impl FakeService {
    pub fn with_records(records: Vec<DamagedBox>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, url: &str, data: &[u8]) -> Self {
        self.images.insert(url.to_string(), data.to_vec());
        self
    }

    pub fn set_records(&self, records: Vec<DamagedBox>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordService for FakeService {
    async fn fetch_all(&self) -> Result<Vec<DamagedBox>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(DashboardError::Retrieval);
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn update(&self, record: &DamagedBox) -> Result<()> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(DashboardError::UpdateFailed {
                id: record.id,
                reason: "status 500 Internal Server Error".into(),
            });
        }
        self.updates.lock().unwrap().push(record.clone());

        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(stored) => {
                *stored = record.clone();
                stored.created_at = Some(SERVER_STAMP.to_string());
                Ok(())
            }
            None => Err(DashboardError::UpdateFailed {
                id: record.id,
                reason: "status 404 Not Found".into(),
            }),
        }
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        self.image_requests.lock().unwrap().push(url.to_string());
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| DashboardError::ImageFetch(format!("{}: status 404 Not Found", url)))
    }
}

pub fn record(id: i64, asn: &str, qty: u64, issue_type: &str) -> DamagedBox {
    DamagedBox {
        id,
        asn_no: Some(asn.to_string()),
        qty,
        issue_type: issue_type.to_string(),
        created_at: Some("2026-01-18T08:30:00Z".to_string()),
        ..Default::default()
    }
}

/// `[{id:1, asn:A100, qty:5, Damaged}, {id:2, asn:B200, qty:3, Shortage}]`
pub fn two_records() -> Vec<DamagedBox> {
    vec![record(1, "A100", 5, "Damaged"), record(2, "B200", 3, "Shortage")]
}

pub fn ids(records: &[DamagedBox]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}
