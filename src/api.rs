//! Damaged-box REST client
//!
//! - `GET {api_url}`        record list
//! - `PUT {api_url}/{id}`   record update
//! - `GET {image url}`      photo bytes for the report

use crate::config::Config;
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use damaged_box_common::DamagedBox;
use std::time::Duration;

/// Backend the dashboard talks to
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Full record list. Any failure is reported as `DashboardError::Retrieval`.
    async fn fetch_all(&self) -> Result<Vec<DamagedBox>>;

    /// Send the record's current field values, keyed by its id
    async fn update(&self, record: &DamagedBox) -> Result<()>;

    /// Raw image content behind a locator
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpRecordService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("damaged-box/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn list_url(&self) -> &str {
        &self.base_url
    }

    pub fn record_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn fetch_all_inner(&self) -> Result<Vec<DamagedBox>> {
        let response = self.client.get(&self.base_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Status(format!("{} {}", status, body.trim())));
        }
        let text = response.text().await?;
        // The API answers `null` when the table is empty
        let records: Option<Vec<DamagedBox>> = serde_json::from_str(&text)?;
        Ok(records.unwrap_or_default())
    }
}

#[async_trait]
impl RecordService for HttpRecordService {
    async fn fetch_all(&self) -> Result<Vec<DamagedBox>> {
        tracing::debug!(url = %self.base_url, "fetching records");
        match self.fetch_all_inner().await {
            Ok(records) => {
                tracing::debug!("received {} records", records.len());
                Ok(records)
            }
            Err(e) => {
                tracing::error!(url = %self.base_url, "record retrieval failed: {}", e);
                Err(DashboardError::Retrieval)
            }
        }
    }

    async fn update(&self, record: &DamagedBox) -> Result<()> {
        let url = self.record_url(record.id);
        tracing::debug!(%url, "updating record");

        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| DashboardError::UpdateFailed {
                id: record.id,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::UpdateFailed {
                id: record.id,
                reason: format!("status {}: {}", status, body.trim()),
            });
        }
        Ok(())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DashboardError::ImageFetch(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::ImageFetch(format!("{}: status {}", url, status)));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DashboardError::ImageFetch(format!("{}: {}", url, e)))?;
        Ok(bytes.to_vec())
    }
}
