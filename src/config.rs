use crate::error::{DashboardError, Result};
use damaged_box_common::export::excel_core::ImageMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/damaged-boxes";
pub const API_URL_ENV: &str = "DAMAGED_BOX_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub refresh_interval_secs: u64,
    pub timeout_seconds: u64,
    #[serde(with = "image_mode_serde")]
    pub image_mode: ImageMode,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            refresh_interval_secs: 30,
            timeout_seconds: 30,
            image_mode: ImageMode::Hyperlink,
            output_dir: None,
        }
    }
}

impl Config {
    /// Effective settings for a run: the saved file, then
    /// `DAMAGED_BOX_API_URL`, then `api_url` from the command line.
    /// The result is never written back.
    pub fn load(api_url: Option<&str>) -> Result<Self> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::load_saved()?.resolve(env_url.as_deref(), api_url)
    }

    /// Settings exactly as stored on disk
    pub fn load_saved() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Stored settings, or the defaults when the file cannot be read.
    /// Used by the `config` command so a broken file can be repaired.
    pub fn load_from_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Copy with the URL overrides applied, validated
    pub fn resolve(&self, env_url: Option<&str>, cli_url: Option<&str>) -> Result<Self> {
        let mut config = self.clone();
        for url in [env_url, cli_url].into_iter().flatten() {
            if !url.trim().is_empty() {
                config.api_url = url.trim().to_string();
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("damaged-box").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "api_url must start with http:// or https://: {}",
                self.api_url
            )));
        }
        if self.refresh_interval_secs == 0 {
            return Err(DashboardError::Config("refresh_interval_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn set_api_url(&mut self, url: String, path: &Path) -> Result<()> {
        self.api_url = url;
        self.save_to(path)
    }

    pub fn set_refresh_interval(&mut self, secs: u64, path: &Path) -> Result<()> {
        self.refresh_interval_secs = secs;
        self.save_to(path)
    }
}

mod image_mode_serde {
    use super::ImageMode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(mode: &ImageMode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&mode.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ImageMode, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
