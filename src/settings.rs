use crate::board::note::PRESET_COLORS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the note storage service.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Keep notes in memory instead of talking to the service.
    #[serde(default)]
    pub offline: bool,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Also write logs to this file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Color preselected for new notes.
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default = "default_window_size")]
    pub window_size: (i32, i32),
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:3456/".into()
}

fn default_color() -> String {
    PRESET_COLORS[0].into()
}

fn default_window_size() -> (i32, i32) {
    (1200, 800)
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            offline: false,
            debug_logging: false,
            log_file: None,
            default_color: default_color(),
            window_size: default_window_size(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
