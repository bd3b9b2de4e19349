//! User settings stored as settings.json in the app data directory

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_URL, SERVER_URL_ENV};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Server
    pub server_url: String,
    pub request_timeout_secs: u64,

    // Restored into the input on start
    pub last_category: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            last_category: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Server URL after overrides: CLI flag, then environment, then file.
    /// The second value is true when an override won.
    pub fn resolve_server_url(&self, cli: Option<&str>) -> (String, bool) {
        let env = std::env::var(SERVER_URL_ENV).ok();
        self.resolve_server_url_with(cli, env.as_deref())
    }

    fn resolve_server_url_with(&self, cli: Option<&str>, env: Option<&str>) -> (String, bool) {
        let pick = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        if let Some(url) = pick(cli) {
            debug!(url = %url, "Server URL from command line");
            return (url, true);
        }
        if let Some(url) = pick(env) {
            debug!(url = %url, env = SERVER_URL_ENV, "Server URL from environment");
            return (url, true);
        }
        (self.server_url.clone(), false)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
