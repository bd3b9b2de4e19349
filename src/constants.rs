//! Application constants and configuration

pub const APP_NAME: &str = "Wiki Cloud";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const SERVER_URL_ENV: &str = "WIKI_CLOUD_SERVER_URL";

/// Path segment the analysis endpoint lives under
pub const ANALYZE_PATH: &str = "analyze";

/// Shown for every failure kind (transport, HTTP status, bad JSON)
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while analyzing the category. Please try again.";

/// Only the front of the list becomes cards
pub const MAX_CARDS: usize = 20;

// Word cloud
pub const CLOUD_HEIGHT: f32 = 400.0;
pub const CLOUD_PADDING: f32 = 5.0;
pub const CLOUD_SIZE_BASE: f32 = 10.0;
pub const CLOUD_SIZE_SCALE: f32 = 0.5;
pub const CLOUD_FONT: &str = "Impact";
/// Re-layout when the container width drifts by more than this
pub const CLOUD_RELAYOUT_THRESHOLD: f32 = 24.0;
