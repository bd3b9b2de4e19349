//! App module - contains the main application state and logic

mod analysis;
mod views;

use crate::client::AnalysisClient;
use crate::cloud::PlacedWord;
use crate::error::AnalysisError;
use crate::settings::Settings;
use crate::state::ViewState;
use crate::theme;
use crate::types::AnalysisResponse;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

/// Results handed back from background tasks, drained once per frame
#[derive(Default)]
pub(crate) struct Inbox {
    pub(crate) analyses: Vec<(u64, Result<AnalysisResponse, AnalysisError>)>,
    pub(crate) layouts: Vec<(u64, Vec<PlacedWord>)>,
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) view: ViewState,
    pub(crate) category_input: String,
    pub(crate) focus_input: bool,
    // Server connection
    pub(crate) client: Result<AnalysisClient, String>,
    pub(crate) server_url: String,
    pub(crate) server_url_input: String,
    pub(crate) server_url_overridden: bool,
    pub(crate) request_timeout: Duration,
    // Background work
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) inbox: Arc<Mutex<Inbox>>,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) show_settings: bool,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Runtime,
        settings: Settings,
        server_override: Option<String>,
        data_dir: PathBuf,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let (server_url, server_url_overridden) =
            settings.resolve_server_url(server_override.as_deref());
        let request_timeout = settings.request_timeout();
        let client = Self::build_client(&server_url, request_timeout);

        info!(
            server = %server_url,
            overridden = server_url_overridden,
            timeout_secs = request_timeout.as_secs(),
            "Analysis server configured"
        );

        Self {
            view: ViewState::new(),
            category_input: settings.last_category.clone().unwrap_or_default(),
            focus_input: true,
            client,
            server_url_input: server_url.clone(),
            server_url,
            server_url_overridden,
            request_timeout,
            runtime,
            inbox: Arc::new(Mutex::new(Inbox::default())),
            settings,
            show_settings: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    fn build_client(server_url: &str, timeout: Duration) -> Result<AnalysisClient, String> {
        AnalysisClient::new(server_url, timeout).map_err(|e| {
            warn!(error = %e, "Analysis client unavailable");
            e.to_string()
        })
    }

    /// Use the URL typed in the settings panel from now on
    pub fn apply_server_url(&mut self) {
        let url = self.server_url_input.trim().to_string();
        if url == self.server_url && self.client.is_ok() {
            return;
        }
        info!(server = %url, "Server URL changed");
        self.client = Self::build_client(&url, self.request_timeout);
        self.server_url = url;
        self.server_url_overridden = false;
        self.save_settings();
    }

    pub fn save_settings(&self) {
        let mut settings = self.settings.clone();
        settings.window_x = self.window_pos.map(|p| p.x);
        settings.window_y = self.window_pos.map(|p| p.y);
        settings.window_w = self.window_size.map(|s| s.x);
        settings.window_h = self.window_size.map(|s| s.y);
        // Overrides from the command line or environment are not persisted
        if !self.server_url_overridden {
            settings.server_url = self.server_url.clone();
        }
        settings.last_category = self
            .view
            .category()
            .map(str::to_string)
            .or(settings.last_category);
        settings.save(&self.data_dir);
    }
}
