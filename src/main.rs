//! Wiki Cloud - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod cards;
mod cli;
mod client;
mod cloud;
mod constants;
mod error;
mod headless;
mod settings;
mod state;
mod theme;
mod types;
mod ui;
mod utils;

use anyhow::Context as _;
use app::App;
use clap::Parser;
use cli::{Args, Command};
use constants::*;
use eframe::egui;
use settings::Settings;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info};
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "wiki-cloud.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wiki_cloud=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

/// Headless mode keeps stdout for results and logs warnings to stderr
fn init_stderr_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let data_dir = args.data_dir.clone().unwrap_or_else(get_data_dir);
    std::fs::create_dir_all(&data_dir).ok();

    match args.command {
        Some(Command::Analyze { category, top }) => {
            init_stderr_logging();
            let settings = Settings::load(&data_dir);
            let (server_url, _) = settings.resolve_server_url(args.server.as_deref());
            headless::run(&server_url, settings.request_timeout(), &category, top)
        }
        None => {
            // Guard must live for entire app lifetime
            let _log_guard = init_logging(&data_dir);
            run_window(args.server, data_dir)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_window(server_override: Option<String>, data_dir: PathBuf) -> anyhow::Result<()> {
    info!(version = APP_VERSION, "Wiki Cloud starting");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    // Load saved window position/size
    let settings = Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1100.0, 820.0)))
        .with_min_inner_size([640.0, 480.0])
        .with_title(APP_NAME);

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, runtime, settings, server_override, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| {
        error!(error = %e, "Window failed");
        anyhow::anyhow!("failed to run window: {}", e)
    })
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        self.poll_inbox();

        self.render_settings_window(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(24, 0)),
            )
            .show(ctx, |ui| {
                self.render_main(ui, ctx);
            });

        // Keep the spinner animating while work is in flight
        if self.view.regions().loading || self.view.cloud_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        debug!("Saving settings on exit");
        self.save_settings();
        info!("Wiki Cloud exiting");
    }
}
