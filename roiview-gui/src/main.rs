//! ROI viewer GUI entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod message;
mod pipeline;
mod state;
mod ui;
mod util;
mod viewer;

use std::time::Duration;

use app::RoiViewerApp;
use clap::Parser;
use eframe::egui;
use roiview_core::BackendConfig;
use roiview_io::BackendClient;

/// Default API address: a local `roiview serve` proxy.
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Multi-channel ROI viewer.
#[derive(Parser)]
#[command(name = "roiview-gui", version, about)]
struct Args {
    /// API base address (the proxy or the backend itself)
    #[arg(long, env = "ROIVIEW_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = BackendConfig::new(&args.api_url)?;
    let client = BackendClient::new(config, Duration::from_secs(args.timeout_secs))?;

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Multi-Channel ROI Viewer"),
        ..Default::default()
    };
    eframe::run_native(
        "ROI Viewer",
        opts,
        Box::new(|cc| {
            ui::theme::configure_style(&cc.egui_ctx);
            Ok(Box::new(RoiViewerApp::new(client)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to start viewer: {e}"))
}
