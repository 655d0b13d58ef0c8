mod backend_bridge;
mod config;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{load_startup_config, Args};
use crate::controller::events::UiEvent;
use crate::ui::{theme, RiskConsoleApp};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_startup_config(&args)?;
    tracing::info!(backend_url = %config.backend_url, "starting risk console");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, config.backend_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Risk Console")
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Risk Console",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(theme::console_visuals());
            Ok(Box::new(RiskConsoleApp::new(cmd_tx, ui_rx, config)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to run risk console window: {err}"))
}
