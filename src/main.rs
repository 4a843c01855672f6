//! Serial Scope - Main Entry Point
//!
//! Wires the acquisition backend to the eframe frontend: load config, spawn
//! the polling thread, run the window, then cancel and join the thread so
//! the serial port is released before the process exits.

use anyhow::{anyhow, Context};
use serialscope::{
    backend::{spawn_acquisition, PresentationBridge, SampleSource, SerialSource},
    config::{AppConfig, CONFIG_FILE},
    frontend::ScopeApp,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn build_source(config: &AppConfig) -> Box<dyn SampleSource> {
    #[cfg(feature = "mock-serial")]
    if config.serial.port == "mock" {
        tracing::info!("using mock sample source");
        return Box::new(serialscope::backend::MockSource::new());
    }
    Box::new(SerialSource::new(config.serial.clone()))
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,serialscope=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Serial Scope");

    let config_path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("loading config from {}", config_path))?;
    tracing::info!(
        port = %config.serial.port,
        baud = config.serial.baud_rate,
        capacity = config.acquisition.window_capacity(),
        "configuration loaded"
    );

    let bridge = Arc::new(PresentationBridge::new());
    let handle = spawn_acquisition(build_source(&config), &config.acquisition, bridge.clone())
        .context("spawning acquisition thread")?;
    let controls = handle.controls();
    let capacity = config.acquisition.window_capacity();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([300.0, 200.0])
            .with_title("Serial Scope"),
        ..Default::default()
    };

    let ui_config = config.ui.clone();
    let result = eframe::run_native(
        "Serial Scope",
        native_options,
        Box::new(move |_cc| Ok(Box::new(ScopeApp::new(bridge, controls, capacity, ui_config)))),
    );

    // Stop sampling and release the port before the process exits.
    tracing::info!("Shutting down...");
    handle.shutdown();

    result.map_err(|e| anyhow!("ui host failed: {e}"))
}
