pub mod color;
pub mod config;
pub mod controller;
pub mod ui;

use crate::config::Config;
use crate::controller::ControllerHandle;
use crate::ui::JoytintUI;
use color_eyre::{eyre::eyre, Result};
use egui::ViewportBuilder;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = Config::load();

    info!(
        "Initializing controller with settings: {:?}",
        config.controller
    );
    let controller_handle = ControllerHandle::spawn(Some(config.controller.clone()))
        .map_err(|e| eyre!("Failed to spawn controller: {}", e))?;
    let axis_receiver = controller_handle.subscribe();

    // UI starten
    info!(
        "Starting window: {}x{}, vsync on",
        config.window.width, config.window.height
    );
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = ViewportBuilder::default()
        .with_inner_size(egui::vec2(config.window.width, config.window.height))
        .with_resizable(true);
    native_options.centered = true;
    native_options.vsync = true;

    let repaint_interval_ms = config.window.repaint_interval_ms;
    eframe::run_native(
        &config.window.title,
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(JoytintUI::new(
                cc,
                axis_receiver,
                repaint_interval_ms,
            )))
        }),
    )
    .map_err(|e| eyre!("Failed to create window: {}", e))?;

    info!("Window closed, shutting down");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
