use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, PredictionClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{PredictorApp, StartupConfig};

const WINDOW_TITLE: &str = "Bike Rental Predictor";

#[derive(Parser, Debug)]
#[command(name = "bike-predict-gui", about = "Desktop form for bike rental predictions")]
struct Cli {
    /// Base URL of the prediction service; overrides config and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Config file; defaults to ./predictor.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings =
        load_settings(cli.config.as_deref()).context("failed to load client settings")?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    let client =
        PredictionClient::from_settings(&settings).context("failed to create prediction client")?;
    let startup = StartupConfig {
        api_url: client.api_url().to_string(),
        timing: settings.timing(),
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(client, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([560.0, 820.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(PredictorApp::new(startup, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("failed to run desktop window: {err}"))
}
