mod app;
mod color;
mod config;
mod data;
mod error;
mod export;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;

use app::DashboardApp;
use config::Config;
use data::filter::PayloadRange;
use state::{AppState, Dashboard};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    config.validate()?;

    match &config.export {
        Some(path) => export_headless(&config, path),
        None => run_gui(&config),
    }
}

/// Load the dataset, apply the requested controls and write the charts.
fn export_headless(config: &Config, path: &std::path::Path) -> Result<()> {
    let dataset = data::loader::load_file(&config.data)
        .with_context(|| format!("loading {}", config.data.display()))?;
    let range = config
        .payload_range()
        .unwrap_or_else(|| PayloadRange::full(&dataset));

    let mut dashboard = Dashboard::new(dataset);
    dashboard.select_site(config.site_selector())?;
    dashboard.set_payload_range(range)?;

    export::write_json(&dashboard, path)
}

fn run_gui(config: &Config) -> Result<()> {
    let mut state = AppState::new(config.payload_step);
    ui::panels::load_into(&mut state, &config.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
