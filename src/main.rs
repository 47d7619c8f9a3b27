use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use teleops_dash::app::TeleopsDashApp;
use teleops_dash::config::DashboardConfig;

#[derive(Parser)]
#[command(name = "teleops-dash")]
#[command(about = "Teleops signal dashboard", long_about = None)]
struct Cli {
    /// JSON config file; built-in defaults are used without one.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file to open, overriding `log_path` from the config.
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(log) = cli.log {
        config.log_path = log;
    }
    let title = config.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            // Install image loaders so the logo can be read from disk.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(TeleopsDashApp::new(config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
