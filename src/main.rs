// Studio Scheduler Application
// Main entry point

use studio_scheduler::config::AppConfig;
use studio_scheduler::services::session::LocalSession;
use studio_scheduler::services::sync::LocalSyncAdapter;
use studio_scheduler::ui_egui::SchedulerApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Studio Scheduler");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Falling back to default configuration: {:#}", err);
            AppConfig::default()
        }
    };

    let adapter = Box::new(LocalSyncAdapter::new());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Studio Scheduler",
        options,
        Box::new(move |_cc| Ok(Box::new(SchedulerApp::new(config, adapter, LocalSession)))),
    )
}
