use eframe::egui;
use spl_analyser::app::SplAnalyserApp;
use spl_analyser::config::AnalysisConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AnalysisConfig::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SPL Analyser",
        options,
        Box::new(|_cc| Ok(Box::new(SplAnalyserApp::new(config)))),
    )
}
