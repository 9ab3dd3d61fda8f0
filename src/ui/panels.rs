use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{peak_colors, tier_color};
use crate::data::loader::{export_report_json, export_series_csv, load_file, LOG_EXTENSIONS};
use crate::data::model::{LoadedLog, SampleRecord};
use crate::state::{AppState, Phase};

// ---------------------------------------------------------------------------
// Left side panel – report
// ---------------------------------------------------------------------------

/// Render the report panel for the current phase.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("SPL Analyser");
    ui.separator();

    let mut open_requested = false;
    let mut reset_requested = false;

    match &state.phase {
        Phase::Idle => {
            ui.label("Turn raw SPL logs into loudness trends, peak moments and a report.");
            ui.add_space(8.0);
            open_requested = ui.button("Open log…").clicked();
        }
        Phase::Analyzing => {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Analyzing…");
            });
        }
        Phase::Error(msg) => {
            ui.label(RichText::new("Analysis Failed").strong().color(Color32::RED));
            ui.label(msg);
            ui.add_space(8.0);
            reset_requested = ui.button("Try Again").clicked();
        }
        Phase::Complete(report) => {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    report_view(ui, report, state);
                    ui.add_space(12.0);
                    reset_requested = ui.button("Analyze New Log").clicked();
                });
        }
    }

    if reset_requested {
        state.reset();
    }
    if open_requested {
        open_file_dialog(state);
    }
}

fn report_view(ui: &mut Ui, report: &LoadedLog, state: &AppState) {
    let stats = &report.stats;

    // ---- Header ----
    ui.label(RichText::new("ANALYSIS REPORT").small().weak());
    ui.label(RichText::new(&report.metadata.derived_name).heading().strong());
    ui.label(format!(
        "{}  ·  {}",
        report.metadata.derived_date, stats.duration_label
    ));
    ui.label(RichText::new(&report.file_name).small().weak());
    ui.separator();

    // ---- Tiles ----
    stat_tile(
        ui,
        "Average SPL",
        format!("{:.1} dB", stats.average_level),
        None,
        None,
    );
    stat_tile(
        ui,
        "Safety Level",
        stats.safety_tier.to_string(),
        Some(format!("Avg: {:.1} dB", stats.average_level)),
        Some(tier_color(stats.safety_tier)),
    );
    if let Some(peak) = stats.top3_distinct.first() {
        stat_tile(ui, "Peak SPL", level_text(peak), Some(format!("at {}", peak.timestamp_label)), None);
    }
    match &stats.peak_before_10 {
        Some(peak) => stat_tile(
            ui,
            "Before 10AM",
            level_text(peak),
            Some(format!("at {}", peak.timestamp_label)),
            None,
        ),
        None => stat_tile(ui, "Before 10AM", "None Recorded".to_string(), None, None),
    }
    ui.label(format!(
        "{} samples · min {:.1} dB · max {:.1} dB",
        stats.sample_count, stats.min_level, stats.max_level
    ));
    ui.separator();

    // ---- Top 3 ----
    ui.strong("Top 3 Loudest Moments");
    let colors = peak_colors(stats.top3_distinct.len());
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::exact(28.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Time");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Level");
            });
        })
        .body(|mut body| {
            for (rank, (peak, color)) in stats.top3_distinct.iter().zip(colors).enumerate() {
                body.row(20.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(format!("#{}", rank + 1)).color(color));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.monospace(&peak.timestamp_label);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(level_text(peak)).strong().color(color));
                    });
                });
            }
        });
    ui.separator();

    // ---- Insight ----
    if let Some(insight) = &state.insight {
        ui.strong("Summary");
        ui.label(&insight.summary);
        ui.label(RichText::new(&insight.compliance_note).italics().weak());
    }
}

fn stat_tile(ui: &mut Ui, title: &str, value: String, detail: Option<String>, accent: Option<Color32>) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        let mut heading = RichText::new(title.to_uppercase()).small();
        let mut value_text = RichText::new(value).size(24.0).strong();
        if let Some(c) = accent {
            heading = heading.color(c);
            value_text = value_text.color(c);
        }
        ui.label(heading);
        ui.label(value_text);
        if let Some(detail) = detail {
            ui.label(RichText::new(detail).small().monospace());
        }
    });
}

fn level_text(record: &SampleRecord) -> String {
    format!("{} dB", record.level)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let analyzing = matches!(state.phase, Phase::Analyzing);
            if ui.add_enabled(!analyzing, egui::Button::new("Open…")).clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_report = state.report().is_some();
            if ui
                .add_enabled(has_report, egui::Button::new("Export series CSV…"))
                .clicked()
            {
                export_csv_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_report, egui::Button::new("Export report JSON…"))
                .clicked()
            {
                export_json_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Reset").clicked() {
                state.reset();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(report) = state.report() {
            ui.label(format!(
                "{} samples, {} plotted",
                report.stats.sample_count,
                state.chart_points.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(msg);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open SPL log")
        .add_filter("SPL logs", LOG_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        if state.begin_analysis() {
            let result = load_file(&path, &state.config);
            state.finish(result);
        }
    }
}

fn export_csv_dialog(state: &mut AppState) {
    let Some(report) = state.report() else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export series")
        .set_file_name(format!("{}.csv", report.metadata.derived_name))
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let result = export_series_csv(&path, &report.series);
    state.status_message = Some(match result {
        Ok(()) => format!("Saved {}", path.display()),
        Err(e) => {
            log::error!("CSV export failed: {e:#}");
            format!("Export failed: {e:#}")
        }
    });
}

fn export_json_dialog(state: &mut AppState) {
    let Some(report) = state.report() else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export report")
        .set_file_name(format!("{}.json", report.metadata.derived_name))
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return;
    };

    let result = export_report_json(&path, report);
    state.status_message = Some(match result {
        Ok(()) => format!("Saved {}", path.display()),
        Err(e) => {
            log::error!("JSON export failed: {e:#}");
            format!("Export failed: {e:#}")
        }
    });
}
