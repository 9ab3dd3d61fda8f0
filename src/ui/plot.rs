use eframe::egui::{Color32, Ui};
use egui_plot::{HLine, Line, Plot, PlotPoints, Points};

use crate::color::{peak_colors, trace_color};
use crate::state::{AppState, Phase};

// ---------------------------------------------------------------------------
// SPL-over-time plot (central panel)
// ---------------------------------------------------------------------------

/// Render the SPL chart, or a placeholder for the other phases.
pub fn spl_plot(ui: &mut Ui, state: &AppState) {
    let report = match &state.phase {
        Phase::Complete(report) => report,
        Phase::Idle => {
            placeholder(ui, "Open an SPL log to analyse it  (File → Open…)");
            return;
        }
        Phase::Analyzing => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.spinner();
            });
            return;
        }
        Phase::Error(_) => {
            placeholder(ui, "Analysis failed – see the side panel");
            return;
        }
    };

    let stats = &report.stats;
    let config = &state.config;

    Plot::new("spl_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Time")
        .y_axis_label("SPL (dB)")
        .include_y((stats.min_level - 5.0).floor())
        .include_y((stats.max_level + 5.0).ceil())
        .x_axis_formatter(|mark, _range| clock_label(mark.value))
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{}\n{:.1} dB", clock_label(value.x), value.y)
            } else {
                format!("{name}\n{}\n{:.1} dB", clock_label(value.x), value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Display only: the trace is the downsampled series.
            let points: PlotPoints = state
                .chart_points
                .iter()
                .map(|r| [f64::from(r.seconds_since_midnight), r.level])
                .collect();
            plot_ui.line(
                Line::new(points)
                    .name("SPL")
                    .color(trace_color())
                    .fill((stats.min_level - 5.0).floor() as f32)
                    .width(1.5),
            );

            plot_ui.hline(
                HLine::new(config.moderate_threshold_db)
                    .name("Moderate threshold")
                    .color(Color32::from_rgba_unmultiplied(234, 179, 8, 120)),
            );
            plot_ui.hline(
                HLine::new(config.high_risk_threshold_db)
                    .name("High risk threshold")
                    .color(Color32::from_rgba_unmultiplied(239, 68, 68, 120)),
            );

            // Peaks come from the full series, not the chart points.
            let colors = peak_colors(stats.top3_distinct.len());
            for (rank, (peak, color)) in stats.top3_distinct.iter().zip(colors).enumerate() {
                let marker = Points::new(PlotPoints::new(vec![[
                    f64::from(peak.seconds_since_midnight),
                    peak.level,
                ]]))
                .radius(5.0)
                .color(color)
                .name(format!("#{} {}", rank + 1, peak));
                plot_ui.points(marker);
            }
        });
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(text);
    });
}

/// Format an axis value in seconds as `HH:MM:SS`, wrapping at midnight.
pub fn clock_label(seconds: f64) -> String {
    let secs = (seconds.round() as i64).rem_euclid(24 * 3600);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_label() {
        assert_eq!(clock_label(0.0), "00:00:00");
        assert_eq!(clock_label(35_999.0), "09:59:59");
        assert_eq!(clock_label(86_400.0 + 61.0), "00:01:01");
        assert_eq!(clock_label(-1.0), "23:59:59");
    }
}
