use eframe::egui::{self, RichText, Ui};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

use crate::data::model::{FieldSeries, Timestamp};
use crate::state::AppState;

/// Rows shown in a series table before it scrolls.
const TABLE_HEIGHT: f32 = 180.0;

// ---------------------------------------------------------------------------
// Signal plots (central panel)
// ---------------------------------------------------------------------------

/// Render one chart per visible field.
pub fn signal_plots(ui: &mut Ui, state: &AppState) {
    if let Some(msg) = &state.error_message {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(RichText::new(msg).color(egui::Color32::RED));
        });
        return;
    }
    if state.data.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a log to view signals  (File → Open log…)");
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            super::panels::debug_panel(ui, state);

            for series in &state.series {
                if !state.is_visible(&series.field) {
                    continue;
                }
                ui.add_space(8.0);
                ui.heading(format!("Time Series for `{}`", series.field));

                if series.is_empty() {
                    ui.label(format!("No data available for `{}`", series.field));
                    continue;
                }
                if series.numeric_points().next().is_some() {
                    field_plot(ui, state, series);
                } else {
                    ui.label(format!("`{}` has no numeric values to plot", series.field));
                }
                series_table(ui, series);
            }
        });
}

fn field_plot(ui: &mut Ui, state: &AppState, series: &FieldSeries) {
    let color = state.colors.color_for(&series.field);

    let mut plot = Plot::new(format!("plot_{}", series.field))
        .height(220.0)
        .x_axis_label("Timestamp")
        .y_axis_label(series.field.clone())
        .x_axis_formatter(|mark, _range| format_axis_time(mark.value))
        .label_formatter(|name, point| {
            format!("{name}\n{}\n{:.4}", format_axis_time(point.x), point.y)
        })
        .allow_zoom([true, false])
        .allow_drag([true, false])
        .allow_scroll([true, false]);

    let display_range = state.config.display_range(&series.field);
    if display_range.is_some() {
        plot = plot.auto_bounds([true, false]);
    }

    let points: PlotPoints = series
        .numeric_points()
        .map(|(t, v)| [t.as_secs_f64(), v])
        .collect();
    let data_x = x_extent(series);

    plot.show(ui, |plot_ui| {
        if let (Some(range), Some(data_x)) = (display_range, data_x) {
            let current = plot_ui.plot_bounds();
            let (min, max) = y_locked_bounds([current.min()[0], current.max()[0]], data_x, range);
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
        }
        plot_ui.line(Line::new(points).name(&series.field).color(color).width(1.5));
    });
}

/// Earliest and latest plotted x (seconds) of the numeric points.
fn x_extent(series: &FieldSeries) -> Option<[f64; 2]> {
    series.numeric_points().fold(None, |acc, (t, _)| {
        let x = t.as_secs_f64();
        Some(match acc {
            None => [x, x],
            Some([lo, hi]) => [lo.min(x), hi.max(x)],
        })
    })
}

/// Plot bounds with y pinned to `range`.
///
/// The x span is kept from the current view so zooming still works, unless it
/// has not been fitted to the data yet (no overlap with `data_x`), in which
/// case the whole data span is shown.
fn y_locked_bounds(current_x: [f64; 2], data_x: [f64; 2], range: [f64; 2]) -> ([f64; 2], [f64; 2]) {
    let [mut x_min, mut x_max] = current_x;
    let fitted = x_min.is_finite() && x_max.is_finite() && x_min < x_max;
    if !fitted || x_max < data_x[0] || x_min > data_x[1] {
        x_min = data_x[0];
        x_max = data_x[1];
    }
    if x_min == x_max {
        x_min -= 1.0;
        x_max += 1.0;
    }
    ([x_min, range[0]], [x_max, range[1]])
}

fn series_table(ui: &mut Ui, series: &FieldSeries) {
    egui::CollapsingHeader::new(format!("Data ({} rows)", series.len()))
        .id_salt(format!("table_{}", series.field))
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::ScrollArea::vertical()
                .id_salt(format!("table_scroll_{}", series.field))
                .max_height(TABLE_HEIGHT)
                .show(ui, |ui: &mut Ui| {
                    egui::Grid::new(format!("grid_{}", series.field))
                        .striped(true)
                        .show(ui, |ui: &mut Ui| {
                            ui.strong("timestamp");
                            ui.strong(&series.field);
                            ui.end_row();
                            for (t, v) in &series.points {
                                ui.label(t.to_string());
                                ui.label(format!("{v}"));
                                ui.end_row();
                            }
                        });
                });
        });
}

/// Format a plot x coordinate (seconds since the epoch) as wall-clock time.
pub fn format_axis_time(secs: f64) -> String {
    Timestamp::from_micros((secs * 1_000_000.0).round() as i64)
        .and_then(Timestamp::to_datetime)
        .map(|dt| dt.format("%H:%M:%S%.3f").to_string())
        .unwrap_or_default()
}
