use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{FieldValue, TimeWindow, Timestamp};
use crate::data::summary::ColumnStats;
use crate::state::AppState;

/// Rows shown under "First few rows".
const HEAD_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Left side panel – time range, fields, defects
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(logo) = &state.config.logo_path {
        let uri = format!("file://{}", logo.display());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::new(uri)
                    .max_width(ui.available_width() * 0.8)
                    .max_height(120.0),
            );
        });
        ui.add_space(4.0);
    }

    ui.heading(&state.config.title);
    ui.separator();

    let Some(bounds) = state.data.as_ref().and_then(|d| d.time_bounds()) else {
        ui.label("No log loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            time_range(ui, state, bounds);
            ui.separator();
            field_toggles(ui, state);
            ui.separator();
            defects_list(ui, state);
        });
}

fn time_range(ui: &mut Ui, state: &mut AppState, bounds: TimeWindow) {
    ui.strong("Select Time Range");

    let current = state.window.unwrap_or(bounds);
    let mut start = current.start.as_micros();
    let mut end = current.end.as_micros();
    let range = bounds.start.as_micros()..=bounds.end.as_micros();

    let format = |v: f64, _: std::ops::RangeInclusive<usize>| {
        Timestamp::from_micros(v as i64)
            .map(|t| t.to_string())
            .unwrap_or_default()
    };

    let start_changed = ui
        .add(
            egui::Slider::new(&mut start, range.clone())
                .text("start")
                .custom_formatter(format),
        )
        .changed();
    let end_changed = ui
        .add(
            egui::Slider::new(&mut end, range)
                .text("end")
                .custom_formatter(format),
        )
        .changed();

    if start_changed || end_changed {
        // Keep start <= end by dragging the other handle along.
        if start_changed && start > end {
            end = start;
        } else if end_changed && end < start {
            start = end;
        }
        if let (Some(s), Some(e)) = (Timestamp::from_micros(start), Timestamp::from_micros(end)) {
            state.set_window(TimeWindow::new(s, e));
        }
    }

    if ui.small_button("Reset").clicked() {
        state.reset_window();
    }
}

fn field_toggles(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Fields");
    let fields: Vec<(String, usize)> = state
        .series
        .iter()
        .map(|s| (s.field.clone(), s.len()))
        .collect();

    for (field, n) in fields {
        let mut checked = state.is_visible(&field);
        let text = RichText::new(format!("{field}  ({n})")).color(state.colors.color_for(&field));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_field(&field);
        }
    }
}

fn defects_list(ui: &mut Ui, state: &AppState) {
    let Some(data) = &state.data else {
        return;
    };
    let header = format!("Skipped lines ({})", data.defects.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("defects")
        .default_open(!data.defects.is_empty())
        .show(ui, |ui: &mut Ui| {
            if data.defects.is_empty() {
                ui.label("None");
            }
            for defect in &data.defects {
                ui.label(RichText::new(defect.to_string()).color(Color32::YELLOW));
            }
        });
}

// ---------------------------------------------------------------------------
// Debug / info section (top of the central panel)
// ---------------------------------------------------------------------------

pub fn debug_panel(ui: &mut Ui, state: &AppState) {
    let Some(data) = &state.data else {
        return;
    };

    egui::CollapsingHeader::new("Debug / Info Panel")
        .id_salt("debug_panel")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Data Summary:");
            let summary = &data.summary;
            ui.label(format!(
                "{} rows, {} skipped lines, {} columns",
                summary.rows,
                summary.defects,
                summary.columns.len()
            ));

            ScrollArea::horizontal()
                .id_salt("summary_scroll")
                .show(ui, |ui: &mut Ui| {
                    egui::Grid::new("summary_grid")
                        .striped(true)
                        .show(ui, |ui: &mut Ui| {
                            for heading in [
                                "column", "count", "unique", "top", "freq", "mean", "std", "min",
                                "25%", "50%", "75%", "max",
                            ] {
                                ui.strong(heading);
                            }
                            ui.end_row();

                            for col in &summary.columns {
                                ui.label(&col.name);
                                ui.label(col.count.to_string());
                                stats_cells(ui, &col.stats);
                                ui.end_row();
                            }
                        });
                });

            ui.add_space(6.0);
            ui.strong("First Few Rows:");
            ScrollArea::horizontal()
                .id_salt("head_scroll")
                .show(ui, |ui: &mut Ui| {
                    let columns = data.dataset.column_names();
                    egui::Grid::new("head_grid")
                        .striped(true)
                        .show(ui, |ui: &mut Ui| {
                            ui.strong("line");
                            for col in columns {
                                ui.strong(col);
                            }
                            ui.end_row();

                            for rec in data.dataset.head(HEAD_ROWS) {
                                ui.label(rec.line_number.to_string());
                                for col in columns {
                                    let cell = rec.get(col).unwrap_or(&FieldValue::Null);
                                    ui.label(cell.to_string());
                                }
                                ui.end_row();
                            }
                        });
                });
        });
}

fn stats_cells(ui: &mut Ui, stats: &ColumnStats) {
    let num = |v: f64| format!("{v:.4}");
    match stats {
        ColumnStats::Numeric {
            mean,
            std,
            min,
            q25,
            median,
            q75,
            max,
        } => {
            for _ in 0..3 {
                ui.label("");
            }
            ui.label(num(*mean));
            ui.label(std.map(num).unwrap_or_default());
            for v in [min, q25, median, q75, max] {
                ui.label(num(*v));
            }
        }
        ColumnStats::Categorical { unique, top, freq } => {
            ui.label(unique.to_string());
            ui.label(top.as_ref().map(|v| v.to_string()).unwrap_or_default());
            ui.label(freq.to_string());
            for _ in 0..7 {
                ui.label("");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open log…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.config.log_path.display().to_string());

        if let Some(data) = &state.data {
            ui.separator();
            ui.label(format!(
                "{} records, {} skipped lines",
                data.dataset.len(),
                data.defects.len()
            ));
        }

        if let Some(msg) = &state.error_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open telemetry log")
        .add_filter("Log files", &["log", "jsonl", "ndjson", "json"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_log(path);
    }
}
