use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::color::FieldColors;
use crate::config::DashboardConfig;
use crate::data::model::{FieldSeries, TimeWindow};
use crate::pipeline::{self, DashboardData};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Output of the last successful pipeline run.
    pub data: Option<DashboardData>,

    /// Selected time range; `None` until data is loaded.
    pub window: Option<TimeWindow>,

    /// Windowed series for each available field (recomputed on change).
    pub series: Vec<FieldSeries>,

    /// Fields the user switched off in the side panel.
    pub hidden_fields: BTreeSet<String>,

    pub colors: FieldColors,

    /// Fatal pipeline error shown instead of any chart.
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            data: None,
            window: None,
            series: Vec::new(),
            hidden_fields: BTreeSet::new(),
            colors: FieldColors::default(),
            error_message: None,
        }
    }

    /// Run the whole pipeline again from disk, dropping the previous result.
    pub fn reload(&mut self) {
        self.data = None;
        self.series.clear();
        self.window = None;

        match pipeline::run(&self.config) {
            Ok(data) => {
                self.colors = FieldColors::new(&data.available_fields);
                self.window = data.time_bounds();
                self.data = Some(data);
                self.error_message = None;
                self.rewindow();
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.config.log_path.display());
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Point at a different log file and load it.
    pub fn open_log(&mut self, path: PathBuf) {
        self.config.log_path = path;
        self.reload();
    }

    /// Apply a new time range, kept inside the log's own span.
    pub fn set_window(&mut self, window: TimeWindow) {
        let bounds = self.data.as_ref().and_then(DashboardData::time_bounds);
        self.window = Some(match bounds {
            Some(b) => window.clamp_to(&b),
            None => window,
        });
        self.rewindow();
    }

    /// Select the full time span again.
    pub fn reset_window(&mut self) {
        self.window = self.data.as_ref().and_then(DashboardData::time_bounds);
        self.rewindow();
    }

    /// Recompute `series` after a window change.
    fn rewindow(&mut self) {
        self.series = match &self.data {
            Some(data) => data.all_series(self.window.as_ref()),
            None => Vec::new(),
        };
    }

    pub fn toggle_field(&mut self, field: &str) {
        if !self.hidden_fields.remove(field) {
            self.hidden_fields.insert(field.to_string());
        }
    }

    pub fn is_visible(&self, field: &str) -> bool {
        !self.hidden_fields.contains(field)
    }
}
