//! Teleops Dash - time-series dashboard for teleoperated-vehicle telemetry
//!
//! Reads a JSON Lines log, keeps going past malformed lines, and turns the
//! configured signal fields into windowed time series.
//!
//! ## Module Structure
//!
//! - [`data`] - Record parsing, loading, validation, time axis, extraction
//! - [`pipeline`] - One run of the data layer for a [`config::DashboardConfig`]
//! - [`config`] - Per-deployment settings
//! - [`error`] - Error types for each pipeline stage
//! - [`app`], [`state`], [`ui`], [`color`] - egui front end

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod ui;
