//! Data layer: core types, loading, validation, and series extraction.
//!
//! Architecture:
//! ```text
//!   ato_log.log (JSON Lines)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parser per line → Dataset + Vec<Defect>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  schema   │  timestamp key present? which target fields exist?
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ timestamp  │  µs ticks → TimeAxis (one Option<Timestamp> per row)
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  extract  │  (timestamp, value) pairs per field, optional TimeWindow
//!   └──────────┘
//! ```
//!
//! `summary` describes the Dataset for the debug view.

pub mod extract;
pub mod loader;
pub mod model;
pub mod parser;
pub mod schema;
pub mod summary;
pub mod timestamp;
