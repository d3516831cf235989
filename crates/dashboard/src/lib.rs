//! # Terminal Dashboard
//!
//! The presentation layer. Turns a `RenderModel` into the dashboard page
//! (KPIs, line/bar/scatter charts, heatmap table, histogram and the listing
//! details) drawn with `comfy-table`, or into a JSON document.

pub mod charts;
pub mod error;
pub mod renderer;

pub use error::DashboardError;
pub use renderer::{export_json, DashboardRenderer};
