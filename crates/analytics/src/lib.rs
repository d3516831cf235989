//! # Listing Analytics
//!
//! The filter-and-aggregate pipeline behind the dashboard.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O and no rendering. Depends on `core-types`, `dataset`
//!   and `configuration` only.
//! - **Stateless calculation:** `AggregateEngine` turns a `FilteredView` into a
//!   `DashboardReport`; nothing is cached between calls, so every filter change
//!   recomputes all outputs from scratch.
//! - **Guarded halt:** an empty view never reaches the engine. `render` returns
//!   `RenderModel::Empty` with a user-facing warning instead.
//!
//! ## Public API
//!
//! - `FilterSelection` / `FilteredView`: per-field set membership filtering.
//! - `AggregateEngine`: KPIs, price trend, grouped and pivoted means, histogram.
//! - `DashboardReport` and its parts: the data handed to the presentation layer.
//! - `RenderModel` / `render`: one full pass from selection to report.

pub mod engine;
pub mod error;
pub mod format;
pub mod histogram;
pub mod render;
pub mod report;
pub mod selection;

pub use engine::AggregateEngine;
pub use error::AnalyticsError;
pub use histogram::{Histogram, HistogramBin};
pub use render::{render, RenderModel, EMPTY_SELECTION_WARNING};
pub use report::{
    DashboardReport, GroupMean, Kpis, ListingRow, PivotTable, ScatterPoint, TrendPoint,
};
pub use selection::{FilterSelection, FilteredView};
