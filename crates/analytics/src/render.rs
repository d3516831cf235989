use crate::engine::AggregateEngine;
use crate::error::AnalyticsError;
use crate::report::DashboardReport;
use crate::selection::FilterSelection;
use dataset::Dataset;
use serde::Serialize;

/// Shown in place of the dashboard when no listing passes the filters.
pub const EMPTY_SELECTION_WARNING: &str =
    "No data matches the selected filters. Please adjust the filters.";

/// The result of one render pass, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderModel {
    /// The filtered view was empty; nothing else should be drawn.
    Empty { warning: String },
    Dashboard(Box<DashboardReport>),
}

impl RenderModel {
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderModel::Empty { .. })
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            RenderModel::Empty { warning } => Some(warning.as_str()),
            RenderModel::Dashboard(_) => None,
        }
    }

    pub fn report(&self) -> Option<&DashboardReport> {
        match self {
            RenderModel::Dashboard(report) => Some(report.as_ref()),
            RenderModel::Empty { .. } => None,
        }
    }
}

impl AggregateEngine {
    /// Runs one full filter-and-aggregate pass over the immutable dataset.
    ///
    /// An empty filtered view halts the pass before any aggregate is computed
    /// and yields `RenderModel::Empty`.
    pub fn render(
        &self,
        dataset: &Dataset,
        selection: &FilterSelection,
    ) -> Result<RenderModel, AnalyticsError> {
        let view = selection.apply(dataset);

        if view.is_empty() {
            tracing::warn!(
                locations = ?selection.locations(),
                property_types = ?selection.property_types(),
                "{}",
                EMPTY_SELECTION_WARNING
            );
            return Ok(RenderModel::Empty {
                warning: EMPTY_SELECTION_WARNING.to_string(),
            });
        }

        let report = self.calculate(&view)?;
        tracing::info!(rows = report.row_count, total = dataset.len(), "Rendered dashboard.");

        Ok(RenderModel::Dashboard(Box::new(report)))
    }
}

/// `render(dataset, selection)` with the default engine settings.
pub fn render(
    dataset: &Dataset,
    selection: &FilterSelection,
) -> Result<RenderModel, AnalyticsError> {
    AggregateEngine::default().render(dataset, selection)
}
