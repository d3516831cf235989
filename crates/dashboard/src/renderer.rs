use crate::charts::{bar, heat_colors, marker, scatter_plot};
use crate::error::DashboardError;
use analytics::format::{decimal_to_whole, format_currency, group_thousands};
use analytics::{DashboardReport, FilterSelection, RenderModel};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use configuration::DashboardSettings;
use core_types::{Location, PropertyType};
use rust_decimal::prelude::ToPrimitive;
use std::fmt::Write as _;
use std::io::Write;

const SCATTER_HEIGHT: usize = 12;

/// Draws a `RenderModel` as a single text page.
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    settings: DashboardSettings,
    styled: bool,
}

impl DashboardRenderer {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            settings,
            styled: true,
        }
    }

    /// Disables colours and terminal-width wrapping.
    pub fn plain(mut self) -> Self {
        self.styled = false;
        self
    }

    /// The "Filter Data" panel: every option of each field, selected ones ticked.
    pub fn render_filters(
        &self,
        locations: &[Location],
        property_types: &[PropertyType],
        selection: &FilterSelection,
    ) -> String {
        let mut table = self.table();
        table.set_header(vec![Cell::new("Select Location"), Cell::new("Select Property Type")]);

        let tick = |selected: bool| if selected { "[x]" } else { "[ ]" };
        for i in 0..locations.len().max(property_types.len()) {
            let location = locations
                .get(i)
                .map(|l| format!("{} {}", tick(selection.locations().contains(l)), l))
                .unwrap_or_default();
            let property_type = property_types
                .get(i)
                .map(|t| format!("{} {}", tick(selection.property_types().contains(t)), t))
                .unwrap_or_default();
            table.add_row(vec![Cell::new(location), Cell::new(property_type)]);
        }

        format!("Filter Data\n{table}\n")
    }

    /// Renders the whole page. An empty model renders the warning only.
    pub fn render(&self, model: &RenderModel) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.settings.title);
        let _ = writeln!(out, "{}\n", "=".repeat(self.settings.title.chars().count()));

        match model {
            RenderModel::Empty { warning } => {
                let _ = writeln!(out, "⚠ {warning}");
            }
            RenderModel::Dashboard(report) => {
                self.render_report(report, &mut out);
                let _ = writeln!(out, "{}", "-".repeat(self.settings.bar_width));
                let _ = writeln!(out, "{}", self.settings.caption);
            }
        }
        out
    }

    /// Renders the page into `writer`.
    pub fn write<W: Write>(
        &self,
        model: &RenderModel,
        writer: &mut W,
    ) -> Result<(), DashboardError> {
        let page = self.render(model);
        writer.write_all(page.as_bytes())?;
        writer.flush()?;
        tracing::debug!(bytes = page.len(), styled = self.styled, "Wrote dashboard page.");
        Ok(())
    }

    fn render_report(&self, report: &DashboardReport, out: &mut String) {
        let sections = [
            ("Key Market Metrics", self.kpi_section(report)),
            ("Price Trend Over Time", self.trend_section(report)),
            ("Average Price by Property Type", self.price_by_type_section(report)),
            ("Size vs Price (by Property Type)", self.scatter_section(report)),
            ("Listing details", self.details_section(report)),
            ("Heatmap: Avg Price by Location & Property Type", self.heatmap_section(report)),
            ("Price Distribution", self.histogram_section(report)),
        ];

        for (heading, body) in sections {
            let _ = writeln!(out, "{heading}");
            let _ = writeln!(out, "{body}\n");
        }
    }

    fn kpi_section(&self, report: &DashboardReport) -> String {
        let kpis = &report.kpis;
        let symbol = &self.settings.currency_symbol;

        let mut table = self.table();
        table.set_header(vec![
            "Average Price",
            "Average Size (sqft)",
            "Average Bedrooms",
            "Avg Price per sqft",
        ]);
        table.add_row(vec![
            format_currency(symbol, kpis.average_price_display()),
            kpis.average_size_display().to_string(),
            format!("{:.1}", kpis.average_bedrooms_display()),
            format_currency(symbol, kpis.average_price_per_sqft_display()),
        ]);
        table.to_string()
    }

    fn trend_section(&self, report: &DashboardReport) -> String {
        let max = report.price_trend.iter().map(|p| p.price).max().unwrap_or(0);

        let mut table = self.table();
        table.set_header(vec!["Listing Date".to_string(), self.price_header(), String::new()]);
        for point in &report.price_trend {
            table.add_row(vec![
                Cell::new(point.date),
                Cell::new(group_thousands(i64::from(point.price)))
                    .set_alignment(CellAlignment::Right),
                Cell::new(bar(f64::from(point.price), f64::from(max), self.settings.bar_width)),
            ]);
        }
        table.to_string()
    }

    fn price_by_type_section(&self, report: &DashboardReport) -> String {
        let means: Vec<f64> = report
            .price_by_type
            .iter()
            .map(|g| g.mean_price.to_f64().unwrap_or_default())
            .collect();
        let max = means.iter().copied().fold(0.0, f64::max);

        let mut table = self.table();
        table.set_header(vec!["Property Type".to_string(), self.price_header(), String::new()]);
        for (group, mean) in report.price_by_type.iter().zip(means) {
            table.add_row(vec![
                Cell::new(group.property_type),
                Cell::new(group_thousands(decimal_to_whole(group.mean_price)))
                    .set_alignment(CellAlignment::Right),
                Cell::new(bar(mean, max, self.settings.bar_width)),
            ]);
        }
        table.to_string()
    }

    fn scatter_section(&self, report: &DashboardReport) -> String {
        let mut out = String::new();
        let (min_price, max_price) = report
            .scatter
            .iter()
            .fold((u32::MAX, 0), |(lo, hi), p| (lo.min(p.price), hi.max(p.price)));
        let (min_size, max_size) = report
            .scatter
            .iter()
            .fold((u32::MAX, 0), |(lo, hi), p| (lo.min(p.size_sqft), hi.max(p.size_sqft)));

        let _ = writeln!(
            out,
            "{} (y: {} - {})",
            self.price_header(),
            group_thousands(i64::from(min_price)),
            group_thousands(i64::from(max_price))
        );
        for line in scatter_plot(&report.scatter, self.settings.bar_width, SCATTER_HEIGHT) {
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(
            out,
            "Size (sqft) (x: {} - {})",
            group_thousands(i64::from(min_size)),
            group_thousands(i64::from(max_size))
        );

        let legend: Vec<String> = report
            .price_by_type
            .iter()
            .map(|g| g.property_type)
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .map(|t| format!("{} = {}", marker(t), t))
            .collect();
        let _ = write!(out, "{}, * = several types", legend.join(", "));
        out
    }

    fn details_section(&self, report: &DashboardReport) -> String {
        let mut table = self.table();
        table.set_header(vec![
            "Listing Date".to_string(),
            "Property Type".to_string(),
            "Location".to_string(),
            self.price_header(),
            "Size (sqft)".to_string(),
            "Bedrooms".to_string(),
            "Price per sqft".to_string(),
        ]);
        for row in &report.listings {
            table.add_row(vec![
                Cell::new(row.listing_date),
                Cell::new(row.property_type),
                Cell::new(row.location),
                Cell::new(group_thousands(i64::from(row.price)))
                    .set_alignment(CellAlignment::Right),
                Cell::new(row.size_sqft).set_alignment(CellAlignment::Right),
                Cell::new(row.bedrooms).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", row.price_per_sqft)).set_alignment(CellAlignment::Right),
            ]);
        }
        table.to_string()
    }

    fn heatmap_section(&self, report: &DashboardReport) -> String {
        let heatmap = &report.heatmap;
        let symbol = &self.settings.currency_symbol;
        let range = heatmap
            .value_range()
            .map(|(min, max)| (min.to_f64().unwrap_or_default(), max.to_f64().unwrap_or_default()));

        let mut table = self.table();
        let mut header = vec![Cell::new("Location")];
        header.extend(heatmap.columns.iter().map(Cell::new));
        table.set_header(header);

        for (location, cells) in heatmap.rows.iter().zip(&heatmap.cells) {
            let mut row = vec![Cell::new(location)];
            for cell in cells {
                row.push(match (cell, range) {
                    (Some(mean), Some((min, max))) => {
                        let value = mean.to_f64().unwrap_or_default();
                        let t = if max > min { (value - min) / (max - min) } else { 0.0 };
                        let (bg, fg) = heat_colors(t);
                        let cell = Cell::new(format_currency(symbol, decimal_to_whole(*mean)))
                            .set_alignment(CellAlignment::Right);
                        if self.styled { cell.bg(bg).fg(fg) } else { cell }
                    }
                    _ => Cell::new(""),
                });
            }
            table.add_row(row);
        }
        table.to_string()
    }

    fn histogram_section(&self, report: &DashboardReport) -> String {
        let histogram = &report.price_distribution;
        let max = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);

        let mut table = self.table();
        table.set_header(vec!["Price Bin", "Count", ""]);
        for bin in &histogram.bins {
            table.add_row(vec![
                Cell::new(&bin.label),
                Cell::new(bin.count).set_alignment(CellAlignment::Right),
                Cell::new(bar(bin.count as f64, max as f64, self.settings.bar_width)),
            ]);
        }

        let mut out = table.to_string();
        if histogram.degenerate {
            let _ = write!(
                out,
                "\nAll listings share one price; bins are spread 0.5 either side of it."
            );
        }
        out
    }

    fn price_header(&self) -> String {
        format!("Price ({})", self.settings.currency_symbol)
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        if self.styled {
            table.set_content_arrangement(ContentArrangement::Dynamic);
        } else {
            table.force_no_tty();
        }
        table
    }
}

/// Writes the render model as pretty-printed JSON.
pub fn export_json<W: Write>(model: &RenderModel, writer: &mut W) -> Result<(), DashboardError> {
    serde_json::to_writer_pretty(&mut *writer, model)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
