use crate::error::AnalyticsError;
use crate::format::{format_currency, group_thousands};
use serde::Serialize;

/// One equal-width bin of the price distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// `"RM 300,000 - 450,000"` style range label; edges are truncated to whole units.
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over the observed range of a set of values.
///
/// Bins are half-open `[lower, upper)` except the last, which also includes
/// its upper edge, so the maximum value is always counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// True when every value was equal and the range had to be widened.
    pub degenerate: bool,
}

impl Histogram {
    /// Bins `values` into `bin_count` equal-width bins spanning `min..=max`.
    ///
    /// When all values are equal the range is widened to `[v - 0.5, v + 0.5]`,
    /// which places every value in the bin starting at `v` (bin
    /// `bin_count / 2` for an even count).
    pub fn compute(
        values: &[f64],
        bin_count: usize,
        currency_symbol: &str,
    ) -> Result<Self, AnalyticsError> {
        if values.is_empty() {
            return Err(AnalyticsError::EmptySelection);
        }
        if bin_count == 0 {
            return Err(AnalyticsError::Calculation(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AnalyticsError::Calculation(
                "histogram input contains a non-finite value".to_string(),
            ));
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        let degenerate = min == max;
        let (first, last) = if degenerate {
            tracing::warn!(
                value = min,
                "All histogram values are equal; widening the range by 0.5 each side."
            );
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let edges = bin_edges(first, last, bin_count);
        let mut counts = vec![0usize; bin_count];
        for &value in values {
            counts[bin_index(value, first, last, &edges)] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let lower = edges[i];
                let upper = edges[i + 1];
                HistogramBin {
                    label: format!(
                        "{} - {}",
                        format_currency(currency_symbol, lower.trunc() as i64),
                        group_thousands(upper.trunc() as i64)
                    ),
                    lower,
                    upper,
                    count,
                }
            })
            .collect();

        Ok(Self { bins, degenerate })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// All `bins.len() + 1` edges, in ascending order.
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(|b| b.lower).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.upper);
        }
        edges
    }
}

fn bin_edges(first: f64, last: f64, bin_count: usize) -> Vec<f64> {
    let step = (last - first) / bin_count as f64;
    let mut edges: Vec<f64> = (0..=bin_count).map(|i| first + i as f64 * step).collect();
    edges[bin_count] = last;
    edges
}

/// Index of the bin holding `value`, correcting the arithmetic guess against
/// the materialised edges so that floating point error never moves a value
/// across an edge.
fn bin_index(value: f64, first: f64, last: f64, edges: &[f64]) -> usize {
    let bin_count = edges.len() - 1;
    let scaled = (value - first) * bin_count as f64 / (last - first);
    let mut index = (scaled.max(0.0) as usize).min(bin_count - 1);

    if index > 0 && value < edges[index] {
        index -= 1;
    }
    if index + 1 < bin_count && value >= edges[index + 1] {
        index += 1;
    }
    index
}
