//! Pipeline Tests
//!
//! End-to-end properties of generate -> filter -> aggregate over generated datasets.

use analytics::format::round_currency;
use analytics::{AggregateEngine, FilterSelection, RenderModel, EMPTY_SELECTION_WARNING};
use configuration::DatasetSettings;
use core_types::{Location, PropertyType};
use dataset::{Dataset, DatasetGenerator, LISTING_COUNT};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

fn generate(seed: u64) -> Dataset {
    DatasetGenerator::new(DatasetSettings {
        seed,
        ..DatasetSettings::default()
    })
    .generate()
    .expect("Failed to generate dataset")
}

/// Every subset of `items`, including the empty one.
fn subsets<T: Copy>(items: &[T]) -> Vec<Vec<T>> {
    (0..1u32 << items.len())
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, item)| *item)
                .collect()
        })
        .collect()
}

#[test]
fn test_price_per_sqft_is_derived() {
    for seed in 0..20 {
        for listing in &generate(seed) {
            let expected = f64::from(listing.price()) / f64::from(listing.size_sqft());
            assert!((listing.price_per_sqft() - expected).abs() < 1e-9);
        }
    }
}

#[test]
fn test_view_membership_matches_selection() {
    let all_locations = Location::GENERATION_ORDER;
    let all_types = PropertyType::GENERATION_ORDER;

    for seed in [0, 7, 42] {
        let dataset = generate(seed);

        for locations in subsets(&all_locations) {
            for property_types in subsets(&all_types) {
                let selection = FilterSelection::new(locations.clone(), property_types.clone());
                let view = selection.apply(&dataset);

                let expected: Vec<_> = dataset
                    .iter()
                    .filter(|l| {
                        locations.contains(&l.location())
                            && property_types.contains(&l.property_type())
                    })
                    .collect();

                assert_eq!(view.rows(), expected.as_slice());
                assert!(view.iter().all(|row| dataset.listings().contains(row)));
            }
        }
    }
}

#[test]
fn test_full_selection_keeps_dataset() {
    let dataset = generate(42);
    let view = FilterSelection::all(&dataset).apply(&dataset);

    assert_eq!(view.len(), LISTING_COUNT);
    assert!(view.iter().zip(dataset.iter()).all(|(a, b)| a == b));
}

#[test]
fn test_empty_selection_raises_warning() {
    let dataset = generate(42);
    let selection = FilterSelection::all(&dataset).with_locations(Vec::<Location>::new());

    let model = AggregateEngine::default()
        .render(&dataset, &selection)
        .expect("Render should not fail on an empty selection");

    assert!(model.is_empty());
    assert_eq!(model.warning(), Some(EMPTY_SELECTION_WARNING));
    assert!(model.report().is_none());

    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["status"], "empty");
    assert_eq!(json["warning"], EMPTY_SELECTION_WARNING);
}

#[test]
fn test_grouped_means_sorted_and_complete() {
    for seed in 0..20 {
        let dataset = generate(seed);
        let model = analytics::render(&dataset, &FilterSelection::all(&dataset)).unwrap();
        let report = model.report().expect("Full selection should render");

        let groups = &report.price_by_type;
        assert!(groups.windows(2).all(|w| w[0].mean_price >= w[1].mean_price));
        assert_eq!(groups.iter().map(|g| g.count).sum::<usize>(), report.row_count);
    }
}

#[test]
fn test_histogram_counts_and_edges() {
    for seed in 0..20 {
        let dataset = generate(seed);
        let model = analytics::render(&dataset, &FilterSelection::all(&dataset)).unwrap();
        let histogram = &model.report().unwrap().price_distribution;

        assert_eq!(histogram.bins.len(), 8);
        assert_eq!(histogram.total(), LISTING_COUNT);
        assert!(histogram.edges().windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_pivot_missing_cells_match_absent_pairs() {
    for seed in 0..20 {
        let dataset = generate(seed);
        let selection = FilterSelection::all(&dataset).with_locations([
            Location::Penang,
            Location::Selangor,
        ]);
        let view = selection.apply(&dataset);
        if view.is_empty() {
            continue;
        }
        let heatmap = AggregateEngine::default().calculate(&view).unwrap().heatmap;

        let pairs: BTreeSet<(Location, PropertyType)> = view
            .iter()
            .map(|l| (l.location(), l.property_type()))
            .collect();

        for location in &heatmap.rows {
            for property_type in &heatmap.columns {
                let cell = heatmap.get(*location, *property_type);
                assert_eq!(
                    cell.is_none(),
                    !pairs.contains(&(*location, *property_type)),
                    "seed {seed}: cell ({location}, {property_type})"
                );
            }
        }
    }
}

#[test]
fn test_seed_42_average_price_kpi() {
    let dataset = generate(42);
    assert_eq!(dataset.len(), 20);

    let model = analytics::render(&dataset, &FilterSelection::all(&dataset)).unwrap();
    let kpis = &model.report().unwrap().kpis;

    let total: Decimal = dataset.iter().map(|l| Decimal::from(l.price())).sum();
    let expected = round_currency(total / Decimal::from(20));
    assert_eq!(Decimal::from(kpis.average_price_display()), expected);
}

#[test]
fn test_penang_only_selection() {
    for seed in 0..20 {
        let dataset = generate(seed);
        let selection = FilterSelection::all(&dataset).with_locations([Location::Penang]);
        let model = AggregateEngine::default().render(&dataset, &selection).unwrap();

        let penang_rows = dataset
            .iter()
            .filter(|l| l.location() == Location::Penang)
            .count();

        match model {
            RenderModel::Dashboard(report) => {
                assert_eq!(report.row_count, penang_rows);
                assert!(report.listings.iter().all(|r| r.location == Location::Penang));
                assert_eq!(report.heatmap.rows, vec![Location::Penang]);
            }
            RenderModel::Empty { warning } => {
                assert_eq!(penang_rows, 0);
                assert_eq!(warning, EMPTY_SELECTION_WARNING);
            }
        }
    }
}

#[test]
fn test_distinct_prices_give_equal_width_bins() {
    let mut checked = 0;

    for seed in 0..20 {
        let dataset = generate(seed);
        let prices: BTreeSet<u32> = dataset.iter().map(|l| l.price()).collect();
        if prices.len() != LISTING_COUNT {
            continue;
        }
        checked += 1;

        let min = f64::from(*prices.first().unwrap());
        let max = f64::from(*prices.last().unwrap());
        let width = (max - min) / 8.0;

        let model = analytics::render(&dataset, &FilterSelection::all(&dataset)).unwrap();
        let histogram = &model.report().unwrap().price_distribution;

        assert_eq!(histogram.bins.len(), 8);
        assert_eq!(histogram.total(), 20);
        assert!(!histogram.degenerate);
        assert_eq!(histogram.bins[0].lower, min);
        assert_eq!(histogram.bins[7].upper, max);
        for bin in &histogram.bins {
            assert!((bin.upper - bin.lower - width).abs() < 1e-6);
        }
    }

    assert!(checked > 0, "Expected at least one seed with distinct prices");
}

#[test]
fn test_listing_details_sorted_by_date() {
    let mut checked = 0;

    for seed in 0..20 {
        let dataset = generate(seed);
        let condo_rows = dataset
            .iter()
            .filter(|l| l.property_type() == PropertyType::Condo)
            .count();
        if condo_rows == 0 {
            continue;
        }
        checked += 1;

        let selection = FilterSelection::all(&dataset).with_property_types([PropertyType::Condo]);
        let model = AggregateEngine::default().render(&dataset, &selection).unwrap();
        let report = model.report().expect("Condo rows exist, so the dashboard should render");

        assert_eq!(report.row_count, condo_rows);
        assert!(report.listings.windows(2).all(|w| w[0].listing_date <= w[1].listing_date));
        assert!(report.listings.iter().all(|r| r.property_type == PropertyType::Condo));
        assert_eq!(report.scatter.len(), report.row_count);
        assert_eq!(report.price_trend.len(), report.row_count);
    }

    assert!(checked > 0, "Expected at least one seed with condo listings");
}

#[test]
fn test_render_model_serializes_report() {
    let dataset = generate(42);
    let model = analytics::render(&dataset, &FilterSelection::all(&dataset)).unwrap();
    let json = serde_json::to_value(&model).unwrap();

    assert_eq!(json["status"], "dashboard");
    assert_eq!(json["row_count"], 20);
    assert_eq!(json["listings"].as_array().unwrap().len(), 20);
    assert_eq!(json["price_distribution"]["bins"].as_array().unwrap().len(), 8);
}
