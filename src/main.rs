use analytics::{AggregateEngine, FilterSelection};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use configuration::ConfigOverrides;
use core_types::{Location, PropertyType};
use dashboard::{export_json, DashboardRenderer};
use dataset::{Dataset, DatasetGenerator};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// The main entry point for the real estate analytics dashboard.
fn main() -> anyhow::Result<()> {
    // Load environment variables (RUST_LOG, ESTATE__*) from a .env file if present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = cli
        .overrides
        .load()
        .context("Failed to load configuration")?;
    let _log_guard = configuration::init_tracing(&config.logging)
        .context("Failed to initialise logging")?;

    // The base dataset is generated once and shared read-only by the command.
    let dataset = DatasetGenerator::new(config.dataset.clone())
        .generate()
        .context("Failed to generate the listing dataset")?;
    tracing::info!(
        seed = config.dataset.seed,
        start = %config.dataset.start_date,
        rows = dataset.len(),
        "Generated listing dataset."
    );

    let engine = AggregateEngine::new(&config.dashboard);
    let renderer = DashboardRenderer::new(config.dashboard.clone());

    // Execute the appropriate command
    match cli.command {
        Commands::Show(args) => handle_show(args, &dataset, &engine, renderer),
        Commands::Export(args) => handle_export(args, &dataset, &engine),
        Commands::Options => {
            let selection = FilterSelection::all(&dataset);
            print!(
                "{}",
                renderer.render_filters(&dataset.locations(), &dataset.property_types(), &selection)
            );
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Simulated property listings, filtered and summarised in the terminal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard for a filter selection.
    Show(ShowArgs),
    /// Write the dashboard data for a filter selection as JSON.
    Export(ExportArgs),
    /// List the filter options present in the generated dataset.
    Options,
}

/// The sidebar filters. A field left unset keeps every option selected.
#[derive(Args)]
struct FilterArgs {
    /// Location to include: "Kuala Lumpur" (or kl), Penang, Selangor. Repeat for several.
    #[arg(long = "location")]
    locations: Vec<Location>,

    /// Property type to include: Apartment, Condo, Landed. Repeat for several.
    #[arg(long = "property-type")]
    property_types: Vec<PropertyType>,
}

#[derive(Args)]
struct ShowArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Disable colours and terminal-width wrapping.
    #[arg(long)]
    plain: bool,

    /// Do not print the filter panel above the dashboard.
    #[arg(long)]
    hide_filters: bool,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Output file. Defaults to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

impl FilterArgs {
    fn selection(&self, dataset: &Dataset) -> FilterSelection {
        build_selection(dataset, &self.locations, &self.property_types)
    }
}

/// Builds the selection for one render pass, starting from "everything selected".
///
/// A value the dataset never drew is kept and only logged; the render pass then
/// reports the empty selection with its usual warning.
fn build_selection(
    dataset: &Dataset,
    locations: &[Location],
    property_types: &[PropertyType],
) -> FilterSelection {
    let mut selection = FilterSelection::all(dataset);
    if !locations.is_empty() {
        selection = selection.with_locations(locations.iter().copied());
    }
    if !property_types.is_empty() {
        selection = selection.with_property_types(property_types.iter().copied());
    }
    if let Err(e) = selection.validate(dataset) {
        tracing::warn!(error = %e, "Filter selects a value with no listings in this dataset.");
    }
    selection
}

/// Handles the `show` command: one render pass printed to stdout.
fn handle_show(
    args: ShowArgs,
    dataset: &Dataset,
    engine: &AggregateEngine,
    renderer: DashboardRenderer,
) -> anyhow::Result<()> {
    let selection = args.filters.selection(dataset);
    let model = engine.render(dataset, &selection)?;

    let renderer = if args.plain { renderer.plain() } else { renderer };
    if !args.hide_filters {
        println!(
            "{}",
            renderer.render_filters(&dataset.locations(), &dataset.property_types(), &selection)
        );
    }

    let stdout = io::stdout();
    renderer
        .write(&model, &mut stdout.lock())
        .context("Failed to print the dashboard")?;
    Ok(())
}

/// Handles the `export` command: the render model as JSON.
fn handle_export(
    args: ExportArgs,
    dataset: &Dataset,
    engine: &AggregateEngine,
) -> anyhow::Result<()> {
    let selection = args.filters.selection(dataset);
    let model = engine.render(dataset, &selection)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file at {:?}", path))?;
            export_json(&model, &mut BufWriter::new(file))?;
            tracing::info!(
                path = %path.display(),
                empty = model.is_empty(),
                "Exported render model."
            );
        }
        None => {
            let stdout = io::stdout();
            export_json(&model, &mut stdout.lock())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::EMPTY_SELECTION_WARNING;
    use configuration::DatasetSettings;

    fn generate(seed: u64) -> Dataset {
        DatasetGenerator::new(DatasetSettings {
            seed,
            ..DatasetSettings::default()
        })
        .generate()
        .expect("Failed to generate dataset")
    }

    fn filters(cli: Cli) -> FilterArgs {
        match cli.command {
            Commands::Show(args) => args.filters,
            Commands::Export(args) => args.filters,
            Commands::Options => panic!("Expected a command with filters"),
        }
    }

    #[test]
    fn location_absent_from_dataset_renders_empty_warning() {
        let (seed, dataset) = (0..5_000)
            .map(|seed| (seed, generate(seed)))
            .find(|(_, dataset)| !dataset.locations().contains(&Location::Penang))
            .expect("Expected a seed that draws no Penang listings");

        let selection = build_selection(&dataset, &[Location::Penang], &[]);
        assert!(selection.validate(&dataset).is_err());

        let model = AggregateEngine::default()
            .render(&dataset, &selection)
            .expect("Render should not fail on an empty selection");
        assert!(model.is_empty(), "seed {seed}");
        assert_eq!(model.warning(), Some(EMPTY_SELECTION_WARNING));
    }

    #[test]
    fn unset_filters_select_everything() {
        let dataset = generate(42);
        let selection = build_selection(&dataset, &[], &[]);
        assert_eq!(selection, FilterSelection::all(&dataset));
    }

    #[test]
    fn filter_flags_accept_display_names_and_aliases() {
        let cli = Cli::try_parse_from([
            "estate-dashboard",
            "show",
            "--location",
            "kl",
            "--location",
            "Penang",
            "--property-type",
            "condo",
        ])
        .expect("Filter values should parse");
        let args = filters(cli);
        assert_eq!(args.locations, vec![Location::KualaLumpur, Location::Penang]);
        assert_eq!(args.property_types, vec![PropertyType::Condo]);

        let cli = Cli::try_parse_from(["estate-dashboard", "export", "--location", "Kuala Lumpur"])
            .expect("Filter values should parse");
        assert_eq!(filters(cli).locations, vec![Location::KualaLumpur]);
    }

    #[test]
    fn unknown_filter_value_is_rejected() {
        let result = Cli::try_parse_from(["estate-dashboard", "show", "--location", "Johor"]);
        assert!(result.is_err());
    }
}
