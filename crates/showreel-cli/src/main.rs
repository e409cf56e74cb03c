use clap::{ArgAction, Parser, Subcommand};
use commands::{demo, recommend, report};
use showreel_catalog::CatalogService;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "showreel")]
#[command(about = "Showreel - a streaming catalog with plans, playback tracking, and analytics")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Catalog seed file (defaults to $SHOWREEL_CATALOG or the platform
    /// config dir)
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in walkthrough scenario against an in-memory catalog
    #[command(long_about = "Build a small in-memory catalog and walk through subscriptions, resume playback, explicit-episode playback, rating updates, and the analytics reports, printing each step.")]
    Demo,

    /// Show the most-played content
    Top {
        /// Maximum number of items to show
        #[arg(long, default_value_t = 5)]
        count: usize,
    },

    /// Show monthly revenue per plan
    Revenue,

    /// Recommend unwatched content for a user
    #[command(long_about = "Recommend top-rated content the user has not watched yet. Plain form returns up to 5 items; --genre filters to one genre (up to 5); --min-year with --min-rating filters by release year and rating floor (up to 10).")]
    Recommend {
        /// User id to recommend for
        #[arg(long)]
        user: u32,

        /// Restrict to one genre (case-insensitive)
        #[arg(long, conflicts_with_all = ["min_year", "min_rating"])]
        genre: Option<String>,

        /// Only content released in this year or later
        #[arg(long, requires = "min_rating")]
        min_year: Option<u32>,

        /// Only content rated at least this highly
        #[arg(long, requires = "min_year")]
        min_rating: Option<f64>,
    },
}

fn load_service(catalog: Option<PathBuf>) -> color_eyre::Result<CatalogService> {
    let path = match catalog {
        Some(path) => path,
        None => showreel_config::default_catalog_file()
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?,
    };
    let seed = showreel_config::SeedCatalog::load_from_file(&path).map_err(|e| {
        color_eyre::eyre::eyre!("Could not load catalog from {}: {}", path.display(), e)
    })?;
    tracing::debug!(path = %path.display(), "catalog seed loaded");
    seed.build_service()
        .map_err(|e| color_eyre::eyre::eyre!("Could not build catalog from seed: {}", e))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Demo => demo::run_demo(&output),
        Commands::Top { count } => {
            let service = load_service(cli.catalog)?;
            report::run_top(&service, count, &output)
        }
        Commands::Revenue => {
            let service = load_service(cli.catalog)?;
            report::run_revenue(&service, &output)
        }
        Commands::Recommend {
            user,
            genre,
            min_year,
            min_rating,
        } => {
            let service = load_service(cli.catalog)?;
            recommend::run_recommend(&service, user, genre, min_year, min_rating, &output)
        }
    }
}
