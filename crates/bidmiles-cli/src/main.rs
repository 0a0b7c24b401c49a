mod batch;
mod single;
mod table;

use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::Context;
use bidmiles_core::{
    parse_coordinates, AppConfig, MileageAggregator, OfficeLocation, OfficeSource,
    PipelineOptions,
};
use bidmiles_mapbox::MapboxClient;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bidmiles")]
#[command(about = "Furthest driving distance from the office for bid lines")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Calculate mileage for one launcher/receiver pair
    Single {
        /// Launcher coordinates (e.g. "45.490665, -118.416460")
        #[arg(long, allow_hyphen_values = true)]
        launcher: String,
        /// Receiver coordinates (e.g. "Lat: 45.929377° N Lon: 119.409545° W")
        #[arg(long, allow_hyphen_values = true)]
        receiver: String,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Calculate mileage for every row of a CSV or spreadsheet
    Batch {
        /// CSV or .xlsx with `Launcher Coordinates` and `Receiver Coordinates` columns
        #[arg(long)]
        input: PathBuf,
        /// Where to write the augmented CSV
        #[arg(long, default_value = "bid_mileage.csv")]
        output: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Normalize a coordinate string without contacting Mapbox
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Show the office location distances are measured from
    Office,
}

/// Options shared by `single` and `batch`.
#[derive(Debug, Args)]
struct RunArgs {
    /// Multiply the furthest distance by this many trackers
    #[arg(long)]
    trackers: Option<NonZeroU32>,
    /// Look up the state containing each point
    #[arg(long)]
    regions: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("bidmiles: run `bidmiles --help` for usage");
        return Ok(());
    };

    match command {
        Commands::Parse { text } => run_parse(&text),
        Commands::Single {
            launcher,
            receiver,
            run,
        } => {
            let config = init()?;
            let aggregator = build_aggregator(&config, &run).await?;
            single::run_single(&aggregator, launcher, receiver).await
        }
        Commands::Batch { input, output, run } => {
            let config = init()?;
            // A bad upload fails here, before the office is geocoded.
            let input = batch::load_input(&input)?;
            let aggregator = build_aggregator(&config, &run).await?;
            batch::run_batch(&aggregator, input, &output).await
        }
        Commands::Office => {
            let config = init()?;
            run_office(&config).await
        }
    }
}

/// Loads configuration and installs the tracing subscriber. Logs go to
/// stderr so stdout carries only results.
fn init() -> anyhow::Result<AppConfig> {
    let config = bidmiles_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn run_parse(text: &str) -> anyhow::Result<()> {
    let point = parse_coordinates(text).with_context(|| format!("could not parse \"{text}\""))?;
    println!("{point}");
    Ok(())
}

async fn run_office(config: &AppConfig) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let office = resolve_office(config, &client).await?;
    match &config.office {
        OfficeSource::Point(_) => println!("Office: {} (configured point)", office.point()),
        OfficeSource::Address(address) => {
            println!("Office: {} (geocoded from \"{address}\")", office.point());
        }
    }
    Ok(())
}

fn build_client(config: &AppConfig) -> anyhow::Result<MapboxClient> {
    MapboxClient::new(
        &config.mapbox_token,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build Mapbox client")
}

/// Office resolution happens once, before any record is touched; failure
/// ends the run.
async fn resolve_office(config: &AppConfig, client: &MapboxClient) -> anyhow::Result<OfficeLocation> {
    let office = OfficeLocation::resolve(&config.office, client)
        .await
        .context("could not determine the office location")?;
    tracing::info!(office = %office.point(), "office location ready");
    Ok(office)
}

async fn build_aggregator(
    config: &AppConfig,
    run: &RunArgs,
) -> anyhow::Result<MileageAggregator<MapboxClient>> {
    let client = build_client(config)?;
    let office = resolve_office(config, &client).await?;
    let options = PipelineOptions {
        region_lookup: config.region_lookup || run.regions,
        tracker_count: run.trackers,
        max_concurrent_rows: config.max_concurrent_rows,
    };
    Ok(MileageAggregator::new(client, office, options))
}
