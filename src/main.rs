//! Reputation Monitor CLI
//!
//! Lists scraped products and testimonials and runs the monthly review
//! sentiment analysis over the persisted record store.

use anyhow::Result;
use clap::{Parser, Subcommand};
use reputation_monitor::{
    defaults, load_config, logging, report, AppConfig, PipelineError, RecordStore, SentimentPipeline,
    TimeWindow,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "reputation-monitor")]
#[command(about = "Brand reputation monitor over scraped reviews", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Record store path, overrides the config file
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Log level, overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List scraped products
    Products,

    /// Show customer testimonials
    Testimonials,

    /// Sentiment analysis of one month of reviews
    Reviews {
        /// Month name or number (Jan, 3, ...)
        #[arg(short, long, default_value = "Jan")]
        month: String,

        /// Year
        #[arg(short, long, default_value_t = defaults::DEFAULT_YEAR)]
        year: i32,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn build_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(store) = &cli.store {
        config.store.path = store.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    logging::setup_logging(&config.logging);

    let store = RecordStore::load(&config.store.path)?;

    match cli.command {
        Commands::Products => {
            info!("Listing {} products", store.products.len());
            print!("{}", report::render_products(&store.products));
        }

        Commands::Testimonials => {
            info!("Listing {} testimonials", store.testimonials.len());
            print!("{}", report::render_testimonials(&store.testimonials));
        }

        Commands::Reviews { month, year, json } => {
            let window = TimeWindow::parse(year, &month)?;
            let pipeline = SentimentPipeline::from_config(&config)?;

            match pipeline.run_async(&store, window).await {
                Ok(result) if json => println!("{}", serde_json::to_string_pretty(&result)?),
                Ok(result) => print!("{}", report::render_report(&result)),
                Err(PipelineError::EmptyWindow { window }) => {
                    println!("{}", report::render_empty(window));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
