//! unibar CLI
//!
//! Scrape a product page, derive its search key, and check it against a
//! Scrapbox project.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use unibar::{
    error::Result,
    models::{CheckOutcome, Config},
    pipeline::{self, CheckReport},
    storage::{FileFormatStore, FormatStore, MemoryFormatStore},
    title::title_for_search,
    utils::http,
};

/// unibar - check shop pages against your Scrapbox library
#[derive(Parser, Debug)]
#[command(
    name = "unibar",
    version,
    about = "Checks catalog pages against a Scrapbox project"
)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, default_value = "unibar.toml")]
    config: PathBuf,

    /// TOML file with page body templates (overrides the config's)
    #[arg(long)]
    formats: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a product page and print it as JSON
    Scrape {
        url: String,
        /// Read the page from a saved HTML file instead of fetching it
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Print the search key for a title
    SearchKey { title: String },

    /// Print the Scrapbox page body for a product page
    Body {
        url: String,
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Look a product page up in the Scrapbox project
    Check {
        url: String,
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Look up every item of a cart page
    Cart {
        url: String,
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Validate the config file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn format_store(cli: &Cli, config: &Config) -> Box<dyn FormatStore> {
    match &cli.formats {
        Some(path) => Box::new(FileFormatStore::new(path.clone())),
        None => Box::new(MemoryFormatStore::new(config.scrapbox_formats.clone())),
    }
}

fn print_report(report: &CheckReport) {
    match &report.outcome {
        CheckOutcome::ExistsPage(result) => {
            println!("Already in {}: {}", result.project_name, report.product.title());
            for page in &result.pages {
                println!("  {} {}", page.title, page.page_url);
            }
        }
        CheckOutcome::CreatePage(_) => {
            println!("Not found: {}", report.product.title());
            if let Some(url) = &report.create_page_url {
                println!("  {url}");
            }
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    let store = format_store(&cli, &config);
    let client = http::create_async_client(&config.http)?;

    match &cli.command {
        Command::Scrape { url, html } => {
            let doc = pipeline::load_document(&client, url, html.as_deref()).await?;
            let product = pipeline::scrape_product(&doc)?;
            println!("{}", product.to_wire_json()?);
        }

        Command::SearchKey { title } => {
            println!("{}", title_for_search(title));
        }

        Command::Body { url, html } => {
            let doc = pipeline::load_document(&client, url, html.as_deref()).await?;
            let product = pipeline::scrape_product(&doc)?;
            println!("{}", product.create_scrapbox_body_string(store.as_ref()).await?);
        }

        Command::Check { url, html } => {
            let report =
                pipeline::run_check(&config, &client, store.as_ref(), url, html.as_deref()).await?;
            print_report(&report);
        }

        Command::Cart { url, html } => {
            let outcome =
                pipeline::run_cart(&config, &client, store.as_ref(), url, html.as_deref()).await?;
            for check in &outcome.checks {
                match (&check.report, &check.error) {
                    (Some(report), _) => print_report(report),
                    (None, Some(error)) => println!("Failed: {} ({error})", check.item.title),
                    (None, None) => {}
                }
            }
            println!(
                "{} of {} item(s) already owned",
                outcome.owned,
                outcome.checks.len()
            );
        }

        Command::Validate => {
            log::info!("Validating {}...", cli.config.display());
            let config = Config::load(&cli.config)?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            if let Some(formats) = store.scrapbox_formats().await? {
                formats.validate()?;
            }
            println!("Config OK");
        }
    }

    Ok(())
}
