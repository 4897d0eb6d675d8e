use crate::cli::{print_features, prompt_reverse, prompt_search, spinner};
use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Select};
use photon_client::api::PhotonClient;
use photon_client::error::Result;
use photon_client::models::{BoundingBox, Feature, ForwardSearch, Language, Layer, ReverseSearch};
use tracing::{error, info};

/// CLI for the Photon geocoding API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the Photon instance (overrides PHOTON_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Find places matching a free-text query
    Search(SearchArgs),

    /// Find places near a coordinate
    Reverse(ReverseArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Use http instead of https
    #[arg(long)]
    pub insecure: bool,

    /// Print the raw features as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Text to search for
    pub text: String,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Latitude to bias results towards (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude to bias results towards (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Result language (en, de, fr, it)
    #[arg(long)]
    pub lang: Option<Language>,

    /// Restrict results to minLon,minLat,maxLon,maxLat
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<BoundingBox>,

    /// Only return results of this layer (house, street, city, ...)
    #[arg(long)]
    pub layer: Option<Layer>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl SearchArgs {
    pub fn to_options(&self) -> ForwardSearch {
        ForwardSearch {
            limit: self.limit,
            latitude: self.lat,
            longitude: self.lon,
            language: self.lang,
            bounding_box: self.bbox,
            layer: self.layer,
            secure: !self.common.insecure,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ReverseArgs {
    /// Latitude of the point
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the point
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Search radius in meters
    #[arg(short, long)]
    pub radius: Option<u32>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Result language (en, de, fr, it)
    #[arg(long)]
    pub lang: Option<Language>,

    /// Only return results of this layer (house, street, city, ...)
    #[arg(long)]
    pub layer: Option<Layer>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ReverseArgs {
    pub fn to_options(&self) -> ReverseSearch {
        ReverseSearch {
            limit: self.limit,
            language: self.lang,
            radius: self.radius,
            layer: self.layer,
            secure: !self.common.insecure,
        }
    }
}

/// CLI application
pub struct App {
    client: PhotonClient,
}

impl App {
    /// Create a new CLI application.
    ///
    /// `url_override` (from `--url`) takes precedence over the configured base URL.
    pub fn new(config: &Config, url_override: Option<String>) -> Result<Self> {
        let base_url = url_override.unwrap_or_else(|| config.base_url.clone());

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let client = PhotonClient::with_http_client(&base_url, http);
        info!("Using Photon instance at {}", client.base_url());

        Ok(Self { client })
    }

    /// Run a single command and print its results
    pub async fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Search(args) => {
                let features = self.search(&args).await?;
                print_features(&features, args.common.json)?;
            },
            Commands::Reverse(args) => {
                let features = self.reverse(&args).await?;
                print_features(&features, args.common.json)?;
            },
        }

        Ok(())
    }

    /// Runs a command and reports a failure on stderr instead of returning it.
    ///
    /// Returns `false` when the command failed.
    pub async fn run_and_report(&self, command: Commands) -> bool {
        match self.run_command(command).await {
            Ok(()) => true,
            Err(e) => {
                error!("Command execution failed: {:?}", e);
                eprintln!("{} {}", "Error:".red(), e.to_string().red());
                false
            },
        }
    }

    /// Forward search with a spinner while the request is in flight
    async fn search(&self, args: &SearchArgs) -> Result<Vec<Feature>> {
        let progress = spinner(&format!("Searching for '{}'...", args.text))?;
        let result = self.client.forward_search(&args.text, &args.to_options()).await;
        progress.finish_and_clear();
        result
    }

    /// Reverse search with a spinner while the request is in flight
    async fn reverse(&self, args: &ReverseArgs) -> Result<Vec<Feature>> {
        let progress = spinner(&format!("Looking up {}, {}...", args.lat, args.lon))?;
        let result = self
            .client
            .reverse_search(args.lat, args.lon, &args.to_options())
            .await;
        progress.finish_and_clear();
        result
    }

    /// Interactive menu loop, used when no subcommand is given
    pub async fn run_interactive(&self) -> Result<()> {
        println!("{}", "Welcome to the Photon geocoding CLI!".cyan().bold());

        loop {
            let options = &["Search by text", "Search by coordinates", "Exit"];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("What would you like to do?")
                .items(options)
                .default(0)
                .interact_opt()? // None on Esc/q
                .unwrap_or(options.len() - 1); // Default to Exit if cancelled

            println!("\n---\n");

            let command = match selection {
                0 => match prompt_search() {
                    Ok(args) => Commands::Search(args),
                    Err(e) => {
                        println!("{} {}", "Failed to get input:".red(), e);
                        continue;
                    },
                },
                1 => match prompt_reverse() {
                    Ok(args) => Commands::Reverse(args),
                    Err(e) => {
                        println!("{} {}", "Failed to get input:".red(), e);
                        continue;
                    },
                },
                _ => {
                    println!("{}", "Goodbye!".green());
                    break;
                },
            };

            self.run_and_report(command).await;

            println!("\n---\n");
        }

        Ok(())
    }
}
