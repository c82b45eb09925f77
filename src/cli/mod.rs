use std::io;

use clap::{Parser, Subcommand};
use petshop::{config::AppConfig, observability};

mod api;
mod catalog;
mod config;
mod subscription;

#[derive(Debug, Parser)]
#[command(name = "petshop", about = "Petshop CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products with filters and sorting
    Products(catalog::ListingArgs),

    /// Show brands, categories, types and the price range of a catalog
    Facets(catalog::FixtureArgs),

    /// Show the pet type registry with product counts
    PetTypes(catalog::FixtureArgs),

    /// Subscription tools
    Subscription(subscription::SubscriptionCommand),

    /// Call the storefront API
    Api(api::ApiCommand),

    /// Configuration tools
    Config(config::ConfigCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let config = AppConfig::from_env()
            .map_err(|error| format!("failed to load configuration: {error}"))?;

        let _guards = observability::init(&config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        if !matches!(self.command, Commands::Config(_)) {
            config.validate().map_err(|error| error.to_string())?;
        }

        match self.command {
            Commands::Products(args) => catalog::products(&args),
            Commands::Facets(args) => catalog::facets(&args),
            Commands::PetTypes(args) => catalog::pet_types(&args),
            Commands::Subscription(command) => subscription::run(&command),
            Commands::Api(command) => api::run(command, &config).await,
            Commands::Config(command) => config::run(&command, &config),
        }
    }
}

fn write_failed(error: io::Error) -> String {
    format!("failed to write output: {error}")
}
