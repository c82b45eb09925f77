use std::io::{self, Write};

use clap::{Args, Subcommand};
use petshop::{
    client::{
        ApiClient, ApiError, FileTokenStore, ListParams, Page, ReqwestTransport, foods::Food,
        products::RemoteProduct,
    },
    config::AppConfig,
};

use super::write_failed;

#[derive(Debug, Args)]
pub(crate) struct ApiCommand {
    #[command(subcommand)]
    command: ApiSubcommand,
}

#[derive(Debug, Subcommand)]
enum ApiSubcommand {
    /// Check the API is up
    Health,

    /// List foods
    Foods(ListArgs),

    /// Show one food
    Food(IdArgs),

    /// Search foods by keyword
    Search(SearchArgs),

    /// List products
    Products(ListArgs),

    /// Show one product
    Product(IdArgs),

    /// List pet types
    PetTypes,

    /// List brands
    Brands,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Page number
    #[arg(long)]
    page: Option<u32>,

    /// Page size
    #[arg(long)]
    limit: Option<u32>,

    /// Category filter
    #[arg(long)]
    category: Option<String>,

    /// Brand filter
    #[arg(long)]
    brand: Option<String>,

    /// Pet type filter
    #[arg(long)]
    pet_type: Option<String>,

    /// Sort key
    #[arg(long)]
    sort: Option<String>,

    /// Minimum price
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price
    #[arg(long)]
    max_price: Option<f64>,
}

impl From<ListArgs> for ListParams {
    fn from(args: ListArgs) -> Self {
        ListParams {
            page: args.page,
            limit: args.limit,
            category: args.category,
            brand: args.brand,
            pet_type: args.pet_type,
            sort: args.sort,
            min_price: args.min_price,
            max_price: args.max_price,
        }
    }
}

#[derive(Debug, Args)]
struct IdArgs {
    /// Record id
    id: String,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Search term
    term: String,

    #[command(flatten)]
    list: ListArgs,
}

type Client = ApiClient<ReqwestTransport, FileTokenStore>;

pub(crate) async fn run(command: ApiCommand, config: &AppConfig) -> Result<(), String> {
    let transport = ReqwestTransport::new(config.api.timeout())
        .map_err(|error| format!("failed to build http client: {error}"))?;

    let client = ApiClient::new(
        config.api.api_base_url.clone(),
        transport,
        FileTokenStore::new(&config.api.token_file),
    );

    let mut out = io::stdout().lock();

    match command.command {
        ApiSubcommand::Health => health(&client, &mut out).await,
        ApiSubcommand::Foods(args) => {
            let page = client.list_foods(&args.into()).await.map_err(failed)?;

            write_foods(&mut out, &page)
        }
        ApiSubcommand::Food(args) => {
            let food = client.food(&args.id).await.map_err(failed)?;

            write_food(&mut out, &food)
        }
        ApiSubcommand::Search(args) => {
            let page = client
                .search_foods(&args.term, &args.list.into())
                .await
                .map_err(failed)?;

            write_foods(&mut out, &page)
        }
        ApiSubcommand::Products(args) => {
            let page = client.list_products(&args.into()).await.map_err(failed)?;

            for product in &page.items {
                write_product(&mut out, product)?;
            }

            write_pagination(&mut out, &page)
        }
        ApiSubcommand::Product(args) => {
            let product = client.product(&args.id).await.map_err(failed)?;

            write_product(&mut out, &product)
        }
        ApiSubcommand::PetTypes => {
            for pet_type in client.pet_types().await.map_err(failed)? {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    pet_type.slug, pet_type.name, pet_type.num_products
                )
                .map_err(write_failed)?;
            }

            Ok(())
        }
        ApiSubcommand::Brands => {
            for brand in client.brands().await.map_err(failed)? {
                writeln!(out, "{}\t{}", brand.id, brand.name).map_err(write_failed)?;
            }

            Ok(())
        }
    }
}

fn failed(error: ApiError) -> String {
    format!("api request failed: {error}")
}

async fn health(client: &Client, out: &mut impl Write) -> Result<(), String> {
    let health = client.health().await.map_err(failed)?;

    writeln!(
        out,
        "status: {} environment: {} uptime: {}s",
        health.status,
        health.environment.as_deref().unwrap_or("unknown"),
        health.uptime.unwrap_or_default()
    )
    .map_err(write_failed)
}

fn write_food(out: &mut impl Write, food: &Food) -> Result<(), String> {
    writeln!(
        out,
        "{}\t{}\t{}\t{:.2}{}",
        food.id,
        food.name,
        food.brand.as_deref().unwrap_or("-"),
        food.price,
        if food.in_stock { "" } else { "\t(out of stock)" }
    )
    .map_err(write_failed)
}

fn write_foods(out: &mut impl Write, page: &Page<Food>) -> Result<(), String> {
    for food in &page.items {
        write_food(out, food)?;
    }

    write_pagination(out, page)
}

fn write_product(out: &mut impl Write, product: &RemoteProduct) -> Result<(), String> {
    writeln!(
        out,
        "{}\t{}\t{}\t{:.2}",
        product.id,
        product.name,
        product.brand.as_deref().unwrap_or("-"),
        product.price
    )
    .map_err(write_failed)
}

fn write_pagination<T>(out: &mut impl Write, page: &Page<T>) -> Result<(), String> {
    let Some(pagination) = page.pagination else {
        return writeln!(out, "{} result(s)", page.items.len()).map_err(write_failed);
    };

    writeln!(
        out,
        "page {} of {} ({} total)",
        pagination.page, pagination.pages, pagination.total
    )
    .map_err(write_failed)
}
