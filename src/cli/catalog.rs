use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::Args;
use petshop::{
    catalog::{Catalog, FilterState, SortOrder, table::write_listing},
    fixtures::Fixture,
    pet_types::{PetCategory, PetTypes},
};
use rust_decimal::Decimal;

use super::write_failed;

#[derive(Debug, Args)]
pub(crate) struct FixtureArgs {
    /// Product fixture set to load
    #[arg(long, default_value = "shop-all")]
    fixture: String,

    /// Directory holding the fixture sets
    #[arg(long, env = "FIXTURES_DIR", default_value = "./fixtures")]
    fixtures_dir: PathBuf,
}

impl FixtureArgs {
    fn load(&self) -> Result<Catalog<'static>, String> {
        Fixture::with_base_path(&self.fixtures_dir)
            .load_products(&self.fixture)
            .map_err(|error| format!("failed to load fixture {}: {error}", self.fixture))
    }
}

#[derive(Debug, Args)]
pub(crate) struct ListingArgs {
    #[command(flatten)]
    fixture: FixtureArgs,

    /// Price ceiling, inclusive
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Food type to include; repeat for more
    #[arg(long = "type")]
    food_types: Vec<String>,

    /// Brand to include; repeat for more
    #[arg(long = "brand")]
    brands: Vec<String>,

    /// Category keyword
    #[arg(long)]
    category: Option<String>,

    /// Special diet keyword, e.g. grain-free
    #[arg(long)]
    diet: Option<String>,

    /// Only products for this pet
    #[arg(long, value_enum)]
    pet: Option<PetCategory>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortOrder::Popular)]
    sort: SortOrder,
}

impl ListingArgs {
    fn filters(&self) -> FilterState {
        let mut filters = FilterState::new();

        filters.set_max_price(self.max_price);
        filters.set_category(self.category.as_deref());
        filters.set_diet(self.diet.as_deref());
        filters.set_pet(self.pet);

        for food_type in &self.food_types {
            filters.select_food_type(food_type);
        }

        for brand in &self.brands {
            filters.select_brand(brand);
        }

        filters
    }
}

pub(crate) fn products(args: &ListingArgs) -> Result<(), String> {
    let catalog = args.fixture.load()?;
    let listing = catalog.view(&args.filters(), args.sort);

    write_listing(io::stdout().lock(), &listing).map_err(write_failed)
}

pub(crate) fn facets(args: &FixtureArgs) -> Result<(), String> {
    let catalog = args.load()?;
    let mut out = io::stdout().lock();

    writeln!(out, "brands: {}", catalog.brands().join(", ")).map_err(write_failed)?;
    writeln!(out, "categories: {}", catalog.categories().join(", ")).map_err(write_failed)?;
    writeln!(out, "types: {}", catalog.food_types().join(", ")).map_err(write_failed)?;

    match catalog.price_range() {
        Some((min, max)) => writeln!(out, "price range: {min} - {max}"),
        None => writeln!(out, "price range: none"),
    }
    .map_err(write_failed)?;

    for pet in PetCategory::ALL {
        writeln!(out, "{pet}: {}", catalog.count_for_pet(pet)).map_err(write_failed)?;
    }

    Ok(())
}

pub(crate) fn pet_types(args: &FixtureArgs) -> Result<(), String> {
    let catalog = args.load()?;

    let mut registry =
        PetTypes::seed().map_err(|error| format!("failed to seed pet types: {error}"))?;

    registry.sync_counts(&catalog);

    let mut out = io::stdout().lock();

    for pet_type in registry.iter() {
        writeln!(
            out,
            "{:<10} {:<10} {:>4}  {}",
            pet_type.name, pet_type.slug, pet_type.num_products, pet_type.icon
        )
        .map_err(write_failed)?;
    }

    Ok(())
}
