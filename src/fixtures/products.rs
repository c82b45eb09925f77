//! Product Fixtures

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, pet_types::PetCategory, products::Product};

/// Highest rating a product can carry.
const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products, in listing order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Catalog id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Category
    pub category: String,

    /// Food type
    #[serde(rename = "type")]
    pub food_type: String,

    /// Pet the product is made for
    #[serde(default)]
    pub pet: Option<PetCategory>,

    /// Product price (e.g., "45.99 USD")
    pub price: String,

    /// Average rating, 0 to 5
    pub rating: f64,

    /// Review count
    #[serde(default)]
    pub reviews: u32,

    /// Description
    #[serde(default)]
    pub description: String,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        let rating = Decimal::from_f64(fixture.rating)
            .map(|rating| rating.round_dp(1))
            .filter(|rating| *rating >= Decimal::ZERO && *rating <= MAX_RATING)
            .ok_or(FixtureError::InvalidRating(fixture.id))?;

        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            brand: fixture.brand,
            category: fixture.category,
            food_type: fixture.food_type,
            pet: fixture.pet,
            price: Money::from_minor(minor_units, currency),
            rating,
            reviews: fixture.reviews,
            description: fixture.description,
        })
    }
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
