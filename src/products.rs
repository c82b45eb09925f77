//! Products

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::pet_types::PetCategory;

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Catalog id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Category, e.g. "Dog Food"
    pub category: String,

    /// Food type, e.g. "Dry Food"
    pub food_type: String,

    /// Pet the product is made for, if any
    pub pet: Option<PetCategory>,

    /// Product price
    pub price: Money<'a, Currency>,

    /// Average rating, 0 to 5
    pub rating: Decimal,

    /// Number of reviews
    pub reviews: u32,

    /// Marketing description
    pub description: String,
}

impl Product<'_> {
    /// Price in minor units (pence/cents).
    pub fn price_minor(&self) -> i64 {
        self.price.to_minor_units()
    }

    /// Returns true if `keyword` appears in the name or description, ignoring case.
    pub fn mentions(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();

        self.name.to_lowercase().contains(&keyword)
            || self.description.to_lowercase().contains(&keyword)
    }
}
