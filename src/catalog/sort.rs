//! Listing sort orders

use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

use crate::products::Product;

/// Unknown sort order name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

/// Product listing order.
///
/// All orders sort stably, so ties keep their catalog order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SortOrder {
    /// Most reviewed first
    #[default]
    Popular,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,

    /// Highest rated first
    Rating,

    /// Alphabetical by name
    Name,
}

impl SortOrder {
    /// Every order, in menu order.
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Popular,
        SortOrder::PriceLow,
        SortOrder::PriceHigh,
        SortOrder::Rating,
        SortOrder::Name,
    ];

    /// Menu key, e.g. `price-low`.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Popular => "popular",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::Rating => "rating",
            SortOrder::Name => "name",
        }
    }

    /// Compare two products under this order.
    pub fn compare(self, a: &Product<'_>, b: &Product<'_>) -> Ordering {
        match self {
            SortOrder::Popular => b.reviews.cmp(&a.reviews),
            SortOrder::PriceLow => a.price_minor().cmp(&b.price_minor()),
            SortOrder::PriceHigh => b.price_minor().cmp(&a.price_minor()),
            SortOrder::Rating => b.rating.cmp(&a.rating),
            SortOrder::Name => a.name.cmp(&b.name),
        }
    }

    /// Sort `products` in place.
    pub fn sort(self, products: &mut [&Product<'_>]) {
        products.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();

        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == wanted)
            .ok_or(UnknownSortOrder(wanted))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;

    fn product<'a>(name: &str, price_minor: i64, rating: i64, reviews: u32) -> Product<'a> {
        Product {
            id: 0,
            name: name.to_string(),
            brand: "Brand".to_string(),
            category: "Dog Food".to_string(),
            food_type: "Dry Food".to_string(),
            pet: None,
            price: Money::from_minor(price_minor, USD),
            rating: Decimal::new(rating, 1),
            reviews,
            description: String::new(),
        }
    }

    fn names(products: &[&Product<'_>]) -> Vec<String> {
        products.iter().map(|product| product.name.clone()).collect()
    }

    #[test]
    fn parses_menu_keys() -> TestResult {
        assert_eq!("price-low".parse::<SortOrder>()?, SortOrder::PriceLow);
        assert_eq!("Price-High".parse::<SortOrder>()?, SortOrder::PriceHigh);
        assert_eq!(
            "cheapest".parse::<SortOrder>(),
            Err(UnknownSortOrder("cheapest".to_string()))
        );

        Ok(())
    }

    #[test]
    fn default_is_most_reviewed() {
        let a = product("A", 100, 40, 5);
        let b = product("B", 100, 40, 50);
        let mut products = [&a, &b];

        SortOrder::default().sort(&mut products);

        assert_eq!(names(&products), ["B", "A"]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let a = product("Zed", 500, 40, 5);
        let b = product("Amy", 500, 41, 5);
        let c = product("Bob", 100, 42, 5);
        let mut products = [&a, &b, &c];

        SortOrder::PriceHigh.sort(&mut products);

        assert_eq!(names(&products), ["Zed", "Amy", "Bob"]);
    }

    #[test]
    fn rating_sorts_descending() {
        let a = product("A", 100, 39, 1);
        let b = product("B", 100, 48, 1);
        let c = product("C", 100, 42, 1);
        let mut products = [&a, &b, &c];

        SortOrder::Rating.sort(&mut products);

        assert_eq!(names(&products), ["B", "C", "A"]);
    }

    #[test]
    fn name_sorts_lexicographically() {
        let a = product("Whiskas", 100, 40, 1);
        let b = product("Acana", 100, 40, 1);
        let mut products = [&a, &b];

        SortOrder::Name.sort(&mut products);

        assert_eq!(names(&products), ["Acana", "Whiskas"]);
    }
}
