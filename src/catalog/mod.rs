//! Catalog
//!
//! An in-memory product list and the derived listing views shown on the
//! storefront's "shop all" and "shop by pet" pages. Views are recomputed from
//! scratch on every call.

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{pet_types::PetCategory, products::Product};

pub mod filter;
pub mod sort;
pub mod table;

pub use filter::FilterState;
pub use sort::SortOrder;

/// Catalog errors
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(u32),

    /// Products are priced in different currencies.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency of the first product
        expected: String,
        /// Offending currency
        found: String,
    },
}

/// Catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
}

impl<'a> Catalog<'a> {
    /// Build a catalog, checking ids are unique and prices share a currency.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateId`]: two products share an id.
    /// - [`CatalogError::CurrencyMismatch`]: products are priced in different currencies.
    pub fn new(products: Vec<Product<'a>>) -> Result<Self, CatalogError> {
        let mut ids = FxHashSet::default();
        let mut currency: Option<&Currency> = None;

        for product in &products {
            if !ids.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }

            let product_currency = product.price.currency();

            match currency {
                Some(expected) if expected != product_currency => {
                    return Err(CatalogError::CurrencyMismatch {
                        expected: expected.iso_alpha_code.to_string(),
                        found: product_currency.iso_alpha_code.to_string(),
                    });
                }
                Some(_) => {}
                None => currency = Some(product_currency),
            }
        }

        Ok(Self { products })
    }

    /// Filter and sort the catalog.
    pub fn view(&self, filters: &FilterState, sort: SortOrder) -> Vec<&Product<'a>> {
        let mut view: Vec<&Product<'a>> = self
            .products
            .iter()
            .filter(|product| filters.matches(product))
            .collect();

        sort.sort(&mut view);

        debug!(
            total = self.products.len(),
            shown = view.len(),
            %sort,
            "computed listing view"
        );

        view
    }

    /// Look up a product by id.
    pub fn get(&self, id: u32) -> Option<&Product<'a>> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct brands, in catalog order.
    pub fn brands(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|product| product.brand.as_str()))
    }

    /// Distinct categories, in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|product| product.category.as_str()))
    }

    /// Distinct food types, in catalog order.
    pub fn food_types(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|product| product.food_type.as_str()))
    }

    /// Cheapest and most expensive price, or `None` for an empty catalog.
    pub fn price_range(&self) -> Option<(Money<'a, Currency>, Money<'a, Currency>)> {
        let cheapest = self.products.iter().min_by_key(|product| product.price_minor())?;
        let dearest = self.products.iter().max_by_key(|product| product.price_minor())?;

        Some((cheapest.price, dearest.price))
    }

    /// Number of products made for `pet`.
    pub fn count_for_pet(&self, pet: PetCategory) -> u32 {
        let count = self
            .products
            .iter()
            .filter(|product| product.pet == Some(pet))
            .count();

        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn distinct<'p>(values: impl Iterator<Item = &'p str>) -> Vec<&'p str> {
    let mut seen = FxHashSet::default();

    values.filter(|value| seen.insert(*value)).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn product<'a>(id: u32, brand: &str, price_minor: i64, currency: &'a Currency) -> Product<'a> {
        Product {
            id,
            name: format!("Product {id}"),
            brand: brand.to_string(),
            category: "Dog Food".to_string(),
            food_type: "Dry Food".to_string(),
            pet: Some(PetCategory::Dog),
            price: Money::from_minor(price_minor, currency),
            rating: Decimal::new(40, 1),
            reviews: id,
            description: String::new(),
        }
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![product(1, "A", 100, USD), product(1, "B", 200, USD)]);

        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn new_rejects_mixed_currencies() {
        let result = Catalog::new(vec![product(1, "A", 100, USD), product(2, "B", 200, GBP)]);

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch { .. })));
    }

    #[test]
    fn facets_are_distinct_in_catalog_order() -> TestResult {
        let catalog = Catalog::new(vec![
            product(1, "Royal Canin", 100, USD),
            product(2, "Acana", 200, USD),
            product(3, "Royal Canin", 300, USD),
        ])?;

        assert_eq!(catalog.brands(), ["Royal Canin", "Acana"]);
        assert_eq!(catalog.food_types(), ["Dry Food"]);
        assert_eq!(catalog.count_for_pet(PetCategory::Dog), 3);
        assert_eq!(catalog.count_for_pet(PetCategory::Cat), 0);

        Ok(())
    }

    #[test]
    fn price_range_spans_catalog() -> TestResult {
        let catalog = Catalog::new(vec![
            product(1, "A", 1599, USD),
            product(2, "B", 499, USD),
            product(3, "C", 2999, USD),
        ])?;

        let (min, max) = catalog.price_range().ok_or("empty catalog")?;

        assert_eq!(min, Money::from_minor(499, USD));
        assert_eq!(max, Money::from_minor(2999, USD));
        assert!(Catalog::default().price_range().is_none());

        Ok(())
    }

    #[test]
    fn get_finds_by_id() -> TestResult {
        let catalog = Catalog::new(vec![product(7, "A", 100, USD)])?;

        assert_eq!(catalog.get(7).map(|product| product.id), Some(7));
        assert!(catalog.get(8).is_none());

        Ok(())
    }
}
