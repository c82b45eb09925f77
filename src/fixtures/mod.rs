//! Fixtures
//!
//! YAML product sets used to seed a [`Catalog`], stored as
//! `<base>/products/<name>.yml`.

use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    products::Product,
};

pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Rating outside 0 to 5
    #[error("Invalid rating for product {0}")]
    InvalidRating(u32),

    /// Loaded products do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture loader rooted at `./fixtures`
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a product set into a catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price or
    /// rating is invalid, or if the products do not form a valid catalog.
    pub fn load_products(&self, name: &str) -> Result<Catalog<'static>, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            path = %file_path.display(),
            count = products.len(),
            "loaded product fixture"
        );

        Ok(Catalog::new(products)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, name: &str, contents: &str) -> TestResult {
        let dir = base.join("products");

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_shop_all_products() -> TestResult {
        let catalog = Fixture::new().load_products("shop-all")?;

        assert_eq!(catalog.len(), 6);

        let first = catalog.get(1).ok_or("missing product 1")?;

        assert_eq!(first.brand, "Royal Canin");
        assert_eq!(first.price_minor(), 4599);

        Ok(())
    }

    #[test]
    fn fixture_missing_file_returns_io_error() {
        let result = Fixture::new().load_products("nonexistent");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn fixture_rejects_mixed_currencies() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "mixed",
            r#"
products:
  - { id: 1, name: A, brand: A, category: Dog Food, type: Dry Food, price: "1.00 USD", rating: 4 }
  - { id: 2, name: B, brand: B, category: Dog Food, type: Dry Food, price: "1.00 GBP", rating: 4 }
"#,
        )?;

        let result = Fixture::with_base_path(dir.path()).load_products("mixed");

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch { .. }))
        ));

        Ok(())
    }

    #[test]
    fn fixture_rejects_malformed_yaml() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "broken", "products: [ { id: one } ]")?;

        let result = Fixture::with_base_path(dir.path()).load_products("broken");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));

        Ok(())
    }
}
