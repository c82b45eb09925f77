//! Listing table rendering

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::products::Product;

/// Write a product listing as a table.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_listing(mut out: impl io::Write, products: &[&Product<'_>]) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record([
        "#", "Product", "Brand", "Category", "Type", "Pet", "Price", "Rating", "Reviews",
    ]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.brand.clone(),
            product.category.clone(),
            product.food_type.clone(),
            product
                .pet
                .map_or_else(String::new, |pet| pet.as_str().to_string()),
            product.price.to_string(),
            format!("{:.1}", product.rating),
            product.reviews.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(6..9), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "{} product(s)", products.len())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn listing_contains_product_rows() -> TestResult {
        let product = Product {
            id: 3,
            name: "Feather Treats".to_string(),
            brand: "Kaytee".to_string(),
            category: "Bird Food".to_string(),
            food_type: "Treats".to_string(),
            pet: None,
            price: Money::from_minor(899, USD),
            rating: Decimal::new(42, 1),
            reviews: 17,
            description: String::new(),
        };

        let mut out = Vec::new();

        write_listing(&mut out, &[&product])?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Feather Treats"));
        assert!(rendered.contains("Kaytee"));
        assert!(rendered.contains("4.2"));
        assert!(rendered.contains("1 product(s)"));

        Ok(())
    }
}
