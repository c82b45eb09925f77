//! Listing filters

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{pet_types::PetCategory, products::Product};

/// User-selected constraints applied to a product listing.
///
/// Every populated field narrows the listing; an empty selection set or an
/// absent value places no restriction on that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    max_price: Option<Decimal>,
    food_types: SmallVec<[String; 4]>,
    brands: SmallVec<[String; 4]>,
    category: Option<String>,
    diet: Option<String>,
    pet: Option<PetCategory>,
}

impl FilterState {
    /// Unfiltered state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep products priced at or below `max_price` (major units).
    #[must_use]
    pub fn with_max_price(mut self, max_price: Decimal) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Add a food type to the selection.
    #[must_use]
    pub fn with_food_type(mut self, food_type: &str) -> Self {
        self.select_food_type(food_type);
        self
    }

    /// Add a brand to the selection.
    #[must_use]
    pub fn with_brand(mut self, brand: &str) -> Self {
        self.select_brand(brand);
        self
    }

    /// Only keep products whose category contains `keyword`.
    #[must_use]
    pub fn with_category(mut self, keyword: &str) -> Self {
        self.set_category(Some(keyword));
        self
    }

    /// Only keep products whose name or description mention `keyword`.
    #[must_use]
    pub fn with_diet(mut self, keyword: &str) -> Self {
        self.set_diet(Some(keyword));
        self
    }

    /// Only keep products made for `pet`.
    #[must_use]
    pub fn with_pet(mut self, pet: PetCategory) -> Self {
        self.pet = Some(pet);
        self
    }

    /// Set or clear the price ceiling.
    pub fn set_max_price(&mut self, max_price: Option<Decimal>) {
        self.max_price = max_price;
    }

    /// Set or clear the category keyword.
    pub fn set_category(&mut self, keyword: Option<&str>) {
        self.category = normalise(keyword);
    }

    /// Set or clear the special-diet keyword.
    pub fn set_diet(&mut self, keyword: Option<&str>) {
        self.diet = normalise(keyword);
    }

    /// Set or clear the pet restriction.
    pub fn set_pet(&mut self, pet: Option<PetCategory>) {
        self.pet = pet;
    }

    /// Add a food type to the selection; no-op if already selected.
    pub fn select_food_type(&mut self, food_type: &str) {
        select(&mut self.food_types, food_type);
    }

    /// Add a brand to the selection; no-op if already selected.
    pub fn select_brand(&mut self, brand: &str) {
        select(&mut self.brands, brand);
    }

    /// Flip a food type checkbox. Returns true if it is now selected.
    pub fn toggle_food_type(&mut self, food_type: &str) -> bool {
        toggle(&mut self.food_types, food_type)
    }

    /// Flip a brand checkbox. Returns true if it is now selected.
    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        toggle(&mut self.brands, brand)
    }

    /// Clear every constraint.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns true if no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Price ceiling, if any.
    pub fn max_price(&self) -> Option<Decimal> {
        self.max_price
    }

    /// Selected food types, lowercased.
    pub fn food_types(&self) -> &[String] {
        &self.food_types
    }

    /// Selected brands, lowercased.
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    /// Returns true if `product` satisfies every constraint.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        self.max_price
            .is_none_or(|max_price| *product.price.amount() <= max_price)
            && selected(&self.food_types, &product.food_type)
            && selected(&self.brands, &product.brand)
            && self
                .category
                .as_deref()
                .is_none_or(|keyword| product.category.to_lowercase().contains(keyword))
            && self
                .diet
                .as_deref()
                .is_none_or(|keyword| product.mentions(keyword))
            && self.pet.is_none_or(|pet| product.pet == Some(pet))
    }
}

fn normalise(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

fn select(selection: &mut SmallVec<[String; 4]>, value: &str) {
    let Some(value) = normalise(Some(value)) else {
        return;
    };

    if !selection.contains(&value) {
        selection.push(value);
    }
}

fn toggle(selection: &mut SmallVec<[String; 4]>, value: &str) -> bool {
    let Some(value) = normalise(Some(value)) else {
        return false;
    };

    if let Some(pos) = selection.iter().position(|selected| *selected == value) {
        selection.remove(pos);

        false
    } else {
        selection.push(value);

        true
    }
}

/// Empty selection lets everything through.
fn selected(selection: &[String], value: &str) -> bool {
    selection.is_empty() || selection.iter().any(|selected| *selected == value.to_lowercase())
}
