//! Pet Types
//!
//! The fixed list of pet categories the shop sells for, and the validated
//! records that track how many products each one has.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::Catalog;

/// Icon used when a pet type is created without one.
pub const DEFAULT_ICON: &str = "/images/pet-types/default.svg";

/// Pet type errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PetTypeError {
    /// Name is not one of the known categories.
    #[error("unknown pet category: {0}")]
    UnknownCategory(String),

    /// Slug is empty or not lowercase kebab-case.
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    /// Icon is empty.
    #[error("icon must not be empty")]
    EmptyIcon,

    /// A pet type with this name already exists.
    #[error("pet type already exists: {0}")]
    DuplicateName(PetCategory),

    /// A pet type with this slug already exists.
    #[error("slug already in use: {0}")]
    DuplicateSlug(String),

    /// No pet type registered under this slug.
    #[error("pet type not found: {0}")]
    NotFound(String),

    /// The product counter would drop below zero.
    #[error("product count for {0} cannot go below zero")]
    CountUnderflow(PetCategory),
}

/// Pet category
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum PetCategory {
    /// Dogs
    Dog,

    /// Cats
    Cat,

    /// Birds
    Bird,

    /// Fish
    Fish,

    /// Rabbits, hamsters, guinea pigs and friends
    #[serde(rename = "Small Pet")]
    SmallPet,

    /// Reptiles
    Reptile,
}

impl PetCategory {
    /// Every category, in display order.
    pub const ALL: [PetCategory; 6] = [
        PetCategory::Dog,
        PetCategory::Cat,
        PetCategory::Bird,
        PetCategory::Fish,
        PetCategory::SmallPet,
        PetCategory::Reptile,
    ];

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            PetCategory::Dog => "Dog",
            PetCategory::Cat => "Cat",
            PetCategory::Bird => "Bird",
            PetCategory::Fish => "Fish",
            PetCategory::SmallPet => "Small Pet",
            PetCategory::Reptile => "Reptile",
        }
    }

    /// Lowercase, hyphenated slug derived from the name.
    pub fn default_slug(self) -> String {
        slugify(self.as_str())
    }
}

impl fmt::Display for PetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PetCategory {
    type Err = PetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slugify(s);

        PetCategory::ALL
            .into_iter()
            .find(|category| category.default_slug() == wanted)
            .ok_or_else(|| PetTypeError::UnknownCategory(s.to_string()))
    }
}

/// Pet type record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetType {
    /// Category name, unique
    pub name: PetCategory,

    /// URL slug, unique and lowercase
    pub slug: String,

    /// Icon URL
    pub icon: String,

    /// Number of products listed for this pet
    pub num_products: u32,
}

impl PetType {
    /// Bumps the product counter.
    pub fn increment(&mut self) {
        self.num_products = self.num_products.saturating_add(1);
    }

    /// Drops the product counter by one.
    ///
    /// # Errors
    ///
    /// Returns [`PetTypeError::CountUnderflow`] if the counter is already zero.
    pub fn decrement(&mut self) -> Result<(), PetTypeError> {
        self.num_products = self
            .num_products
            .checked_sub(1)
            .ok_or(PetTypeError::CountUnderflow(self.name))?;

        Ok(())
    }
}

/// New pet type data, validated on conversion into a [`PetType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPetType {
    /// Category name
    pub name: PetCategory,

    /// Slug; derived from the name when omitted
    pub slug: Option<String>,

    /// Icon URL; [`DEFAULT_ICON`] when omitted
    pub icon: Option<String>,
}

impl From<PetCategory> for NewPetType {
    fn from(name: PetCategory) -> Self {
        Self {
            name,
            slug: None,
            icon: None,
        }
    }
}

impl TryFrom<NewPetType> for PetType {
    type Error = PetTypeError;

    fn try_from(new: NewPetType) -> Result<Self, Self::Error> {
        let slug = match new.slug {
            Some(slug) => {
                let slug = slug.trim().to_lowercase();

                if !is_valid_slug(&slug) {
                    return Err(PetTypeError::InvalidSlug(slug));
                }

                slug
            }
            None => new.name.default_slug(),
        };

        let icon = match new.icon {
            Some(icon) if icon.trim().is_empty() => return Err(PetTypeError::EmptyIcon),
            Some(icon) => icon.trim().to_string(),
            None => DEFAULT_ICON.to_string(),
        };

        Ok(PetType {
            name: new.name,
            slug,
            icon,
            num_products: 0,
        })
    }
}

/// Registry of pet types, enforcing unique names and slugs on insert.
#[derive(Debug, Default, Clone)]
pub struct PetTypes {
    types: Vec<PetType>,
    by_slug: FxHashMap<String, usize>,
}

impl PetTypes {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one pet type per category with default slugs and icons.
    ///
    /// # Errors
    ///
    /// Only fails if the category list itself produces clashing slugs.
    pub fn seed() -> Result<Self, PetTypeError> {
        let mut registry = Self::new();

        for category in PetCategory::ALL {
            registry.insert(category.into())?;
        }

        debug!(count = registry.len(), "seeded pet types");

        Ok(registry)
    }

    /// Validate and insert a new pet type.
    ///
    /// # Errors
    ///
    /// Returns a validation error, or a duplicate error if the name or slug is taken.
    pub fn insert(&mut self, new: NewPetType) -> Result<(), PetTypeError> {
        let pet_type = PetType::try_from(new)?;

        if self.types.iter().any(|existing| existing.name == pet_type.name) {
            return Err(PetTypeError::DuplicateName(pet_type.name));
        }

        if self.by_slug.contains_key(&pet_type.slug) {
            return Err(PetTypeError::DuplicateSlug(pet_type.slug));
        }

        self.by_slug.insert(pet_type.slug.clone(), self.types.len());
        self.types.push(pet_type);

        Ok(())
    }

    /// Look up a pet type by slug.
    pub fn get(&self, slug: &str) -> Option<&PetType> {
        self.by_slug.get(slug).and_then(|idx| self.types.get(*idx))
    }

    /// Look up a pet type by category.
    pub fn by_category(&self, category: PetCategory) -> Option<&PetType> {
        self.types.iter().find(|pet_type| pet_type.name == category)
    }

    fn get_mut(&mut self, slug: &str) -> Result<&mut PetType, PetTypeError> {
        let idx = *self
            .by_slug
            .get(slug)
            .ok_or_else(|| PetTypeError::NotFound(slug.to_string()))?;

        self.types
            .get_mut(idx)
            .ok_or_else(|| PetTypeError::NotFound(slug.to_string()))
    }

    /// Increment the product counter for `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`PetTypeError::NotFound`] for an unknown slug.
    pub fn increment(&mut self, slug: &str) -> Result<u32, PetTypeError> {
        let pet_type = self.get_mut(slug)?;

        pet_type.increment();

        Ok(pet_type.num_products)
    }

    /// Decrement the product counter for `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`PetTypeError::NotFound`] for an unknown slug, or
    /// [`PetTypeError::CountUnderflow`] if the counter is already zero.
    pub fn decrement(&mut self, slug: &str) -> Result<u32, PetTypeError> {
        let pet_type = self.get_mut(slug)?;

        pet_type.decrement()?;

        Ok(pet_type.num_products)
    }

    /// Overwrite every counter with the number of catalog products for that pet.
    pub fn sync_counts(&mut self, catalog: &Catalog<'_>) {
        for pet_type in &mut self.types {
            pet_type.num_products = catalog.count_for_pet(pet_type.name);
        }
    }

    /// Pet types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PetType> {
        self.types.iter()
    }

    /// Number of registered pet types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn slugify(s: &str) -> String {
    s.trim()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
