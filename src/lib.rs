//! Petshop
//!
//! Catalog, API client and record types for a pet-supplies storefront.

pub mod catalog;
pub mod client;
pub mod config;
pub mod fixtures;
pub mod observability;
pub mod pet_types;
pub mod prelude;
pub mod products;
pub mod subscriptions;
pub mod uuids;
