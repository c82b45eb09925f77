//! Petshop prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, FilterState, SortOrder},
    client::{
        ApiClient, ApiError, FileTokenStore, ListParams, MemoryTokenStore, Page, ReqwestTransport,
        TokenStore, Transport,
    },
    config::{AppConfig, ConfigError, Environment},
    fixtures::{Fixture, FixtureError},
    pet_types::{PetCategory, PetType, PetTypeError, PetTypes},
    products::Product,
    subscriptions::{
        DeliveryFrequency, NewSubscription, Subscription, SubscriptionError, SubscriptionStatus,
    },
};
