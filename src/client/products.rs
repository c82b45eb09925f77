//! Product endpoints

use serde::Deserialize;

use crate::client::{
    ApiClient, ApiError, Envelope, ListParams, Page, TokenStore, Transport, path_id,
};

/// Product as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProduct {
    /// Document id
    #[serde(alias = "_id")]
    pub id: String,

    /// Name
    pub name: String,

    /// Brand name
    #[serde(default)]
    pub brand: Option<String>,

    /// Category name
    #[serde(default)]
    pub category: Option<String>,

    /// Pet types the product is for
    #[serde(default)]
    pub pet_types: Vec<String>,

    /// Price
    pub price: f64,

    /// Average rating
    #[serde(default)]
    pub rating: Option<f64>,

    /// Review count
    #[serde(default)]
    pub num_reviews: Option<u32>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,
}

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    /// Document id
    #[serde(alias = "_id")]
    pub id: String,

    /// Name
    pub name: String,

    /// URL slug
    #[serde(default)]
    pub slug: Option<String>,
}

/// Pet type as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePetType {
    /// Document id
    #[serde(alias = "_id")]
    pub id: String,

    /// Name, e.g. "Dog"
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Icon URL
    #[serde(default)]
    pub icon: Option<String>,

    /// Number of products listed
    #[serde(default)]
    pub num_products: u32,
}

/// Brand
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    /// Document id
    #[serde(alias = "_id")]
    pub id: String,

    /// Name
    pub name: String,

    /// Logo URL
    #[serde(default)]
    pub logo: Option<String>,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// `GET /products`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn list_products(
        &self,
        params: &ListParams,
    ) -> Result<Page<RemoteProduct>, ApiError> {
        let envelope: Envelope<Vec<RemoteProduct>> =
            self.get("/products", params.to_query()).await?;

        Ok(envelope.into())
    }

    /// `GET /products/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidId`] for an unusable id, or an [`ApiError`]
    /// if the request fails.
    pub async fn product(&self, id: &str) -> Result<RemoteProduct, ApiError> {
        let path = format!("/products/{}", path_id(id)?);
        let envelope: Envelope<RemoteProduct> = self.get(&path, Vec::new()).await?;

        Ok(envelope.data)
    }

    /// `GET /product-categories`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn product_categories(&self) -> Result<Vec<ProductCategory>, ApiError> {
        let envelope: Envelope<Vec<ProductCategory>> =
            self.get("/product-categories", Vec::new()).await?;

        Ok(envelope.data)
    }

    /// `GET /pet-types`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn pet_types(&self) -> Result<Vec<RemotePetType>, ApiError> {
        let envelope: Envelope<Vec<RemotePetType>> = self.get("/pet-types", Vec::new()).await?;

        Ok(envelope.data)
    }

    /// `GET /brands`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn brands(&self) -> Result<Vec<Brand>, ApiError> {
        let envelope: Envelope<Vec<Brand>> = self.get("/brands", Vec::new()).await?;

        Ok(envelope.data)
    }
}
