//! Food endpoints

use serde::Deserialize;

use crate::client::{
    ApiClient, ApiError, Envelope, ListParams, Page, TokenStore, Transport, path_id,
};

/// Food listing as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    /// Document id
    #[serde(alias = "_id")]
    pub id: String,

    /// Name
    pub name: String,

    /// Brand
    #[serde(default)]
    pub brand: Option<String>,

    /// Category
    #[serde(default)]
    pub category: Option<String>,

    /// Pet type the food is for
    #[serde(default)]
    pub pet_type: Option<String>,

    /// Price
    pub price: f64,

    /// Price before any sale
    #[serde(default)]
    pub original_price: Option<f64>,

    /// Average rating
    #[serde(default)]
    pub rating: Option<f64>,

    /// Review count
    #[serde(default)]
    pub reviews: Option<u32>,

    /// Whether the food is in stock
    #[serde(default = "in_stock")]
    pub in_stock: bool,

    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
}

fn in_stock() -> bool {
    true
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// `GET /foods`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn list_foods(&self, params: &ListParams) -> Result<Page<Food>, ApiError> {
        let envelope: Envelope<Vec<Food>> = self.get("/foods", params.to_query()).await?;

        Ok(envelope.into())
    }

    /// `GET /foods/featured`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn featured_foods(&self, limit: Option<u32>) -> Result<Vec<Food>, ApiError> {
        let query = limit
            .map(|limit| vec![("limit".to_string(), limit.to_string())])
            .unwrap_or_default();

        let envelope: Envelope<Vec<Food>> = self.get("/foods/featured", query).await?;

        Ok(envelope.data)
    }

    /// `GET /foods/deal-of-the-day`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn deal_of_the_day(&self) -> Result<Food, ApiError> {
        let envelope: Envelope<Food> = self.get("/foods/deal-of-the-day", Vec::new()).await?;

        Ok(envelope.data)
    }

    /// `GET /foods/search?q=`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn search_foods(
        &self,
        term: &str,
        params: &ListParams,
    ) -> Result<Page<Food>, ApiError> {
        let mut query = vec![("q".to_string(), term.to_string())];

        query.extend(params.to_query());

        let envelope: Envelope<Vec<Food>> = self.get("/foods/search", query).await?;

        Ok(envelope.into())
    }

    /// `GET /foods/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidId`] for an unusable id, or an [`ApiError`]
    /// if the request fails.
    pub async fn food(&self, id: &str) -> Result<Food, ApiError> {
        let path = format!("/foods/{}", path_id(id)?);
        let envelope: Envelope<Food> = self.get(&path, Vec::new()).await?;

        Ok(envelope.data)
    }

    /// `GET /foods/categories`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn food_categories(&self) -> Result<Vec<String>, ApiError> {
        let envelope: Envelope<Vec<String>> = self.get("/foods/categories", Vec::new()).await?;

        Ok(envelope.data)
    }

    /// `GET /foods/brands`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn food_brands(&self) -> Result<Vec<String>, ApiError> {
        let envelope: Envelope<Vec<String>> = self.get("/foods/brands", Vec::new()).await?;

        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::client::{ApiResponse, MockTransport, TokenStore, test_support::*};

    use super::*;

    const FOODS: &str = r#"{
        "success": true,
        "data": [
            {
                "_id": "f1",
                "name": "Salmon Kibble",
                "brand": "Acana",
                "price": 45.99,
                "rating": 4.7
            },
            { "_id": "f2", "name": "Tuna Pate", "price": 2.49, "inStock": false }
        ],
        "pagination": { "page": 1, "limit": 12, "total": 2, "pages": 1 }
    }"#;

    #[tokio::test]
    async fn list_foods_forwards_params_and_unwraps_page() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request| {
                request.url == "http://api.test/api/foods"
                    && request.query
                        == vec![
                            ("limit".to_string(), "12".to_string()),
                            ("petType".to_string(), "dog".to_string()),
                        ]
            })
            .returning(|_| ok(FOODS));

        let params = ListParams {
            limit: Some(12),
            pet_type: Some("dog".to_string()),
            ..ListParams::default()
        };

        let page = client(transport).list_foods(&params).await?;

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items.first().map(|food| food.id.as_str()), Some("f1"));
        assert_eq!(page.items.get(1).map(|food| food.in_stock), Some(false));
        assert_eq!(page.pagination.map(|pagination| pagination.total), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn search_foods_sends_term_first() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request| {
                request.url == "http://api.test/api/foods/search"
                    && request.query.first() == Some(&("q".to_string(), "grain free".to_string()))
            })
            .returning(|_| ok(FOODS));

        let page = client(transport)
            .search_foods("grain free", &ListParams::default())
            .await?;

        assert_eq!(page.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn food_by_id_builds_path() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request| request.url == "http://api.test/api/foods/f1")
            .returning(|_| {
                ok(r#"{"success":true,"data":{"_id":"f1","name":"Salmon Kibble","price":45.99}}"#)
            });

        let food = client(transport).food("f1").await?;

        assert_eq!(food.name, "Salmon Kibble");

        Ok(())
    }

    #[tokio::test]
    async fn food_by_invalid_id_never_sends() {
        let mut transport = MockTransport::new();

        transport.expect_send().never();

        let result = client(transport).food("a/b").await;

        assert!(matches!(result, Err(ApiError::InvalidId(_))));
    }

    #[tokio::test]
    async fn facets_unwrap_string_lists() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .times(2)
            .returning(|_| ok(r#"{"success":true,"data":["Dry Food","Wet Food"]}"#));

        let client = client(transport);

        assert_eq!(client.food_categories().await?, ["Dry Food", "Wet Food"]);
        assert_eq!(client.food_brands().await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn deal_of_the_day_unauthorized_clears_token() -> TestResult {
        let mut transport = MockTransport::new();

        transport.expect_send().once().returning(|_| {
            Ok(ApiResponse {
                status: 401,
                body: r#"{"error":"jwt expired"}"#.to_string(),
            })
        });

        let client = client(transport);

        client.tokens().set_token("stale")?;

        let result = client.deal_of_the_day().await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
        assert_eq!(client.tokens().token(), None);

        Ok(())
    }
}
