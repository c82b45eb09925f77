//! Donation endpoints

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiError, Envelope, TokenStore, Transport, path_id};

/// Payment provider that collects a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    /// Stripe
    Stripe,

    /// Razorpay
    Razorpay,
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentProvider::Stripe => f.write_str("stripe"),
            PaymentProvider::Razorpay => f.write_str("razorpay"),
        }
    }
}

/// Donation pledge sent to `POST /donations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    /// Amount in major units
    pub amount: f64,

    /// ISO currency code
    pub currency: String,

    /// Donor name
    pub donor_name: String,

    /// Donor email
    pub donor_email: String,

    /// Note left with the donation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Hide the donor's name on public listings
    pub is_anonymous: bool,
}

/// Donation record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Document id
    #[serde(alias = "_id")]
    pub id: String,

    /// Amount in major units
    pub amount: f64,

    /// ISO currency code
    pub currency: String,

    /// Payment status, e.g. `"pending"`
    #[serde(default)]
    pub status: Option<String>,
}

/// Client-side handle for completing a payment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPaymentIntent")]
pub struct PaymentIntent {
    /// Provider-side intent or order id
    pub id: String,

    /// Stripe client secret
    pub client_secret: Option<String>,
}

/// Providers name the reference differently and some send more than one.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPaymentIntent {
    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    order_id: Option<String>,

    #[serde(default)]
    payment_intent_id: Option<String>,

    #[serde(default)]
    client_secret: Option<String>,
}

impl TryFrom<RawPaymentIntent> for PaymentIntent {
    type Error = &'static str;

    fn try_from(raw: RawPaymentIntent) -> Result<Self, Self::Error> {
        let id = raw
            .order_id
            .or(raw.payment_intent_id)
            .or(raw.id)
            .ok_or("payment intent has no id, orderId or paymentIntentId")?;

        Ok(PaymentIntent {
            id,
            client_secret: raw.client_secret,
        })
    }
}

/// Provider connectivity report
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionReport {
    /// Stripe reachable
    #[serde(default)]
    pub stripe: bool,

    /// Razorpay reachable
    #[serde(default)]
    pub razorpay: bool,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// `POST /donations`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn create_donation(&self, donation: &NewDonation) -> Result<Donation, ApiError> {
        let envelope: Envelope<Donation> =
            self.post("/donations", serde_json::to_value(donation)?).await?;

        Ok(envelope.data)
    }

    /// `POST /donations/{id}/payment-intent`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidId`] for an unusable id, or an [`ApiError`]
    /// if the request fails.
    pub async fn create_payment_intent(
        &self,
        donation_id: &str,
        provider: PaymentProvider,
    ) -> Result<PaymentIntent, ApiError> {
        let path = format!("/donations/{}/payment-intent", path_id(donation_id)?);
        let body = serde_json::json!({ "provider": provider });

        let envelope: Envelope<PaymentIntent> = self.post(&path, body).await?;

        Ok(envelope.data)
    }

    /// `GET /payments/donations/test-connection`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn test_payment_connection(&self) -> Result<ConnectionReport, ApiError> {
        let envelope: Envelope<ConnectionReport> = self
            .get("/payments/donations/test-connection", Vec::new())
            .await?;

        Ok(envelope.data)
    }
}
