//! Payment provider keys

use clap::Args;

/// Payment provider credentials.
#[derive(Debug, Clone, Args)]
pub struct PaymentsConfig {
    /// Stripe secret key
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: Option<String>,

    /// Stripe publishable key
    #[arg(long, env = "STRIPE_PUBLISHABLE_KEY")]
    pub stripe_publishable_key: Option<String>,

    /// Razorpay key id
    #[arg(long, env = "RAZORPAY_KEY_ID")]
    pub razorpay_key_id: Option<String>,

    /// Razorpay key secret
    #[arg(long, env = "RAZORPAY_KEY_SECRET", hide_env_values = true)]
    pub razorpay_key_secret: Option<String>,
}

impl PaymentsConfig {
    /// Whether Stripe can take payments.
    #[must_use]
    pub fn stripe_ready(&self) -> bool {
        is_set(self.stripe_secret_key.as_ref())
    }

    /// Whether Razorpay can take payments.
    #[must_use]
    pub fn razorpay_ready(&self) -> bool {
        is_set(self.razorpay_key_id.as_ref()) && is_set(self.razorpay_key_secret.as_ref())
    }
}

/// Whether an optional setting holds a non-blank value.
pub(crate) fn is_set(value: Option<&String>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

/// Feature toggles.
#[derive(Debug, Clone, Args)]
pub struct FeatureFlags {
    /// Allow new account registration
    #[arg(long, env = "ENABLE_REGISTRATION", default_value_t = true, action = clap::ArgAction::Set)]
    pub registration: bool,

    /// Accept donations
    #[arg(long, env = "ENABLE_DONATIONS", default_value_t = true, action = clap::ArgAction::Set)]
    pub donations: bool,

    /// Offer product subscriptions
    #[arg(
        long,
        env = "ENABLE_SUBSCRIPTIONS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub subscriptions: bool,
}
