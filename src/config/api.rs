//! API Client Config

use std::{path::PathBuf, time::Duration};

use clap::Args;

/// Settings for talking to the storefront API.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the storefront API
    #[arg(long, env = "API_BASE_URL", default_value = "http://localhost:5000/api")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "API_TIMEOUT_SECONDS", default_value_t = 10)]
    pub api_timeout_seconds: u64,

    /// File the bearer token is kept in
    #[arg(long, env = "AUTH_TOKEN_FILE", default_value = ".petshop/token")]
    pub token_file: PathBuf,
}

impl ApiConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }
}
