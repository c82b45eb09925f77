//! Environment configuration
//!
//! Every setting comes from an environment variable (a `.env` file is loaded
//! first when present) and has a development fallback. [`AppConfig::validate`]
//! refuses to run production on missing credentials or fallback secrets.

use std::fmt;

use clap::Parser;
use thiserror::Error;
use tracing::warn;

use crate::config::{
    api::ApiConfig,
    auth::{AuthConfig, DEV_DATABASE_URI, DEV_JWT_SECRET, DEV_SESSION_SECRET},
    mail::MailConfig,
    observability::LoggingConfig,
    payments::{FeatureFlags, PaymentsConfig, is_set},
    server::ServerConfig,
};

pub mod api;
pub mod auth;
pub mod mail;
pub mod observability;
pub mod payments;
pub mod server;

pub use observability::LogFormat;

/// Deployment environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Environment {
    /// Local development; configuration gaps are warnings.
    #[default]
    Development,

    /// Production; configuration gaps are fatal.
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// A single configuration gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
    /// The variable is not set.
    Missing(&'static str),

    /// The variable still holds its development fallback.
    DevelopmentFallback(&'static str),
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::Missing(name) => write!(f, "{name} is not set"),
            ConfigIssue::DevelopmentFallback(name) => {
                write!(f, "{name} uses the development fallback")
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variables or arguments could not be parsed.
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// Production configuration has gaps.
    #[error("invalid production configuration: {}", join(.0))]
    Insecure(Vec<ConfigIssue>),
}

fn join(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Petshop configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "petshop", about = "Petshop configuration", long_about = None)]
pub struct AppConfig {
    /// Deployment environment
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// HTTP server settings.
    #[command(flatten)]
    pub server: ServerConfig,

    /// Database and secret settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Mail settings.
    #[command(flatten)]
    pub mail: MailConfig,

    /// Payment provider keys.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Feature toggles.
    #[command(flatten)]
    pub features: FeatureFlags,

    /// API client settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the environment alone, ignoring process arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Ok(Self::try_parse_from(["petshop"])?)
    }

    /// Whether this is a production deployment.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Every gap between this configuration and a deployable one.
    #[must_use]
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        fallback(&mut issues, "MONGODB_URI", &self.auth.database_uri, DEV_DATABASE_URI);
        fallback(&mut issues, "JWT_SECRET", &self.auth.jwt_secret, DEV_JWT_SECRET);
        fallback(&mut issues, "SESSION_SECRET", &self.auth.session_secret, DEV_SESSION_SECRET);

        missing(&mut issues, "SMTP_USER", self.mail.smtp_user.as_ref());
        missing(&mut issues, "SMTP_PASS", self.mail.smtp_pass.as_ref());

        if self.features.donations
            && !self.payments.stripe_ready()
            && !self.payments.razorpay_ready()
        {
            missing(&mut issues, "STRIPE_SECRET_KEY", self.payments.stripe_secret_key.as_ref());
            missing(&mut issues, "RAZORPAY_KEY_ID", self.payments.razorpay_key_id.as_ref());
            missing(
                &mut issues,
                "RAZORPAY_KEY_SECRET",
                self.payments.razorpay_key_secret.as_ref(),
            );
        }

        issues
    }

    /// Check the configuration is usable.
    ///
    /// In development each gap is logged as a warning and `Ok` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Insecure`] when a production configuration has gaps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let issues = self.issues();

        if issues.is_empty() {
            return Ok(());
        }

        if self.is_production() {
            return Err(ConfigError::Insecure(issues));
        }

        for issue in &issues {
            warn!(environment = %self.environment, %issue, "configuration gap");
        }

        Ok(())
    }
}

fn fallback(issues: &mut Vec<ConfigIssue>, name: &'static str, value: &str, dev: &str) {
    if value.trim().is_empty() {
        issues.push(ConfigIssue::Missing(name));
    } else if value == dev {
        issues.push(ConfigIssue::DevelopmentFallback(name));
    }
}

fn missing(issues: &mut Vec<ConfigIssue>, name: &'static str, value: Option<&String>) {
    if !is_set(value) {
        issues.push(ConfigIssue::Missing(name));
    }
}
