//! Database and session secrets

use clap::Args;

/// Database URI used when none is configured.
pub const DEV_DATABASE_URI: &str = "mongodb://localhost:27017/petshop";

/// JWT signing secret used when none is configured.
pub const DEV_JWT_SECRET: &str = "dev-jwt-secret-change-me";

/// Session secret used when none is configured.
pub const DEV_SESSION_SECRET: &str = "dev-session-secret-change-me";

/// Database and token signing settings.
#[derive(Debug, Clone, Args)]
pub struct AuthConfig {
    /// `MongoDB` connection string
    #[arg(long, env = "MONGODB_URI", default_value = DEV_DATABASE_URI, hide_env_values = true)]
    pub database_uri: String,

    /// JWT signing secret
    #[arg(long, env = "JWT_SECRET", default_value = DEV_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// JWT lifetime, e.g. `7d`
    #[arg(long, env = "JWT_EXPIRES_IN", default_value = "7d")]
    pub jwt_expires_in: String,

    /// Session cookie secret
    #[arg(long, env = "SESSION_SECRET", default_value = DEV_SESSION_SECRET, hide_env_values = true)]
    pub session_secret: String,
}
