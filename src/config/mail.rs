//! Mail Config

use clap::Args;

/// Outgoing mail settings.
#[derive(Debug, Clone, Args)]
pub struct MailConfig {
    /// SMTP host
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP user
    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,

    /// Sender address
    #[arg(long, env = "EMAIL_FROM", default_value = "noreply@petshop.local")]
    pub email_from: String,
}

impl MailConfig {
    /// Whether SMTP credentials are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.smtp_user.is_some() && self.smtp_pass.is_some()
    }
}
