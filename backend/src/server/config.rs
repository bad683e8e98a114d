//! Runtime configuration, parsed from flags or the environment.

use std::net::SocketAddr;

use clap::Parser;

/// Server configuration. Every flag can also come from the environment.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Food ordering backend")]
pub struct Config {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Socket address to serve on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// Secret used to sign and verify bearer tokens.
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: String,

    /// Bearer token lifetime in seconds.
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = 86_400)]
    pub token_ttl_seconds: i64,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pub db_pool_size: u32,

    /// Mailgun API key; verification mail is logged instead when unset.
    #[arg(long, env = "MAILGUN_API_KEY")]
    pub mailgun_api_key: Option<String>,

    /// Mailgun sending domain.
    #[arg(long, env = "MAILGUN_DOMAIN")]
    pub mailgun_domain: Option<String>,

    /// From address for verification mail.
    #[arg(long, env = "MAILGUN_FROM")]
    pub mailgun_from: Option<String>,
}

/// Complete Mailgun credentials extracted from the configuration.
#[derive(Debug, Clone)]
pub struct MailgunSettings {
    pub api_key: String,
    pub domain: String,
    pub from: String,
}

impl Config {
    /// Mailgun settings when all three values are configured.
    #[must_use]
    pub fn mailgun(&self) -> Option<MailgunSettings> {
        match (
            &self.mailgun_api_key,
            &self.mailgun_domain,
            &self.mailgun_from,
        ) {
            (Some(api_key), Some(domain), Some(from)) => Some(MailgunSettings {
                api_key: api_key.clone(),
                domain: domain.clone(),
                from: from.clone(),
            }),
            _ => None,
        }
    }
}
