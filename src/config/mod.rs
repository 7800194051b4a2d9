use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default issuer stamped into and expected from bearer tokens.
pub const DEFAULT_JWT_ISSUER: &str = "ppr-api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    /// PostgreSQL connection string. When absent the registry runs on the
    /// in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_expiration: i64,
    pub request_timeout: u64,
    pub log_format: LogFormat,
    /// Load the TEST0001..TEST0003 registrations at startup.
    pub seed_test_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            max_connections: env::var("MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_JWT_ISSUER.to_string()),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),
            request_timeout: env::var("REQUEST_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            seed_test_data: env::var("SEED_TEST_DATA")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        })
    }

    /// Configuration used by the in-process test client.
    pub fn for_tests() -> Self {
        Config {
            environment: "testing".to_string(),
            port: 0,
            database_url: None,
            max_connections: 1,
            jwt_secret: "ppr-api-test-secret".to_string(),
            jwt_issuer: DEFAULT_JWT_ISSUER.to_string(),
            jwt_expiration: 300,
            request_timeout: 30,
            log_format: LogFormat::Pretty,
            seed_test_data: true,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
