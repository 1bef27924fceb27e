use anyhow::{bail, Context, Result};
use chrono::{Duration, TimeDelta};
use sea_orm::{Database, DatabaseConnection};
use std::fmt;
use tracing::{debug, info, warn};

use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://farmconnect.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5001";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 168;
/// Ten years.
pub const MAX_TOKEN_TTL_HOURS: i64 = 87_600;

const DEVELOPMENT_JWT_SECRET: &str = "farmconnect-development-secret-change-me";

/// Token signing and password hashing settings.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Build the auth settings, falling back to a development secret when none is configured.
    ///
    /// The token lifetime must lie in `1..=MAX_TOKEN_TTL_HOURS`.
    pub fn new(jwt_secret: Option<String>, token_ttl_hours: i64, bcrypt_cost: u32) -> Result<Self> {
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            bail!(
                "Token lifetime must be between 1 and {} hours, got {}",
                MAX_TOKEN_TTL_HOURS,
                token_ttl_hours
            );
        }
        let token_ttl = TimeDelta::try_hours(token_ttl_hours)
            .with_context(|| format!("Token lifetime of {} hours is out of range", token_ttl_hours))?;

        let jwt_secret = match jwt_secret.filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("JWT_SECRET not set, using insecure development secret");
                DEVELOPMENT_JWT_SECRET.to_string()
            }
        };

        Ok(Self {
            jwt_secret,
            token_ttl,
            bcrypt_cost,
        })
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Connect to the database behind `database_url`.
pub async fn connect_database(database_url: &str) -> Result<DatabaseConnection> {
    info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;
    debug!("Database connection established");
    Ok(db)
}

/// Initialize application state with a specific database URL
pub async fn initialize_app_state_with_url(database_url: &str, auth: AuthConfig) -> Result<AppState> {
    let db = connect_database(database_url).await?;
    Ok(AppState { db, auth })
}
