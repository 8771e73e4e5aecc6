//! Shared application state handed to the routers.

use database::postgres::DatabaseConnection;
use domain_users::PasswordHasher;

use crate::config::Config;

/// Cloned into each router; the connection pool and hasher are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    pub hasher: PasswordHasher,
}

impl AppState {
    /// Fails when the configured Argon2 cost parameters are out of range.
    pub fn new(config: Config, db: DatabaseConnection) -> eyre::Result<Self> {
        let hasher = PasswordHasher::new(&config.password_hash)?;
        Ok(Self { config, db, hasher })
    }
}
