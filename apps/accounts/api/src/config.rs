use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_users::PasswordHashConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub password_hash: PasswordHashConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let server = ServerConfig::from_env()?;
        let password_hash = password_hash_from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            password_hash,
        })
    }
}

/// `ARGON2_MEMORY_KIB`, `ARGON2_ITERATIONS` and `ARGON2_PARALLELISM`,
/// each falling back to the Argon2id defaults.
fn password_hash_from_env() -> Result<PasswordHashConfig, core_config::ConfigError> {
    let defaults = PasswordHashConfig::default();

    Ok(PasswordHashConfig {
        memory_kib: env_parse_or_default("ARGON2_MEMORY_KIB", defaults.memory_kib)?,
        iterations: env_parse_or_default("ARGON2_ITERATIONS", defaults.iterations)?,
        parallelism: env_parse_or_default("ARGON2_PARALLELISM", defaults.parallelism)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/accounts")),
                ("APP_ENV", None),
                ("PORT", None),
                ("ARGON2_MEMORY_KIB", None),
                ("ARGON2_ITERATIONS", None),
                ("ARGON2_PARALLELISM", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "accounts_api");
                assert_eq!(config.database.url, "postgresql://localhost/accounts");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.password_hash, PasswordHashConfig::default());
            },
        );
    }

    #[test]
    fn test_password_hash_overrides() {
        temp_env::with_vars(
            [
                ("ARGON2_MEMORY_KIB", Some("65536")),
                ("ARGON2_ITERATIONS", Some("3")),
                ("ARGON2_PARALLELISM", Some("4")),
            ],
            || {
                let config = password_hash_from_env().unwrap();
                assert_eq!(config.memory_kib, 65536);
                assert_eq!(config.iterations, 3);
                assert_eq!(config.parallelism, 4);
            },
        );
    }

    #[test]
    fn test_password_hash_rejects_garbage() {
        temp_env::with_var("ARGON2_ITERATIONS", Some("lots"), || {
            assert!(password_hash_from_env().is_err());
        });
    }
}
