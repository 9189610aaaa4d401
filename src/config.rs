use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::{DatasetError, DatasetResult};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection settings loaded from environment variables.
///
/// | Env Var                    | Default   |
/// |----------------------------|-----------|
/// | `DATABASE_URL`             | required  |
/// | `DATABASE_MAX_CONNECTIONS` | `5`       |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Load configuration from the process environment, reading `.env` first
    /// if one is present.
    pub fn from_env() -> DatasetResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> DatasetResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| DatasetError::Config("DATABASE_URL is not set".into()))?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                DatasetError::Config(format!(
                    "DATABASE_MAX_CONNECTIONS must be a positive integer, got {raw:?}"
                ))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            url,
            max_connections,
        })
    }

    /// Create a connection pool for this configuration.
    pub async fn connect(&self) -> DatasetResult<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.url)
            .await?;
        tracing::info!(max_connections = self.max_connections, "connected to database");
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_pool_size_when_unset() {
        let config =
            DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/shop")]))
                .unwrap();
        assert_eq!(config, DatabaseConfig::new("postgres://localhost/shop"));
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn reads_pool_size() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("DATABASE_MAX_CONNECTIONS", " 12 "),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn missing_url_is_a_config_error() {
        let err = DatabaseConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, DatasetError::Config(_)));

        let err = DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, DatasetError::Config(_)));
    }

    #[test]
    fn rejects_bad_pool_size() {
        for raw in ["zero", "0", "-3"] {
            let err = DatabaseConfig::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://localhost/shop"),
                ("DATABASE_MAX_CONNECTIONS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, DatasetError::Config(_)), "accepted {raw}");
        }
    }
}
