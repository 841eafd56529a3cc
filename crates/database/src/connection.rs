use crate::error::DbError;
use crate::repository::DbRepository;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// The store handle for one run.
///
/// Wraps a pool capped at a single connection: the run is strictly sequential,
/// so one connection is acquired up front and released by [`Database::close`].
/// Callers must call `close` on every exit path.
#[derive(Debug)]
pub struct Database {
    pool: PgPool,
}

/// Establishes the connection to the PostgreSQL database.
///
/// `settings.url` wins over the discrete host/port/user fields when present.
pub async fn connect(settings: &DatabaseSettings) -> Result<Database, DbError> {
    let options = connect_options(settings)?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(options)
        .await
        .map_err(DbError::ConnectionError)?;

    tracing::info!("Connected to the database.");
    Ok(Database { pool })
}

/// Builds the connection options without touching the network.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, DbError> {
    match &settings.url {
        Some(url) => PgConnectOptions::from_str(url)
            .map_err(|e| DbError::ConnectionConfigError(e.to_string())),
        None => Ok(PgConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .database(&settings.database)
            .username(&settings.user)
            .password(&settings.password)),
    }
}

impl Database {
    /// Wraps an existing pool, e.g. one handed out by `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn repository(&self) -> DbRepository {
        DbRepository::new(self.pool.clone())
    }

    /// Closes the connection. Waits for any checked-out connection to be returned first.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("Database connection closed.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: Option<&str>) -> DatabaseSettings {
        DatabaseSettings {
            host: "db.internal".to_string(),
            port: 6543,
            database: "dorms".to_string(),
            user: "warden".to_string(),
            password: "hunter2".to_string(),
            url: url.map(str::to_string),
            acquire_timeout_secs: 5,
        }
    }

    #[test]
    fn discrete_fields_build_options() {
        let options = connect_options(&settings(None)).unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("dorms"));
        assert_eq!(options.get_username(), "warden");
    }

    #[test]
    fn url_wins_over_fields() {
        let options =
            connect_options(&settings(Some("postgres://alice:pw@pg.example:5439/campus"))).unwrap();
        assert_eq!(options.get_host(), "pg.example");
        assert_eq!(options.get_port(), 5439);
        assert_eq!(options.get_database(), Some("campus"));
        assert_eq!(options.get_username(), "alice");
    }

    #[test]
    fn bad_url_is_a_config_error() {
        let err = connect_options(&settings(Some("not a connection url"))).unwrap_err();
        assert!(matches!(err, DbError::ConnectionConfigError(_)), "got {err:?}");
    }
}
