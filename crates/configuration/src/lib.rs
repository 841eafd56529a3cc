use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    DatabaseSettings, InputSettings, LoggingSettings, OutputFormat, OutputSettings, Settings,
};

/// The optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment overrides, e.g. `ROOMSTAT__DATABASE__PORT=5432`.
pub const ENV_PREFIX: &str = "ROOMSTAT";

/// Loads the application configuration from defaults, `config.toml` and the environment.
///
/// This function is the primary entry point for this crate. A missing
/// `config.toml` is not an error; every field has a built-in default.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Same as [`load_config`] but reads the file layer from `path`.
pub fn load_config_from(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5433_i64)?
        .set_default("database.database", "mydatabase")?
        .set_default("database.user", "postgres")?
        .set_default("database.password", "secret")?
        .set_default("database.acquire_timeout_secs", 5_i64)?
        .set_default("input.rooms_file", "data/rooms.json")?
        .set_default("input.students_file", "data/students.json")?
        .set_default("output.directory", "reports")?
        .set_default("logging.filter", "warn")?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let mut settings = builder.try_deserialize::<Settings>()?;

    // The conventional sqlx/libpq variable takes precedence over the discrete fields.
    if let Ok(url) = std::env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            tracing::debug!("Using DATABASE_URL from the environment.");
            settings.database.url = Some(url);
        }
    }

    settings.validate()?;
    Ok(settings)
}
