use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub input: InputSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

/// Connection parameters for the PostgreSQL store.
#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// A full connection URL. When present it wins over the discrete fields above.
    #[serde(default)]
    pub url: Option<String>,
    /// How long to wait for the single store connection before giving up.
    pub acquire_timeout_secs: u64,
}

// Hand-written so the password and URL never end up in logs.
impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("url", &self.url.as_ref().map(|_| "***"))
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// Default locations of the two JSON input documents.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    pub rooms_file: PathBuf,
    pub students_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Directory the four report files are written into.
    pub directory: PathBuf,
    /// When set, the interactive format prompt is skipped.
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Optional directory for daily rolling log files.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// The file format the reports are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Xml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }

    /// Maps an answer of the interactive prompt ("1" or "2") to a format.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(OutputFormat::Json),
            "2" => Some(OutputFormat::Xml),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let db = &self.database;
        if db.url.is_none() {
            if db.host.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "database.host must not be empty".to_string(),
                ));
            }
            if db.port == 0 {
                return Err(ConfigError::ValidationError(
                    "database.port must be between 1 and 65535".to_string(),
                ));
            }
            if db.database.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "database.database must not be empty".to_string(),
                ));
            }
        }
        if db.acquire_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "database.acquire_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.output.directory.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
