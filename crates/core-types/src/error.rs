use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid birthday '{0}': expected an ISO-8601 date (YYYY-MM-DD) or date-time")]
    InvalidBirthday(String),
}
