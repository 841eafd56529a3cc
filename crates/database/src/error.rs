use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database connection error")]
    ConnectionError(#[source] sqlx::Error),

    #[error("Query mistake | Query: {statement}")]
    Query {
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to store {what} record with id {id} | Query: {statement}")]
    RecordRejected {
        what: &'static str,
        id: i32,
        statement: String,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    pub(crate) fn query(statement: &str, source: sqlx::Error) -> Self {
        DbError::Query {
            statement: one_line(statement),
            source,
        }
    }

    pub(crate) fn record(what: &'static str, id: i32, statement: &str, source: sqlx::Error) -> Self {
        DbError::RecordRejected {
            what,
            id,
            statement: one_line(statement),
            source,
        }
    }

    /// True when the store refused a row because of a foreign-key violation.
    pub fn is_foreign_key_violation(&self) -> bool {
        let source = match self {
            DbError::Query { source, .. } | DbError::RecordRejected { source, .. } => source,
            _ => return false,
        };
        matches!(
            source.as_database_error().map(|e| e.kind()),
            Some(sqlx::error::ErrorKind::ForeignKeyViolation)
        )
    }
}

/// Collapses a multi-line SQL statement so errors stay on a single line.
fn one_line(statement: &str) -> String {
    statement.split_whitespace().collect::<Vec<_>>().join(" ")
}
