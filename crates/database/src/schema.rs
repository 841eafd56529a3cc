//! Idempotent schema management. Every statement uses `IF NOT EXISTS`, so the
//! functions here are safe to run on every start.

use crate::error::DbError;
use sqlx::postgres::PgPool;

pub const CREATE_ROOMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS rooms (
        id INT PRIMARY KEY,
        name VARCHAR(50) NOT NULL
    )
"#;

pub const CREATE_STUDENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id INT PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        birthday DATE,
        room INT,
        sex CHAR(1),
        CONSTRAINT fk_rooms FOREIGN KEY(room) REFERENCES rooms(id)
    )
"#;

/// Secondary indexes backing the grouping and filtering in the report queries.
pub const CREATE_STUDENT_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_students_room ON students (room)",
    "CREATE INDEX IF NOT EXISTS idx_students_sex ON students (sex)",
    "CREATE INDEX IF NOT EXISTS idx_students_birthday ON students (birthday)",
];

/// Creates the `rooms` and `students` tables. `rooms` goes first; `students` references it.
pub async fn create_tables(pool: &PgPool) -> Result<(), DbError> {
    for statement in [CREATE_ROOMS_TABLE, CREATE_STUDENTS_TABLE] {
        execute(pool, statement).await?;
    }
    tracing::info!("Tables are in place.");
    Ok(())
}

/// Adds the secondary indexes on `students`. Run after the load.
pub async fn add_indexes(pool: &PgPool) -> Result<(), DbError> {
    for statement in CREATE_STUDENT_INDEXES {
        execute(pool, statement).await?;
    }
    tracing::info!("Indexes are in place.");
    Ok(())
}

/// Tables and indexes in one call, for callers that do not care about the load order.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DbError> {
    create_tables(pool).await?;
    add_indexes(pool).await
}

async fn execute(pool: &PgPool, statement: &str) -> Result<(), DbError> {
    sqlx::query(statement)
        .execute(pool)
        .await
        .map_err(|e| DbError::query(statement, e))?;
    Ok(())
}
