use crate::DbError;
use crate::reports::ReportEngine;
use core_types::{Room, Student};
use sqlx::postgres::{PgConnection, PgPool};
use sqlx::Row;

pub const UPSERT_ROOM: &str = r#"
    INSERT INTO rooms (id, name)
    VALUES ($1, $2)
    ON CONFLICT (id) DO UPDATE SET
        name = EXCLUDED.name
"#;

pub const UPSERT_STUDENT: &str = r#"
    INSERT INTO students (id, name, birthday, room, sex)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (id) DO UPDATE SET
        name = EXCLUDED.name,
        birthday = EXCLUDED.birthday,
        room = EXCLUDED.room,
        sex = EXCLUDED.sex
"#;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// How many records a load wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub rooms: usize,
    pub students: usize,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The report queries, evaluated against the store's current date.
    pub fn reports(&self) -> ReportEngine<'_> {
        ReportEngine::new(self)
    }

    /// Upserts all rooms, then all students, within a single transaction.
    ///
    /// Rooms must land first: `students.room` is a foreign key. If any record
    /// is rejected the whole load is rolled back and the error names the record.
    pub async fn load(&self, rooms: &[Room], students: &[Student]) -> Result<LoadSummary, DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::query("BEGIN", e))?;

        upsert_rooms(&mut tx, rooms).await?;
        upsert_students(&mut tx, students).await?;

        tx.commit().await.map_err(|e| DbError::query("COMMIT", e))?;

        let summary = LoadSummary {
            rooms: rooms.len(),
            students: students.len(),
        };
        tracing::info!(rooms = summary.rooms, students = summary.students, "Data loaded.");
        Ok(summary)
    }

    /// Fetches every room ordered by id.
    pub async fn get_rooms(&self) -> Result<Vec<Room>, DbError> {
        const SQL: &str = "SELECT id, name FROM rooms ORDER BY id";
        let rows = sqlx::query(SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DbError::query(SQL, e))?;

        rows.into_iter()
            .map(|row| -> Result<Room, sqlx::Error> {
                Ok(Room {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(|e| DbError::query(SQL, e))
    }

    /// Fetches every student ordered by id.
    pub async fn get_students(&self) -> Result<Vec<Student>, DbError> {
        const SQL: &str = "SELECT id, name, birthday, room, sex FROM students ORDER BY id";
        let rows = sqlx::query(SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DbError::query(SQL, e))?;

        rows.into_iter()
            .map(|row| -> Result<Student, sqlx::Error> {
                let sex: Option<String> = row.try_get("sex")?;
                Ok(Student {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    birthday: row.try_get("birthday")?,
                    room: row.try_get("room")?,
                    sex: sex.and_then(|s| s.chars().next()).unwrap_or(' '),
                })
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(|e| DbError::query(SQL, e))
    }
}

async fn upsert_rooms(conn: &mut PgConnection, rooms: &[Room]) -> Result<(), DbError> {
    for room in rooms {
        sqlx::query(UPSERT_ROOM)
            .bind(room.id)
            .bind(&room.name)
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::record("rooms", room.id, UPSERT_ROOM, e))?;
    }
    tracing::debug!(count = rooms.len(), "Rooms upserted.");
    Ok(())
}

async fn upsert_students(conn: &mut PgConnection, students: &[Student]) -> Result<(), DbError> {
    for student in students {
        sqlx::query(UPSERT_STUDENT)
            .bind(student.id)
            .bind(&student.name)
            .bind(student.birthday)
            .bind(student.room)
            .bind(student.sex_code())
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::record("students", student.id, UPSERT_STUDENT, e))?;
    }
    tracing::debug!(count = students.len(), "Students upserted.");
    Ok(())
}
