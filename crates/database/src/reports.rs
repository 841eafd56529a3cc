use crate::DbError;
use crate::repository::DbRepository;
use chrono::NaiveDate;
use core_types::{
    MixedSexRoom, ReportKind, ReportTable, RoomAgeDifference, RoomAverageAge, RoomStudentCount,
};

/// How many rooms the two ranking reports return.
pub const TOP_ROOMS: i64 = 5;

pub const ROOMS_WITH_STUDENT_COUNT: &str = r#"
    SELECT
        r.id AS room_id,
        r.name AS room_name,
        COUNT(s.id) AS student_count
    FROM
        rooms r
    LEFT JOIN
        students s ON r.id = s.room
    GROUP BY
        r.id, r.name
    ORDER BY
        r.id
"#;

// `$1` is the reference date; NULL means the store's CURRENT_DATE.
pub const ROOMS_WITH_MIN_AVG_AGE: &str = r#"
    SELECT
        r.id AS room_id,
        r.name AS room_name,
        AVG(EXTRACT(YEAR FROM AGE(COALESCE($1::date, CURRENT_DATE)::timestamp, s.birthday::timestamp)))::numeric(5,2) AS avg_age
    FROM
        rooms r
    JOIN
        students s ON r.id = s.room
    GROUP BY
        r.id, r.name
    HAVING
        COUNT(s.id) > 0
    ORDER BY
        avg_age ASC, r.id ASC
    LIMIT $2
"#;

pub const ROOMS_WITH_MAX_AGE_DIFFERENCE: &str = r#"
    SELECT
        r.id AS room_id,
        r.name AS room_name,
        (MAX(EXTRACT(YEAR FROM AGE(COALESCE($1::date, CURRENT_DATE)::timestamp, s.birthday::timestamp)))
            - MIN(EXTRACT(YEAR FROM AGE(COALESCE($1::date, CURRENT_DATE)::timestamp, s.birthday::timestamp))))::numeric(5,2) AS age_difference
    FROM
        rooms r
    JOIN
        students s ON r.id = s.room
    GROUP BY
        r.id, r.name
    HAVING
        COUNT(s.id) > 1
    ORDER BY
        age_difference DESC, r.id ASC
    LIMIT $2
"#;

pub const ROOMS_WITH_MIXED_SEX: &str = r#"
    SELECT
        r.id AS room_id,
        r.name AS room_name
    FROM
        rooms r
    JOIN
        students s ON r.id = s.room
    GROUP BY
        r.id, r.name
    HAVING
        COUNT(DISTINCT s.sex) > 1
    ORDER BY
        r.id
"#;

/// Runs the four read-only aggregate reports.
///
/// Ages are whole years computed by PostgreSQL (`EXTRACT(YEAR FROM AGE(..))`)
/// relative to the reference date: the store's `CURRENT_DATE` unless pinned
/// with [`ReportEngine::as_of`].
#[derive(Debug, Clone, Copy)]
pub struct ReportEngine<'a> {
    repo: &'a DbRepository,
    as_of: Option<NaiveDate>,
}

impl<'a> ReportEngine<'a> {
    pub fn new(repo: &'a DbRepository) -> Self {
        Self { repo, as_of: None }
    }

    /// Pins the date ages are computed against.
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Every room with the number of students assigned to it, including empty rooms.
    pub async fn rooms_with_student_count(&self) -> Result<Vec<RoomStudentCount>, DbError> {
        sqlx::query_as::<_, RoomStudentCount>(ROOMS_WITH_STUDENT_COUNT)
            .fetch_all(self.repo.pool())
            .await
            .map_err(|e| DbError::query(ROOMS_WITH_STUDENT_COUNT, e))
    }

    /// The five occupied rooms with the lowest average student age.
    pub async fn rooms_with_min_avg_age(&self) -> Result<Vec<RoomAverageAge>, DbError> {
        sqlx::query_as::<_, RoomAverageAge>(ROOMS_WITH_MIN_AVG_AGE)
            .bind(self.as_of)
            .bind(TOP_ROOMS)
            .fetch_all(self.repo.pool())
            .await
            .map_err(|e| DbError::query(ROOMS_WITH_MIN_AVG_AGE, e))
    }

    /// The five rooms (of those with two or more students) with the widest age spread.
    pub async fn rooms_with_max_age_difference(&self) -> Result<Vec<RoomAgeDifference>, DbError> {
        sqlx::query_as::<_, RoomAgeDifference>(ROOMS_WITH_MAX_AGE_DIFFERENCE)
            .bind(self.as_of)
            .bind(TOP_ROOMS)
            .fetch_all(self.repo.pool())
            .await
            .map_err(|e| DbError::query(ROOMS_WITH_MAX_AGE_DIFFERENCE, e))
    }

    /// Rooms housing students of more than one sex.
    pub async fn rooms_with_mixed_sex(&self) -> Result<Vec<MixedSexRoom>, DbError> {
        sqlx::query_as::<_, MixedSexRoom>(ROOMS_WITH_MIXED_SEX)
            .fetch_all(self.repo.pool())
            .await
            .map_err(|e| DbError::query(ROOMS_WITH_MIXED_SEX, e))
    }

    /// Runs one report and returns it in tabular form for the formatter.
    pub async fn run(&self, kind: ReportKind) -> Result<ReportTable, DbError> {
        let table = match kind {
            ReportKind::StudentCount => ReportTable::from_rows(self.rooms_with_student_count().await?),
            ReportKind::MinAverageAge => ReportTable::from_rows(self.rooms_with_min_avg_age().await?),
            ReportKind::MaxAgeDifference => {
                ReportTable::from_rows(self.rooms_with_max_age_difference().await?)
            }
            ReportKind::MixedSex => ReportTable::from_rows(self.rooms_with_mixed_sex().await?),
        };
        tracing::info!(report = kind.file_stem(), rows = table.len(), "Report computed.");
        Ok(table)
    }
}
