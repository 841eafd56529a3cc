use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A dormitory room. The `id` is assigned by the source data, never by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: i32,
    pub name: String,
}

/// A student as stored in the `students` table.
///
/// `birthday` is already truncated to its date component and `room` may be
/// `None` for students without an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub birthday: NaiveDate,
    pub room: Option<i32>,
    pub sex: char,
}

impl Student {
    /// Builds a student from raw field values, parsing and truncating the birthday.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        birthday: &str,
        room: Option<i32>,
        sex: char,
    ) -> Result<Self, CoreError> {
        if sex.is_whitespace() || sex.is_control() {
            return Err(CoreError::InvalidInput(
                "sex".to_string(),
                format!("{sex:?} is not a printable character"),
            ));
        }

        Ok(Self {
            id,
            name: name.into(),
            birthday: crate::age::parse_birthday(birthday)?,
            room,
            sex,
        })
    }

    /// The `sex` column is `CHAR(1)`; sqlx has no `char` encoding for it.
    pub fn sex_code(&self) -> String {
        self.sex.to_string()
    }
}
