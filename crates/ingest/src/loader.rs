use core_types::{Room, Student};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IngestError;
use crate::records::{RoomRecord, StudentRecord};

/// Both input collections, validated and ready to be upserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub rooms: Vec<Room>,
    pub students: Vec<Student>,
}

/// Reads the rooms and students JSON documents from disk.
#[derive(Debug, Clone)]
pub struct JsonDataLoader {
    rooms_path: PathBuf,
    students_path: PathBuf,
}

impl JsonDataLoader {
    /// Fails with [`IngestError::NotFound`] if either file is missing.
    /// The students path is checked first.
    pub fn new(
        rooms_path: impl Into<PathBuf>,
        students_path: impl Into<PathBuf>,
    ) -> Result<Self, IngestError> {
        let rooms_path = rooms_path.into();
        let students_path = students_path.into();

        for path in [&students_path, &rooms_path] {
            if !path.exists() {
                return Err(IngestError::NotFound(path.clone()));
            }
        }

        Ok(Self { rooms_path, students_path })
    }

    pub fn rooms_path(&self) -> &Path {
        &self.rooms_path
    }

    pub fn students_path(&self) -> &Path {
        &self.students_path
    }

    pub fn load_rooms(&self) -> Result<Vec<Room>, IngestError> {
        let raw = read_document(&self.rooms_path, "rooms")?;
        parse_rooms(&raw)
    }

    pub fn load_students(&self) -> Result<Vec<Student>, IngestError> {
        let raw = read_document(&self.students_path, "students")?;
        parse_students(&raw)
    }

    /// Loads and validates both documents. Nothing is returned unless every record is valid.
    pub fn load(&self) -> Result<Dataset, IngestError> {
        let rooms = self.load_rooms()?;
        let students = self.load_students()?;
        tracing::info!(
            rooms = rooms.len(),
            students = students.len(),
            "Loaded input documents."
        );
        Ok(Dataset { rooms, students })
    }
}

/// Parses a rooms document: a JSON array of `{id, name}` objects.
pub fn parse_rooms(json: &str) -> Result<Vec<Room>, IngestError> {
    let records: Vec<RoomRecord> = decode_records(json, "rooms")?;
    Ok(records
        .into_iter()
        .map(|r| Room { id: r.id, name: r.name })
        .collect())
}

/// Parses a students document: a JSON array of `{id, name, birthday, room, sex}` objects.
pub fn parse_students(json: &str) -> Result<Vec<Student>, IngestError> {
    let records: Vec<StudentRecord> = decode_records(json, "students")?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, r)| {
            Student::new(r.id, r.name, &r.birthday, r.room, r.sex).map_err(|e| {
                IngestError::InvalidRecord {
                    what: "students",
                    index,
                    id: Some(r.id.into()),
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}

fn read_document(path: &Path, what: &'static str) -> Result<String, IngestError> {
    fs::read_to_string(path).map_err(|source| IngestError::Io {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes the top-level array first so a bad record can be reported by position and id.
fn decode_records<T: DeserializeOwned>(
    json: &str,
    what: &'static str,
) -> Result<Vec<T>, IngestError> {
    let values: Vec<Value> =
        serde_json::from_str(json).map_err(|source| IngestError::Parse { what, source })?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let id = value.get("id").and_then(Value::as_i64);
            serde_json::from_value(value).map_err(|e| IngestError::InvalidRecord {
                what,
                index,
                id,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn json_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const ROOMS: &str = r#"[{"id": 1, "name": "Red"}, {"id": 2, "name": "Blue"}]"#;
    const STUDENTS: &str = r#"[
        {"id": 1, "name": "A", "birthday": "2000-05-01T00:00:00.000000", "room": 1, "sex": "M"},
        {"id": 2, "name": "B", "birthday": "2000-05-01", "room": 1, "sex": "F"}
    ]"#;

    #[test]
    fn loads_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let rooms = json_file(&dir, "rooms.json", ROOMS);
        let students = json_file(&dir, "students.json", STUDENTS);

        let dataset = JsonDataLoader::new(rooms, students).unwrap().load().unwrap();

        assert_eq!(
            dataset.rooms,
            vec![
                Room { id: 1, name: "Red".into() },
                Room { id: 2, name: "Blue".into() }
            ]
        );
        assert_eq!(dataset.students.len(), 2);
        let may_first = NaiveDate::from_ymd_opt(2000, 5, 1).unwrap();
        assert!(dataset.students.iter().all(|s| s.birthday == may_first));
        assert_eq!(dataset.students[1].sex, 'F');
        assert_eq!(dataset.students[0].room, Some(1));
    }

    #[test]
    fn missing_students_file_is_reported_first() {
        let dir = tempfile::tempdir().unwrap();
        let missing_rooms = dir.path().join("rooms.json");
        let missing_students = dir.path().join("students.json");

        let err = JsonDataLoader::new(&missing_rooms, &missing_students).unwrap_err();
        assert!(matches!(&err, IngestError::NotFound(p) if p == &missing_students));
        assert!(err.to_string().ends_with("does not exist"));
    }

    #[test]
    fn missing_rooms_file() {
        let dir = tempfile::tempdir().unwrap();
        let students = json_file(&dir, "students.json", STUDENTS);
        let missing_rooms = dir.path().join("rooms.json");

        let err = JsonDataLoader::new(&missing_rooms, students).unwrap_err();
        assert!(matches!(&err, IngestError::NotFound(p) if p == &missing_rooms));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let rooms = json_file(&dir, "rooms.json", "[{\"id\": 1,");
        let students = json_file(&dir, "students.json", STUDENTS);

        let err = JsonDataLoader::new(rooms, students).unwrap().load().unwrap_err();
        assert!(matches!(err, IngestError::Parse { what: "rooms", .. }), "got {err:?}");
        assert!(err.to_string().starts_with("Parsing of rooms data failed"));
    }

    #[test]
    fn top_level_object_is_a_parse_error() {
        let err = parse_rooms(r#"{"id": 1, "name": "Red"}"#).unwrap_err();
        assert!(matches!(err, IngestError::Parse { .. }));
    }

    #[test]
    fn missing_field_names_the_record() {
        let err = parse_students(
            r#"[
                {"id": 1, "name": "A", "birthday": "2000-05-01", "room": 1, "sex": "M"},
                {"id": 42, "name": "B", "room": 1, "sex": "F"}
            ]"#,
        )
        .unwrap_err();

        match &err {
            IngestError::InvalidRecord { what, index, id, reason } => {
                assert_eq!(*what, "students");
                assert_eq!(*index, 1);
                assert_eq!(*id, Some(42));
                assert!(reason.contains("birthday"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("index 1 (id 42)"));
    }

    #[test]
    fn invalid_birthday_names_the_record() {
        let err = parse_students(
            r#"[{"id": 5, "name": "C", "birthday": "2000-02-31", "room": 1, "sex": "M"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::InvalidRecord { id: Some(5), index: 0, .. }));
        assert!(err.to_string().contains("2000-02-31"));
    }

    #[test]
    fn sex_must_be_a_single_character() {
        let err = parse_students(
            r#"[{"id": 6, "name": "D", "birthday": "2000-01-01", "room": 1, "sex": "MF"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::InvalidRecord { id: Some(6), .. }));
    }

    #[test]
    fn room_may_be_null_or_absent() {
        let students = parse_students(
            r#"[
                {"id": 1, "name": "A", "birthday": "2000-01-01", "room": null, "sex": "M"},
                {"id": 2, "name": "B", "birthday": "2000-01-01", "sex": "F"}
            ]"#,
        )
        .unwrap();
        assert!(students.iter().all(|s| s.room.is_none()));
    }

    #[test]
    fn non_ascii_names_survive() {
        let rooms = parse_rooms(r#"[{"id": 3, "name": "Комната №3"}]"#).unwrap();
        assert_eq!(rooms[0].name, "Комната №3");
    }
}
