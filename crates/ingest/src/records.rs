use serde::Deserialize;

/// A room exactly as it appears in the rooms document.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomRecord {
    pub id: i32,
    pub name: String,
}

/// A student exactly as it appears in the students document.
///
/// `birthday` stays a string here; it may carry a time-of-day suffix that is
/// dropped when the record is converted into a `core_types::Student`.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRecord {
    pub id: i32,
    pub name: String,
    pub birthday: String,
    #[serde(default)]
    pub room: Option<i32>,
    pub sex: char,
}
