pub mod age;
pub mod enums;
pub mod error;
pub mod report;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use age::{age_from_birthday, age_from_birthday_on, age_on, parse_birthday};
pub use enums::{Cell, ReportKind};
pub use error::CoreError;
pub use report::{
    MixedSexRoom, ReportRow, ReportTable, RoomAgeDifference, RoomAverageAge, RoomStudentCount,
};
pub use structs::{Room, Student};
