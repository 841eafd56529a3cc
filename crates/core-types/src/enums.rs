use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four reports, in the order a run produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    StudentCount,
    MinAverageAge,
    MaxAgeDifference,
    MixedSex,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::StudentCount,
        ReportKind::MinAverageAge,
        ReportKind::MaxAgeDifference,
        ReportKind::MixedSex,
    ];

    /// Output file name without the extension. Also the XML root tag.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ReportKind::StudentCount => "rooms_student_count",
            ReportKind::MinAverageAge => "rooms_min_avg_age",
            ReportKind::MaxAgeDifference => "rooms_max_age_difference",
            ReportKind::MixedSex => "rooms_mixed_sex",
        }
    }

    pub fn root_tag(&self) -> &'static str {
        self.file_stem()
    }

    /// Tag wrapping each row in the XML rendering.
    pub fn item_tag(&self) -> &'static str {
        match self {
            ReportKind::StudentCount => "room_stat",
            ReportKind::MinAverageAge => "room_avg_age",
            ReportKind::MaxAgeDifference => "room_age_diff",
            ReportKind::MixedSex => "room_mixed_sex",
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ReportKind::StudentCount => &["room_id", "room_name", "student_count"],
            ReportKind::MinAverageAge => &["room_id", "room_name", "avg_age"],
            ReportKind::MaxAgeDifference => &["room_id", "room_name", "age_difference"],
            ReportKind::MixedSex => &["room_id", "room_name"],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::StudentCount => "Room student counts",
            ReportKind::MinAverageAge => "Rooms with minimum average age",
            ReportKind::MaxAgeDifference => "Rooms with maximum age difference",
            ReportKind::MixedSex => "Rooms with mixed sex students",
        }
    }
}

/// A single typed value in a report row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(value.into())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Decimal(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}
