use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::enums::{Cell, ReportKind};

/// A typed report row that can be flattened into cells matching its report's headers.
pub trait ReportRow {
    const KIND: ReportKind;

    fn into_cells(self) -> Vec<Cell>;
}

/// One row of the occupancy report.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct RoomStudentCount {
    pub room_id: i32,
    pub room_name: String,
    pub student_count: i64,
}

/// One row of the minimum-average-age report. `avg_age` carries two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct RoomAverageAge {
    pub room_id: i32,
    pub room_name: String,
    pub avg_age: Decimal,
}

/// One row of the maximum-age-difference report.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct RoomAgeDifference {
    pub room_id: i32,
    pub room_name: String,
    pub age_difference: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct MixedSexRoom {
    pub room_id: i32,
    pub room_name: String,
}

impl ReportRow for RoomStudentCount {
    const KIND: ReportKind = ReportKind::StudentCount;

    fn into_cells(self) -> Vec<Cell> {
        vec![self.room_id.into(), self.room_name.into(), self.student_count.into()]
    }
}

impl ReportRow for RoomAverageAge {
    const KIND: ReportKind = ReportKind::MinAverageAge;

    fn into_cells(self) -> Vec<Cell> {
        vec![self.room_id.into(), self.room_name.into(), self.avg_age.into()]
    }
}

impl ReportRow for RoomAgeDifference {
    const KIND: ReportKind = ReportKind::MaxAgeDifference;

    fn into_cells(self) -> Vec<Cell> {
        vec![self.room_id.into(), self.room_name.into(), self.age_difference.into()]
    }
}

impl ReportRow for MixedSexRoom {
    const KIND: ReportKind = ReportKind::MixedSex;

    fn into_cells(self) -> Vec<Cell> {
        vec![self.room_id.into(), self.room_name.into()]
    }
}

/// Query output in tabular form: an ordered header list plus one cell vector per row.
///
/// This is the data transfer object between the report engine and the formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub kind: ReportKind,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn from_rows<R: ReportRow>(rows: Vec<R>) -> Self {
        Self {
            kind: R::KIND,
            headers: R::KIND.headers().iter().map(|h| h.to_string()).collect(),
            rows: rows.into_iter().map(ReportRow::into_cells).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn table_headers_follow_the_row_type() {
        let table = ReportTable::from_rows(vec![
            RoomAverageAge { room_id: 4, room_name: "Room #4".into(), avg_age: dec!(19.50) },
            RoomAverageAge { room_id: 9, room_name: "Room #9".into(), avg_age: dec!(20.00) },
        ]);

        assert_eq!(table.kind, ReportKind::MinAverageAge);
        assert_eq!(table.headers, vec!["room_id", "room_name", "avg_age"]);
        assert_eq!(
            table.rows[0],
            vec![Cell::Int(4), Cell::Text("Room #4".into()), Cell::Decimal(dec!(19.50))]
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn every_row_matches_its_header_count() {
        let count = RoomStudentCount { room_id: 1, room_name: "Red".into(), student_count: 0 };
        let diff = RoomAgeDifference { room_id: 1, room_name: "Red".into(), age_difference: dec!(3.00) };
        let mixed = MixedSexRoom { room_id: 1, room_name: "Red".into() };

        assert_eq!(count.into_cells().len(), RoomStudentCount::KIND.headers().len());
        assert_eq!(diff.into_cells().len(), RoomAgeDifference::KIND.headers().len());
        assert_eq!(mixed.into_cells().len(), MixedSexRoom::KIND.headers().len());
    }

    #[test]
    fn report_metadata() {
        let stems: Vec<_> = ReportKind::ALL.iter().map(|k| k.file_stem()).collect();
        assert_eq!(
            stems,
            vec![
                "rooms_student_count",
                "rooms_min_avg_age",
                "rooms_max_age_difference",
                "rooms_mixed_sex"
            ]
        );
        assert_eq!(ReportKind::MaxAgeDifference.item_tag(), "room_age_diff");
        assert_eq!(ReportKind::MixedSex.root_tag(), "rooms_mixed_sex");
    }

    #[test]
    fn empty_table_keeps_headers() {
        let table = ReportTable::from_rows(Vec::<MixedSexRoom>::new());
        assert!(table.is_empty());
        assert_eq!(table.headers, vec!["room_id", "room_name"]);
    }
}
