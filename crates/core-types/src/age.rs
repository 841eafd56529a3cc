//! Whole-year age calculation.
//!
//! The report queries compute ages in SQL with
//! `EXTRACT(YEAR FROM AGE(<reference date>, birthday))`. The functions here
//! produce the same number client-side for the same reference date.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::CoreError;

/// Parses an ISO-8601 date or date-time, keeping only the date component.
///
/// `"2000-05-01"`, `"2000-05-01T13:45:00"` and `"2000-05-01T00:00:00+02:00"`
/// all yield 2000-05-01.
pub fn parse_birthday(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(['T', 't', ' '])
        .next()
        .unwrap_or(trimmed);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidBirthday(raw.to_string()))
}

/// Age in whole years on `today`.
///
/// The year difference is decremented when this year's birthday has not
/// happened yet, i.e. `(month, day)` of `today` is strictly before the birth
/// `(month, day)`. A Feb 29 birthday therefore ticks over on Mar 1 in
/// non-leap years, like PostgreSQL's `AGE`.
pub fn age_on(birthday: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        years - 1
    } else {
        years
    }
}

/// Age in whole years as of `today` for a raw birthday string.
pub fn age_from_birthday_on(raw: &str, today: NaiveDate) -> Result<i32, CoreError> {
    Ok(age_on(parse_birthday(raw)?, today))
}

/// Age in whole years as of the local calendar date.
pub fn age_from_birthday(raw: &str) -> Result<i32, CoreError> {
    age_from_birthday_on(raw, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2000-05-01", date(2026, 4, 30), 25)]
    #[case("2000-05-01", date(2026, 5, 1), 26)]
    #[case("2000-05-01", date(2026, 5, 2), 26)]
    #[case("2000-12-31", date(2026, 1, 1), 25)]
    #[case("2000-02-29", date(2026, 2, 28), 25)]
    #[case("2000-02-29", date(2026, 3, 1), 26)]
    #[case("2000-02-29", date(2028, 2, 29), 28)]
    #[case("2026-10-19", date(2026, 10, 19), 0)]
    fn whole_years(#[case] birthday: &str, #[case] today: NaiveDate, #[case] expected: i32) {
        assert_eq!(age_from_birthday_on(birthday, today).unwrap(), expected);
    }

    #[rstest]
    #[case("1999-03-15T00:00:00")]
    #[case("1999-03-15T23:59:59.999999")]
    #[case("1999-03-15T12:00:00+05:00")]
    #[case("1999-03-15 08:30:00")]
    fn time_of_day_is_ignored(#[case] raw: &str) {
        let today = date(2026, 3, 14);
        assert_eq!(
            age_from_birthday_on(raw, today).unwrap(),
            age_from_birthday_on("1999-03-15", today).unwrap()
        );
        assert_eq!(parse_birthday(raw).unwrap(), date(1999, 3, 15));
    }

    #[rstest]
    #[case("")]
    #[case("not a date")]
    #[case("2001-13-01")]
    #[case("2001-02-30T00:00:00")]
    #[case("01/02/2001")]
    fn invalid_birthdays_are_rejected(#[case] raw: &str) {
        assert_eq!(
            parse_birthday(raw),
            Err(CoreError::InvalidBirthday(raw.to_string()))
        );
    }

    #[test]
    fn age_from_birthday_uses_today() {
        let today = Local::now().date_naive();
        let birthday = today.with_year(today.year() - 30).unwrap_or(date(today.year() - 30, 3, 1));
        let raw = birthday.format("%Y-%m-%d").to_string();
        assert_eq!(age_from_birthday(&raw).unwrap(), age_on(birthday, today));
    }
}
