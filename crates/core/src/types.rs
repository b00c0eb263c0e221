/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (leave ranges, pay dates, birth dates) carry no time zone.
pub type Date = chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` calendar date supplied in field `field`.
pub fn parse_date(field: &str, value: &str) -> Result<Date, crate::error::CoreError> {
    Date::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        crate::error::CoreError::Validation(format!("{field} must be a date in YYYY-MM-DD format"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("start_date", " 2024-02-01 ").unwrap(),
            Date::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_date("dob", "01/02/2024").is_err());
        assert!(parse_date("dob", "2024-02-30").is_err());
        assert!(parse_date("dob", "").is_err());
    }
}
