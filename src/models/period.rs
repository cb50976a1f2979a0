use crate::error::{IngestError, Result};
use crate::models::schema::{REQUEST_PERIOD_FORMAT, SHEET_PERIOD_FORMAT};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// 开票月份 (年-月)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    first_day: NaiveDate,
}

impl Period {
    /// 解析调用方传入的 `YYYY-MM`
    pub fn parse_requested(value: &str) -> Result<Self> {
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(IngestError::InvalidRequestedPeriod(value.to_string()));
        }

        NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
            .map(|first_day| Self { first_day })
            .map_err(|_| IngestError::InvalidRequestedPeriod(value.to_string()))
    }

    /// 解析表格首格中的月份, 如 "Jan 2024" / "January 2024"
    pub fn parse_sheet_label(label: &str) -> Result<Self> {
        let format = format!("%d {}", SHEET_PERIOD_FORMAT);
        NaiveDate::parse_from_str(&format!("01 {}", label.trim()), &format)
            .map(|first_day| Self { first_day })
            .map_err(|_| IngestError::PeriodFormat(label.to_string()))
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day.format(REQUEST_PERIOD_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_label_normalizes_to_year_month() {
        let period = Period::parse_sheet_label("Jan 2024").unwrap();
        assert_eq!(period.to_string(), "2024-01");
        assert_eq!(period, Period::parse_requested("2024-01").unwrap());
    }

    #[test]
    fn different_months_are_not_equal() {
        let file = Period::parse_sheet_label("Feb 2024").unwrap();
        assert_ne!(file, Period::parse_requested("2024-01").unwrap());
    }

    #[test]
    fn full_month_names_are_accepted() {
        let period = Period::parse_sheet_label(" March 2023 ").unwrap();
        assert_eq!((period.year(), period.month()), (2023, 3));
    }

    #[test]
    fn unparseable_label_is_a_period_format_error() {
        assert!(matches!(
            Period::parse_sheet_label("Invoices"),
            Err(IngestError::PeriodFormat(_))
        ));
    }

    #[test]
    fn requested_period_must_be_year_dash_month() {
        for bad in ["2024-1", "24-01", "2024/01", "2024-13", "", "2024-01-01"] {
            assert!(
                matches!(Period::parse_requested(bad), Err(IngestError::InvalidRequestedPeriod(_))),
                "{bad} should be rejected"
            );
        }
    }
}
