//! Report data types.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ReportError;
use crate::currency::RoundingMode;

/// A calendar month with no day component.
///
/// Always normalized to the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportMonth(NaiveDate);

impl ReportMonth {
    /// Creates a month from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidMonth` if the month is out of range.
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| ReportError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day0(0).unwrap_or(date))
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// 1-based month number.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// First representable instant of the month (inclusive range start).
    #[must_use]
    pub fn first_instant(self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }

    /// First instant of the following month (exclusive range end).
    #[must_use]
    pub fn end_exclusive(self) -> NaiveDateTime {
        self.0
            .checked_add_months(Months::new(1))
            .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN))
    }

    /// Returns true if `instant` falls within this month.
    #[must_use]
    pub fn contains(self, instant: NaiveDateTime) -> bool {
        instant >= self.first_instant() && instant < self.end_exclusive()
    }

    /// Full month name, e.g. "March".
    #[must_use]
    pub fn month_name(self) -> String {
        self.0.format("%B").to_string()
    }

    /// Month and year as shown in reports, e.g. "March 2024".
    #[must_use]
    pub fn label(self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for ReportMonth {
    type Err = ReportError;

    /// Accepts `YYYY-MM` or `YYYY-MM-DD`; the day is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
            .map(Self::from_date)
            .map_err(|_| ReportError::InvalidMonth(s.to_string()))
    }
}

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// Portable Document Format.
    Pdf,
    /// Excel workbook.
    Excel,
}

impl ReportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "xlsx",
        }
    }

    /// MIME type used when serving the document.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Excel => "application/octet-stream",
        }
    }

    /// Download file name, e.g. `Report_March.pdf`.
    #[must_use]
    pub fn file_name(self, month: ReportMonth) -> String {
        format!("Report_{}.{}", month.month_name(), self.extension())
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One expense as it appears in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseReportLine {
    /// Expense title.
    pub title: String,
    /// Long date, e.g. "Friday, March 1, 2024".
    pub date: String,
    /// Time of day, e.g. "14:30".
    pub time: String,
    /// Payment type label (empty for unrecognized types).
    pub payment_label: String,
    /// Converted amount, rounded to 2 decimals.
    pub amount: Decimal,
    /// Description as stored.
    pub description: Option<String>,
    /// Whether the description row is rendered.
    pub has_description: bool,
}

/// Everything the renderer needs for one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportModel {
    /// Reported month.
    #[serde(serialize_with = "serialize_month")]
    pub month: ReportMonth,
    /// Display currency symbol.
    pub currency_symbol: String,
    /// Sum of the line amounts, rounded to 2 decimals.
    pub total: Decimal,
    /// Rounding used for the amounts, and again when they are formatted.
    #[serde(skip)]
    pub rounding: RoundingMode,
    /// Lines in repository order.
    pub lines: Vec<ExpenseReportLine>,
}

fn serialize_month<S: serde::Serializer>(month: &ReportMonth, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, sec)
            .unwrap()
    }

    #[rstest]
    #[case("2024-03", 2024, 3)]
    #[case("2024-03-17", 2024, 3)]
    #[case(" 1999-12 ", 1999, 12)]
    fn test_parse_month(#[case] input: &str, #[case] year: i32, #[case] month: u32) {
        let parsed: ReportMonth = input.parse().unwrap();
        assert_eq!(parsed.year(), year);
        assert_eq!(parsed.month(), month);
        assert_eq!(parsed.first_day().day(), 1);
    }

    #[rstest]
    #[case("")]
    #[case("2024")]
    #[case("2024-13")]
    #[case("March 2024")]
    fn test_parse_month_rejects_garbage(#[case] input: &str) {
        assert!(matches!(
            input.parse::<ReportMonth>(),
            Err(ReportError::InvalidMonth(_))
        ));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(ReportMonth::new(2024, 0).is_err());
        assert!(ReportMonth::new(2024, 13).is_err());
        assert!(ReportMonth::new(2024, 12).is_ok());
    }

    #[test]
    fn test_range_covers_whole_month() {
        let month = ReportMonth::new(2024, 2).unwrap();
        assert_eq!(month.first_instant(), at(2024, 2, 1, 0, 0, 0));
        assert_eq!(month.end_exclusive(), at(2024, 3, 1, 0, 0, 0));

        assert!(month.contains(at(2024, 2, 1, 0, 0, 0)));
        assert!(month.contains(at(2024, 2, 29, 23, 59, 59)));
        assert!(!month.contains(at(2024, 1, 31, 23, 59, 59)));
        assert!(!month.contains(at(2024, 3, 1, 0, 0, 0)));
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let month = ReportMonth::new(2023, 12).unwrap();
        assert_eq!(month.end_exclusive(), at(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_labels() {
        let month = ReportMonth::new(2024, 3).unwrap();
        assert_eq!(month.month_name(), "March");
        assert_eq!(month.label(), "March 2024");
        assert_eq!(month.to_string(), "2024-03");
    }

    #[test]
    fn test_file_names() {
        let month = ReportMonth::new(2024, 3).unwrap();
        assert_eq!(ReportFormat::Pdf.file_name(month), "Report_March.pdf");
        assert_eq!(ReportFormat::Excel.file_name(month), "Report_March.xlsx");
    }
}
