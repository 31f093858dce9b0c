//! Card expiration dates.
//!
//! An expiration is a calendar month. It is accepted when `(year, month, 1)`
//! is a real date and the month does not lie before the month of a
//! reference instant. The current month is still valid: a card expires at
//! the end of its expiration month.
//!
//! The reference instant is an explicit input ([`Expiration::validate_at`])
//! so the checks stay pure. [`Expiration::validate`] reads the local clock
//! exactly once and delegates.
//!
//! # Example
//!
//! ```
//! use cardcheck::expiration::Expiration;
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
//!
//! let exp = Expiration::validate_at(2026, 10, &now).unwrap();
//! assert_eq!(exp.to_string(), "10/2026");
//!
//! assert!(Expiration::validate_at(2026, 9, &now).is_err());
//! assert!(Expiration::validate_at(2030, 13, &now).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};

use crate::error::CardError;

/// Years accepted as calendar years.
const YEARS: std::ops::RangeInclusive<i32> = 1..=32767;

/// A calendar-valid expiration month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawExpiration"))]
pub struct Expiration {
    year: i32,
    month: u32,
}

impl Expiration {
    /// Creates an expiration after checking that `(year, month, 1)` exists.
    ///
    /// Years run from 1 to 32767; year 0 and negative years are not calendar
    /// years. Does not look at the clock.
    ///
    /// # Errors
    ///
    /// `CardError::InvalidCalendarDate` for months outside `1..=12` and for
    /// years outside `1..=32767`.
    pub fn new(year: i32, month: u32) -> Result<Self, CardError> {
        if !YEARS.contains(&year) {
            return Err(CardError::InvalidCalendarDate { year, month });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or(CardError::InvalidCalendarDate { year, month })
    }

    /// Creates an expiration and rejects it if it lies before the month of
    /// `now`, taken in `now`'s own time zone.
    ///
    /// # Errors
    ///
    /// `CardError::InvalidCalendarDate`, then `CardError::ExpiredDate`.
    pub fn validate_at<Tz: TimeZone>(
        year: i32,
        month: u32,
        now: &DateTime<Tz>,
    ) -> Result<Self, CardError> {
        let expiration = Self::new(year, month)?;
        if expiration.is_expired_at(now) {
            return Err(CardError::ExpiredDate { year, month });
        }
        Ok(expiration)
    }

    /// Like [`Expiration::validate_at`], against the local clock.
    pub fn validate(year: i32, month: u32) -> Result<Self, CardError> {
        let now = Local::now();
        Self::validate_at(year, month, &now)
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of the expiration month.
    pub fn first_day(&self) -> NaiveDate {
        // Checked in `new`; the fallback is unreachable.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Returns true if the expiration month lies before the month of `now`.
    pub fn is_expired_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let reference = now.date_naive();
        (self.year, self.month) < (reference.year(), reference.month())
    }

    /// Returns true if the expiration month lies before the local month.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&Local::now())
    }

    /// Number of whole months from the month of `now` to the expiration
    /// month. Zero for the current month, negative once expired.
    pub fn months_until<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let reference = now.date_naive();
        let expiry = self.year as i64 * 12 + self.month as i64;
        let current = reference.year() as i64 * 12 + reference.month() as i64;
        expiry - current
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Error returned when parsing an expiration from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseExpirationError {
    /// The text is neither `YYYY-MM` nor `MM/YYYY`.
    Malformed(String),
    /// The text names a year and month that fail the calendar check.
    Invalid(CardError),
}

impl fmt::Display for ParseExpirationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(input) => {
                write!(f, "expected YYYY-MM or MM/YYYY, got '{}'", input)
            }
            Self::Invalid(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseExpirationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed(_) => None,
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<CardError> for ParseExpirationError {
    fn from(err: CardError) -> Self {
        Self::Invalid(err)
    }
}

/// Splits `YYYY-MM` or `MM/YYYY` into `(year, month)` without any calendar
/// check.
///
/// # Example
///
/// ```
/// use cardcheck::expiration::parse_year_month;
///
/// assert_eq!(parse_year_month("2028-04"), Ok((2028, 4)));
/// assert_eq!(parse_year_month("13/2028"), Ok((2028, 13)));
/// assert!(parse_year_month("next year").is_err());
/// ```
pub fn parse_year_month(s: &str) -> Result<(i32, u32), ParseExpirationError> {
    let trimmed = s.trim();
    let parts = if let Some((y, m)) = trimmed.split_once('-') {
        Some((y, m))
    } else {
        trimmed.split_once('/').map(|(m, y)| (y, m))
    };

    parts
        .and_then(|(year, month)| {
            let year = year.trim().parse::<i32>().ok()?;
            let month = month.trim().parse::<u32>().ok()?;
            Some((year, month))
        })
        .ok_or_else(|| ParseExpirationError::Malformed(s.to_owned()))
}

/// Parses `YYYY-MM` or `MM/YYYY`. Applies the calendar check only.
impl FromStr for Expiration {
    type Err = ParseExpirationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = parse_year_month(s)?;
        Ok(Self::new(year, month)?)
    }
}

/// Unchecked wire form; deserialization goes through [`Expiration::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawExpiration {
    year: i32,
    month: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawExpiration> for Expiration {
    type Error = CardError;

    fn try_from(raw: RawExpiration) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_checks_calendar() {
        assert!(Expiration::new(2030, 1).is_ok());
        assert!(Expiration::new(2030, 12).is_ok());
        assert_eq!(
            Expiration::new(2030, 0),
            Err(CardError::InvalidCalendarDate {
                year: 2030,
                month: 0
            })
        );
        assert_eq!(
            Expiration::new(2030, 13),
            Err(CardError::InvalidCalendarDate {
                year: 2030,
                month: 13
            })
        );
        // Outside chrono's representable range
        assert!(Expiration::new(i32::MAX, 1).is_err());
    }

    #[test]
    fn test_current_month_is_accepted() {
        let now = reference();
        let exp = Expiration::validate_at(2026, 10, &now).unwrap();
        assert_eq!(exp.months_until(&now), 0);
        assert!(!exp.is_expired_at(&now));
    }

    #[test]
    fn test_previous_month_is_expired() {
        let now = reference();
        assert_eq!(
            Expiration::validate_at(2026, 9, &now),
            Err(CardError::ExpiredDate {
                year: 2026,
                month: 9
            })
        );
        assert!(Expiration::validate_at(2025, 12, &now).is_err());
        assert!(Expiration::validate_at(2026, 11, &now).is_ok());
        assert!(Expiration::validate_at(2027, 1, &now).is_ok());
    }

    #[test]
    fn test_calendar_error_wins_over_expired() {
        let now = reference();
        assert_eq!(
            Expiration::validate_at(1999, 13, &now),
            Err(CardError::InvalidCalendarDate {
                year: 1999,
                month: 13
            })
        );
    }

    #[test]
    fn test_reference_month_follows_time_zone() {
        // 2026-10-31 23:30 UTC is already November in UTC+02:00
        let utc = Utc.with_ymd_and_hms(2026, 10, 31, 23, 30, 0).unwrap();
        let east = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());

        assert!(Expiration::validate_at(2026, 10, &utc).is_ok());
        assert!(Expiration::validate_at(2026, 10, &east).is_err());
    }

    #[test]
    fn test_months_until() {
        let now = reference();
        assert_eq!(Expiration::new(2027, 10).unwrap().months_until(&now), 12);
        assert_eq!(Expiration::new(2026, 8).unwrap().months_until(&now), -2);
    }

    #[test]
    fn test_local_clock() {
        assert!(Expiration::validate(2099, 12).is_ok());
        assert!(Expiration::new(2000, 1).unwrap().is_expired());
        assert!(matches!(
            Expiration::validate(2000, 1),
            Err(CardError::ExpiredDate { .. })
        ));
    }

    #[test]
    fn test_display_and_first_day() {
        let exp = Expiration::new(2030, 3).unwrap();
        assert_eq!(exp.to_string(), "03/2030");
        assert_eq!(exp.first_day(), NaiveDate::from_ymd_opt(2030, 3, 1).unwrap());
    }

    #[test]
    fn test_parse() {
        assert_eq!("2030-03".parse::<Expiration>(), Ok(Expiration::new(2030, 3).unwrap()));
        assert_eq!("03/2030".parse::<Expiration>(), Ok(Expiration::new(2030, 3).unwrap()));
        assert_eq!(" 12/2031 ".parse::<Expiration>(), Ok(Expiration::new(2031, 12).unwrap()));
        assert_eq!(
            "2030-13".parse::<Expiration>(),
            Err(ParseExpirationError::Invalid(CardError::InvalidCalendarDate {
                year: 2030,
                month: 13
            }))
        );
    }

    #[test]
    fn test_parse_malformed_names_the_input() {
        for input in ["abcd-03", "next year", "abcd-ef", "2030", ""] {
            let err = input.parse::<Expiration>().unwrap_err();
            assert_eq!(err, ParseExpirationError::Malformed(input.to_string()));
            assert!(!err.to_string().contains("0-00"), "{}", err);
        }
        assert_eq!(
            ParseExpirationError::Malformed("next year".into()).to_string(),
            "expected YYYY-MM or MM/YYYY, got 'next year'"
        );
    }

    #[test]
    fn test_year_outside_calendar_is_invalid() {
        let now = reference();
        for year in [0, -1, -2030, 32768] {
            assert_eq!(
                Expiration::validate_at(year, 1, &now),
                Err(CardError::InvalidCalendarDate { year, month: 1 })
            );
        }
        assert!(Expiration::new(1, 1).is_ok());
        assert!(Expiration::new(32767, 12).is_ok());
    }
}
