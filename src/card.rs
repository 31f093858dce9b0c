//! The validated card value object.
//!
//! A [`CardNumber`] only exists once its raw input passed the format check,
//! the Luhn checksum and network classification. The single mutation it
//! allows afterwards is attaching an expiration, which is all-or-nothing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CardError;
use crate::expiration::Expiration;
use crate::network::{self, CardType};
use crate::{format, luhn, mask};

/// A validated, classified payment card number.
///
/// # Security
///
/// - The number and security code are zeroed when the value is dropped
/// - `Debug` and `Display` show the masked number only
/// - Equality compares numbers in constant time
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CardNumber {
    number: String,
    security_code: Option<String>,
    #[zeroize(skip)]
    card_type: CardType,
    #[zeroize(skip)]
    expiration: Option<Expiration>,
}

impl CardNumber {
    /// Validates a raw card number and an optional security code.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// 1. Format: every character must be an ASCII digit, nothing is stripped
    /// 2. Luhn checksum
    /// 3. Network classification, last matching rule wins
    ///
    /// The security code is stored as given, without any validation.
    ///
    /// # Example
    ///
    /// ```
    /// use cardcheck::{CardNumber, CardType};
    ///
    /// let card = CardNumber::new("340000000000009", Some("1234")).unwrap();
    /// assert_eq!(card.card_type(), CardType::Amex);
    /// assert_eq!(card.security_code(), Some("1234"));
    ///
    /// assert!(CardNumber::new("4111 1111 1111 1111", None).is_err());
    /// ```
    pub fn new(number: &str, security_code: Option<&str>) -> Result<Self, CardError> {
        let card_type = classify_raw(number).map_err(|err| {
            tracing::debug!(
                kind = err.kind(),
                length = number.chars().count(),
                masked = %mask::mask_string(number),
                "card number rejected"
            );
            err
        })?;

        tracing::debug!(
            card_type = card_type.as_str(),
            length = number.len(),
            masked = %mask::mask_string(number),
            "card number accepted"
        );

        Ok(Self {
            number: number.to_owned(),
            security_code: security_code.map(str::to_owned),
            card_type,
            expiration: None,
        })
    }

    /// Attaches an expiration, checked against the local clock.
    ///
    /// The clock is read once, then [`CardNumber::set_expiration_at`] does
    /// the work.
    ///
    /// # Errors
    ///
    /// `CardError::InvalidCalendarDate` or `CardError::ExpiredDate`. On error
    /// the previously stored expiration, if any, is kept.
    pub fn set_expiration(&mut self, year: i32, month: u32) -> Result<(), CardError> {
        let now = Local::now();
        self.set_expiration_at(year, month, &now)
    }

    /// Attaches an expiration, checked against the reference instant `now`.
    ///
    /// Calling it again with another valid pair replaces the stored value.
    ///
    /// # Example
    ///
    /// ```
    /// use cardcheck::CardNumber;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
    /// let mut card = CardNumber::new("4111111111111111", None).unwrap();
    ///
    /// card.set_expiration_at(2027, 5, &now).unwrap();
    /// assert!(card.set_expiration_at(2026, 9, &now).is_err());
    /// assert_eq!(card.expiration().unwrap().month(), 5);
    /// ```
    pub fn set_expiration_at<Tz: TimeZone>(
        &mut self,
        year: i32,
        month: u32,
        now: &DateTime<Tz>,
    ) -> Result<(), CardError> {
        match Expiration::validate_at(year, month, now) {
            Ok(expiration) => {
                self.expiration = Some(expiration);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(kind = err.kind(), year, month, "expiration rejected");
                Err(err)
            }
        }
    }

    /// Returns the digit string exactly as it was supplied.
    ///
    /// # Security Warning
    ///
    /// This exposes the full card number. Use [`CardNumber::masked`] for
    /// display and logging.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the classified card network.
    #[inline]
    pub const fn card_type(&self) -> CardType {
        self.card_type
    }

    /// Returns the security code as supplied, if any.
    #[inline]
    pub fn security_code(&self) -> Option<&str> {
        self.security_code.as_deref()
    }

    /// Returns the expiration, if one has been attached.
    #[inline]
    pub const fn expiration(&self) -> Option<Expiration> {
        self.expiration
    }

    /// Returns the number of digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.number.len()
    }

    /// Returns true if the number has no digits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
    }

    /// Returns the last four digits.
    pub fn last_four(&self) -> &str {
        let len = self.number.len();
        &self.number[len.saturating_sub(4)..]
    }

    /// Returns the number masked as `****-****-****-1234`.
    #[inline]
    pub fn masked(&self) -> String {
        mask::mask_card(self)
    }

    /// Returns the number masked as `411111******1234`.
    #[inline]
    pub fn masked_with_bin(&self) -> String {
        mask::mask_with_bin(self)
    }

    /// Returns all fields as an owned record.
    ///
    /// # Security Warning
    ///
    /// The record carries the full number and security code.
    pub fn to_record(&self) -> CardRecord {
        CardRecord {
            number: self.number.clone(),
            security_code: self.security_code.clone(),
            card_type: self.card_type,
            expiration: self.expiration,
        }
    }
}

/// Runs the construction checks without building a value.
pub(crate) fn classify_raw(number: &str) -> Result<CardType, CardError> {
    let digits = format::parse_digits(number)?;

    if !luhn::validate(&digits) {
        return Err(CardError::InvalidChecksum);
    }

    network::classify(&digits).ok_or(CardError::UnclassifiedCardNetwork)
}

impl FromStr for CardNumber {
    type Err = CardError;

    /// Validates a number without a security code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s, None)
    }
}

impl PartialEq for CardNumber {
    fn eq(&self, other: &Self) -> bool {
        mask::constant_time_eq(self.number.as_bytes(), other.number.as_bytes())
            && self.card_type == other.card_type
            && self.expiration == other.expiration
            && match (&self.security_code, &other.security_code) {
                (Some(a), Some(b)) => mask::constant_time_eq(a.as_bytes(), b.as_bytes()),
                (None, None) => true,
                _ => false,
            }
    }
}

impl Eq for CardNumber {}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardNumber")
            .field("number", &self.masked())
            .field("card_type", &self.card_type)
            .field(
                "security_code",
                &self.security_code.as_ref().map(|_| "***"),
            )
            .field("expiration", &self.expiration)
            .finish()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.card_type, self.masked())
    }
}

/// Snapshot of every field of a [`CardNumber`].
///
/// With the `serde` feature it serializes as
/// `{"number", "security_code", "type", "expiration": {"year", "month"}}`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CardRecord {
    /// The digit string as supplied.
    pub number: String,
    /// The security code as supplied.
    pub security_code: Option<String>,
    /// The classified network.
    #[zeroize(skip)]
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub card_type: CardType,
    /// The attached expiration, if any.
    #[zeroize(skip)]
    pub expiration: Option<Expiration>,
}

impl fmt::Debug for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardRecord")
            .field("number", &mask::mask_string(&self.number))
            .field("card_type", &self.card_type)
            .field(
                "security_code",
                &self.security_code.as_ref().map(|_| "***"),
            )
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const VISA: &str = "4111111111111111";

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_construction_order() {
        // Non-digit beats a bad checksum
        assert!(matches!(
            CardNumber::new("4111111111111112x", None),
            Err(CardError::InvalidFormat { position: 16, character: 'x' })
        ));
        // Bad checksum beats a missing network
        assert_eq!(
            CardNumber::new("0000000000000001", None).unwrap_err(),
            CardError::InvalidChecksum
        );
        assert_eq!(
            CardNumber::new("0000000000000000", None).unwrap_err(),
            CardError::UnclassifiedCardNetwork
        );
    }

    #[test]
    fn test_empty_input_is_unclassified() {
        assert_eq!(
            CardNumber::new("", None).unwrap_err(),
            CardError::UnclassifiedCardNetwork
        );
    }

    #[test]
    fn test_accessors() {
        let card = CardNumber::new(VISA, Some("123")).unwrap();
        assert_eq!(card.number(), VISA);
        assert_eq!(card.card_type(), CardType::Visa);
        assert_eq!(card.security_code(), Some("123"));
        assert_eq!(card.expiration(), None);
        assert_eq!(card.len(), 16);
        assert!(!card.is_empty());
        assert_eq!(card.last_four(), "1111");
    }

    #[test]
    fn test_security_code_is_not_validated() {
        let card = CardNumber::new(VISA, Some("not a code")).unwrap();
        assert_eq!(card.security_code(), Some("not a code"));
        let card = CardNumber::new(VISA, Some("")).unwrap();
        assert_eq!(card.security_code(), Some(""));
    }

    #[test]
    fn test_set_expiration_overwrites() {
        let now = reference();
        let mut card: CardNumber = VISA.parse().unwrap();

        card.set_expiration_at(2027, 1, &now).unwrap();
        card.set_expiration_at(2029, 6, &now).unwrap();

        let exp = card.expiration().unwrap();
        assert_eq!((exp.year(), exp.month()), (2029, 6));
    }

    #[test]
    fn test_rejected_expiration_keeps_previous() {
        let now = reference();
        let mut card: CardNumber = VISA.parse().unwrap();
        card.set_expiration_at(2027, 1, &now).unwrap();

        assert_eq!(
            card.set_expiration_at(2027, 13, &now),
            Err(CardError::InvalidCalendarDate {
                year: 2027,
                month: 13
            })
        );
        assert_eq!(
            card.set_expiration_at(2026, 9, &now),
            Err(CardError::ExpiredDate {
                year: 2026,
                month: 9
            })
        );
        assert_eq!(card.expiration(), Some(Expiration::new(2027, 1).unwrap()));
    }

    #[test]
    fn test_set_expiration_on_local_clock() {
        let mut card: CardNumber = VISA.parse().unwrap();
        assert!(card.set_expiration(2099, 12).is_ok());
        assert!(card.set_expiration(2001, 1).is_err());
        assert_eq!(card.expiration().map(|e| e.year()), Some(2099));
    }

    #[test]
    fn test_to_record() {
        let now = reference();
        let mut card = CardNumber::new("5500000000000004", Some("999")).unwrap();
        card.set_expiration_at(2028, 2, &now).unwrap();

        let record = card.to_record();
        assert_eq!(record.number, "5500000000000004");
        assert_eq!(record.security_code.as_deref(), Some("999"));
        assert_eq!(record.card_type, CardType::Mastercard);
        assert_eq!(record.expiration, Some(Expiration::new(2028, 2).unwrap()));
    }

    #[test]
    fn test_debug_is_masked() {
        let card = CardNumber::new(VISA, Some("321")).unwrap();
        let debug = format!("{:?}", card);
        assert!(!debug.contains(VISA));
        assert!(!debug.contains("321"));
        assert!(debug.contains("****"));

        let debug = format!("{:?}", card.to_record());
        assert!(!debug.contains(VISA));
        assert!(!debug.contains("321"));
    }

    #[test]
    fn test_display() {
        let card: CardNumber = VISA.parse().unwrap();
        assert_eq!(card.to_string(), "visa ****-****-****-1111");
    }

    #[test]
    fn test_equality() {
        let a = CardNumber::new(VISA, Some("123")).unwrap();
        let b = CardNumber::new(VISA, Some("123")).unwrap();
        let c = CardNumber::new(VISA, None).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, CardNumber::new("4012888888881881", Some("123")).unwrap());
    }

    #[test]
    fn test_card_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardNumber>();
        assert_send_sync::<CardRecord>();
    }
}
