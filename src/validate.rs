//! Entry points combining the format check, Luhn validation and network
//! classification.
//!
//! All functions here are thin wrappers over [`CardNumber::new`]; use them
//! when a yes/no answer or a one-call validation is all you need.

use crate::card::{self, CardNumber};
use crate::error::CardError;
use crate::{format, luhn};

/// Validates a raw card number without a security code.
///
/// # Example
///
/// ```
/// use cardcheck::{validate, CardError, CardType};
///
/// let card = validate("5500000000000004").unwrap();
/// assert_eq!(card.card_type(), CardType::Mastercard);
///
/// assert_eq!(validate("5500000000000005").unwrap_err(), CardError::InvalidChecksum);
/// ```
#[inline]
pub fn validate(input: &str) -> Result<CardNumber, CardError> {
    CardNumber::new(input, None)
}

/// Validates a raw card number and keeps the given security code.
#[inline]
pub fn validate_with_security_code(
    input: &str,
    security_code: &str,
) -> Result<CardNumber, CardError> {
    CardNumber::new(input, Some(security_code))
}

/// Quickly checks if a card number is valid without building a value.
///
/// # Example
///
/// ```
/// use cardcheck::is_valid;
///
/// assert!(is_valid("4111111111111111"));
/// assert!(!is_valid("4111-1111-1111-1111"));
/// ```
#[inline]
pub fn is_valid(input: &str) -> bool {
    card::classify_raw(input).is_ok()
}

/// Checks the format and the Luhn checksum only.
///
/// Nothing is stripped, so separators make the check fail.
///
/// # Example
///
/// ```
/// use cardcheck::passes_luhn;
///
/// assert!(passes_luhn("4111111111111111"));
/// assert!(!passes_luhn("4111111111111112"));
/// assert!(!passes_luhn("4111 1111 1111 1111"));
/// ```
#[inline]
pub fn passes_luhn(input: &str) -> bool {
    format::parse_digits(input)
        .map(|digits| luhn::validate(&digits))
        .unwrap_or(false)
}
