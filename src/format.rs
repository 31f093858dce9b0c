//! Digit-only format check for raw card numbers.
//!
//! The raw input must already be a bare digit string. Nothing is stripped:
//! a number typed as `4111 1111 1111 1111` is rejected, not normalized.
//! Only ASCII `0-9` count as digits, so other Unicode decimal digits are
//! rejected as well.
//!
//! # Example
//!
//! ```
//! use cardcheck::format::{is_digit_string, parse_digits};
//!
//! assert!(is_digit_string("4111111111111111"));
//! assert!(!is_digit_string("4111-1111-1111-1111"));
//!
//! let digits = parse_digits("4012").unwrap();
//! assert_eq!(&digits[..], &[4, 0, 1, 2]);
//! ```

use zeroize::Zeroizing;

use crate::error::CardError;

/// Returns true if every character of `input` is an ASCII digit.
///
/// The empty string is a digit string: there is nothing to reject.
#[inline]
pub fn is_digit_string(input: &str) -> bool {
    input.bytes().all(|b| b.is_ascii_digit())
}

/// Checks the format of a raw card number and converts it to digit values.
///
/// Returns the digits as values `0..=9` (not ASCII) in a buffer that is
/// zeroed when dropped.
///
/// # Errors
///
/// `CardError::InvalidFormat` naming the first character that is not an
/// ASCII digit and its character position.
pub fn parse_digits(input: &str) -> Result<Zeroizing<Vec<u8>>, CardError> {
    let mut digits = Zeroizing::new(Vec::with_capacity(input.len()));

    for (position, character) in input.chars().enumerate() {
        match character {
            '0'..='9' => digits.push(character as u8 - b'0'),
            _ => {
                return Err(CardError::InvalidFormat {
                    position,
                    character,
                })
            }
        }
    }

    Ok(digits)
}
