//! Masking utilities for card numbers.
//!
//! A validated card number should never reach a log line or a `Debug` dump
//! in full. These helpers render the last four digits (optionally with the
//! first six) and hide everything else.

use crate::CardNumber;

/// Masks a card number showing only the last 4 digits.
///
/// Format: `****-****-****-1234`
///
/// # Example
///
/// ```
/// use cardcheck::{validate, mask};
///
/// let card = validate("4111111111111111").unwrap();
/// assert_eq!(mask::mask_card(&card), "****-****-****-1111");
/// ```
#[inline]
pub fn mask_card(card: &CardNumber) -> String {
    mask_digits(card.number())
}

/// Masks a card number showing the BIN (first 6) and last 4 digits.
///
/// Format: `411111******1234`. Numbers of 10 digits or fewer fall back to
/// [`mask_card`].
///
/// # Example
///
/// ```
/// use cardcheck::validate;
///
/// let card = validate("4111111111111111").unwrap();
/// assert_eq!(card.masked_with_bin(), "411111******1111");
/// ```
#[inline]
pub fn mask_with_bin(card: &CardNumber) -> String {
    let number = card.number();
    let len = number.len();

    if len <= 10 {
        return mask_card(card);
    }

    let mut result = String::with_capacity(len);
    result.push_str(&number[..6]);
    result.extend(std::iter::repeat('*').take(len - 10));
    result.push_str(&number[len - 4..]);
    result
}

/// Masks raw, unvalidated input.
///
/// Used when logging rejected input. Non-digit characters are dropped
/// before masking, so the output never echoes arbitrary text.
#[inline]
pub fn mask_string(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    mask_digits(&digits)
}

fn mask_digits(digits: &str) -> String {
    let len = digits.len();
    if len <= 4 {
        return "*".repeat(len);
    }

    // Stars are grouped by four; the visible tail starts a new group only
    // when the hidden part fills its last group.
    let hidden = len - 4;
    let mut out = String::with_capacity(len + len / 4);
    for i in 0..hidden {
        if i > 0 && i % 4 == 0 {
            out.push('-');
        }
        out.push('*');
    }
    if hidden % 4 == 0 {
        out.push('-');
    }
    out.push_str(&digits[hidden..]);
    out
}

/// Constant-time comparison of two byte slices.
///
/// Takes the same time wherever (or whether) the slices differ. Lengths are
/// compared up front.
///
/// # Example
///
/// ```
/// use cardcheck::mask::constant_time_eq;
///
/// assert!(constant_time_eq(b"4111111111111111", b"4111111111111111"));
/// assert!(!constant_time_eq(b"4111111111111111", b"4111111111111112"));
/// ```
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str) -> CardNumber {
        CardNumber::new(number, None).unwrap()
    }

    #[test]
    fn test_mask_card_16_digits() {
        assert_eq!(mask_card(&card("4111111111111111")), "****-****-****-1111");
    }

    #[test]
    fn test_mask_card_15_digits() {
        let masked = mask_card(&card("378282246310005"));
        assert_eq!(masked, "****-****-***0005");
    }

    #[test]
    fn test_mask_with_bin() {
        assert_eq!(mask_with_bin(&card("4111111111111111")), "411111******1111");
        assert_eq!(mask_with_bin(&card("4222222222222")), "422222***2222");
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("4111111111111111"), "****-****-****-1111");
        assert_eq!(mask_string("4111-1111-1111-1111"), "****-****-****-1111");
        assert_eq!(mask_string("12"), "**");
        assert_eq!(mask_string("secret"), "");
    }

    #[test]
    fn test_mask_maestro_lengths() {
        assert_eq!(mask_card(&card("6759649826438453")), "****-****-****-8453");
        assert_eq!(mask_card(&card("5018000000000009")), "****-****-****-0009");
        let long = card("67590000000000000000");
        assert_eq!(long.len(), 20);
        assert_eq!(mask_card(&long), "****-****-****-****-0000");
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"6759649826438453", b"6759649826438453"));
        assert!(!constant_time_eq(b"6759649826438453", b"6759649826438454"));
        assert!(!constant_time_eq(b"675964982643845", b"6759649826438453"));
        assert!(constant_time_eq(b"", b""));
    }
}
