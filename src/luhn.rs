//! Luhn algorithm implementation for card number validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is the
//! checksum formula carried by every payment card number.
//!
//! Walking the number from the right, every second digit is doubled. A
//! doubled digit can reach two decimal places (`8 * 2 = 16`), and it then
//! contributes the sum of its own digits (`1 + 6 = 7`), never the raw value.

/// Sum of the decimal digits of `digit * 2`.
///
/// `digit` must be in `0..=9`, so the doubled value has at most two digits.
#[inline]
const fn doubled_digit_sum(digit: u8) -> u32 {
    let doubled = digit as u32 * 2;
    doubled / 10 + doubled % 10
}

/// Validates a digit sequence using the Luhn algorithm.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9) representing the card number.
///
/// # Algorithm
///
/// 1. Reverse the digits, so the check digit sits at index 0
/// 2. Double the digits at odd indexes and split each result into its own
///    decimal digits
/// 3. Sum every resulting digit
/// 4. The number is valid if the sum is divisible by 10
///
/// An empty slice sums to 0 and therefore passes; rejecting it is left to
/// network classification.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::validate;
///
/// // Valid Visa test card
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// // Invalid card (changed last digit)
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    checksum(digits) % 10 == 0
}

/// Computes the Luhn sum for a sequence of digits (not reduced modulo 10).
#[inline]
pub fn checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                doubled_digit_sum(digit)
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Generates the check digit for a partial card number.
///
/// Given digits without the check digit, computes the digit that makes the
/// full number pass [`validate`].
///
/// # Example
///
/// ```
/// use cardcheck::luhn::generate_check_digit;
///
/// // Visa test card without check digit
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Once the check digit is appended every index shifts by one, so the
    // digits doubled here are the ones at even reversed index.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                doubled_digit_sum(digit)
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
