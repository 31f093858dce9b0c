//! Card number generation for testing purposes.
//!
//! Generated numbers pass the Luhn check and carry a prefix of the requested
//! network. They are not connected to real accounts.
//!
//! # Example
//!
//! ```
//! use cardcheck::generate::{generate_deterministic, generate_with_prefix};
//! use cardcheck::{is_valid, CardType};
//!
//! let number = generate_deterministic(CardType::Visa);
//! assert!(number.starts_with('4'));
//! assert!(is_valid(&number));
//!
//! // Any prefix and length, as long as the prefix leaves room for a check digit
//! let number = generate_with_prefix("6759", 17).unwrap();
//! assert_eq!(number.len(), 17);
//! assert!(generate_with_prefix("6759", 4).is_none());
//! ```

use crate::luhn;
use crate::CardType;

#[cfg(feature = "generate")]
use rand::Rng;

/// Returns the default prefix for a card network.
pub const fn prefix_for(card_type: CardType) -> &'static str {
    match card_type {
        CardType::Visa => "4",
        CardType::Mastercard => "51",
        CardType::Amex => "34",
        CardType::Maestro => "50",
    }
}

/// Returns the default total length for a card network.
pub const fn default_length(card_type: CardType) -> usize {
    match card_type {
        CardType::Visa => 16,
        CardType::Mastercard => 16,
        CardType::Amex => 15,
        CardType::Maestro => 16,
    }
}

fn prefix_digits(prefix: &str, length: usize) -> Option<Vec<u8>> {
    if prefix.len() >= length || !crate::format::is_digit_string(prefix) {
        return None;
    }
    let mut digits = Vec::with_capacity(length);
    digits.extend(prefix.bytes().map(|b| b - b'0'));
    Some(digits)
}

fn finish(mut digits: Vec<u8>) -> String {
    let check_digit = luhn::generate_check_digit(&digits);
    digits.push(check_digit);
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

/// Generates a valid card number deterministically (no randomness).
///
/// The same network always yields the same number.
pub fn generate_deterministic(card_type: CardType) -> String {
    let prefix = prefix_for(card_type);
    let length = default_length(card_type);
    generate_with_prefix(prefix, length).unwrap_or_default()
}

/// Generates a Luhn-valid number of `length` digits starting with `prefix`.
///
/// Middle digits are zeros. Returns `None` if `prefix` is not a digit string
/// or leaves no room for the check digit.
pub fn generate_with_prefix(prefix: &str, length: usize) -> Option<String> {
    let mut digits = prefix_digits(prefix, length)?;
    digits.resize(length - 1, 0);
    Some(finish(digits))
}

/// Generates a valid card number for the network using random digits.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate(card_type: CardType) -> String {
    let mut rng = rand::thread_rng();
    generate_random_with_rng(prefix_for(card_type), default_length(card_type), &mut rng)
        .unwrap_or_default()
}

/// Generates a Luhn-valid number with random middle digits.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_random_with_prefix(prefix: &str, length: usize) -> Option<String> {
    let mut rng = rand::thread_rng();
    generate_random_with_rng(prefix, length, &mut rng)
}

/// Generates a Luhn-valid number using a provided RNG.
///
/// Useful for reproducible test generation with seeded RNGs.
#[cfg(feature = "generate")]
pub fn generate_random_with_rng<R: Rng>(
    prefix: &str,
    length: usize,
    rng: &mut R,
) -> Option<String> {
    let mut digits = prefix_digits(prefix, length)?;
    while digits.len() < length - 1 {
        digits.push(rng.gen_range(0..10));
    }
    Some(finish(digits))
}
