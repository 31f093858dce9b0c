//! Fuzz target for card validation.
//!
//! Checks that validation never panics and that the error order holds.

#![no_main]

use cardcheck::{is_valid, passes_luhn, validate, CardError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let result = validate(data);
    assert_eq!(is_valid(data), result.is_ok());

    let all_digits = data.bytes().all(|b| b.is_ascii_digit());
    match result {
        Ok(card) => {
            assert!(all_digits);
            assert_eq!(card.number(), data);
            assert!(!format!("{:?}", card).contains(data) || data.len() <= 4);
        }
        Err(CardError::InvalidFormat { .. }) => assert!(!all_digits),
        Err(CardError::InvalidChecksum) => assert!(all_digits && !passes_luhn(data)),
        Err(CardError::UnclassifiedCardNetwork) => assert!(passes_luhn(data)),
        Err(other) => panic!("unexpected error from validate: {:?}", other),
    }
});
