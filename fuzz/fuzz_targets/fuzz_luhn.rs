//! Fuzz target for the Luhn algorithm.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use cardcheck::{luhn, network};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Clamp values to valid digit range
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();

    assert_eq!(luhn::validate(&digits), luhn::checksum(&digits) % 10 == 0);

    let check = luhn::generate_check_digit(&digits);
    assert!(check <= 9, "Check digit should be 0-9");

    let mut with_check = digits.clone();
    with_check.push(check);
    assert!(luhn::validate(&with_check), "Adding check digit should make valid");

    // Classification is the last matching rule
    let last = network::matching_rules(&digits).last().map(|r| r.network());
    assert_eq!(network::classify(&digits), last);
});
