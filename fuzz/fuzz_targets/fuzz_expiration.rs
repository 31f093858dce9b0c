//! Fuzz target for expiration parsing and validation.

#![no_main]

use arbitrary::Arbitrary;
use cardcheck::{CardError, CardNumber, Expiration};
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    year: i32,
    month: u32,
    now: i64,
}

fuzz_target!(|input: Input| {
    if let Ok(expiration) = input.text.parse::<Expiration>() {
        let _ = expiration.to_string();
        let _ = expiration.first_day();
    }

    let Some(now) = Utc.timestamp_opt(input.now, 0).single() else {
        return;
    };

    let mut card = match CardNumber::new("4111111111111111", None) {
        Ok(card) => card,
        Err(_) => return,
    };
    match card.set_expiration_at(input.year, input.month, &now) {
        Ok(()) => {
            let stored = card.expiration().unwrap();
            assert_eq!((stored.year(), stored.month()), (input.year, input.month));
            assert!(!stored.is_expired_at(&now));
            assert!(stored.months_until(&now) >= 0);
        }
        Err(CardError::InvalidCalendarDate { .. }) => {
            assert!(Expiration::new(input.year, input.month).is_err());
            assert!(card.expiration().is_none());
        }
        Err(CardError::ExpiredDate { .. }) => assert!(card.expiration().is_none()),
        Err(other) => panic!("unexpected error from set_expiration_at: {:?}", other),
    }
});
