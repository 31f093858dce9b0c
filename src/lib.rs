//! # cardcheck
//!
//! Payment card number validation and classification.
//!
//! ## Features
//!
//! - Strict format check: the input must be a bare ASCII digit string
//! - Luhn checksum validation
//! - Network classification (Visa, MasterCard, American Express, Maestro)
//! - Expiration month validation against a reference instant
//! - Masked `Debug`/`Display`, zeroized memory
//!
//! ## Quick Start
//!
//! ```rust
//! use cardcheck::{validate, is_valid, CardType};
//!
//! let card = validate("4111111111111111").unwrap();
//! assert_eq!(card.card_type(), CardType::Visa);
//! assert_eq!(card.number(), "4111111111111111");
//!
//! // Safe for logging - never exposes full card number
//! println!("Card: {}", card); // "visa ****-****-****-1111"
//!
//! assert!(is_valid("340000000000009"));
//! assert!(!is_valid("4111111111111112"));
//! assert!(!is_valid("4111 1111 1111 1111"));
//! ```
//!
//! ## Security Code and Expiration
//!
//! ```rust
//! use cardcheck::{CardError, CardNumber};
//! use chrono::{TimeZone, Utc};
//!
//! let mut card = CardNumber::new("5500000000000004", Some("123")).unwrap();
//! assert_eq!(card.security_code(), Some("123"));
//!
//! let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
//! card.set_expiration_at(2028, 4, &now).unwrap();
//!
//! assert_eq!(
//!     card.set_expiration_at(2028, 13, &now),
//!     Err(CardError::InvalidCalendarDate { year: 2028, month: 13 })
//! );
//! assert_eq!(card.expiration().unwrap().to_string(), "04/2028");
//!
//! let record = card.to_record();
//! assert_eq!(record.card_type.as_str(), "mastercard");
//! ```
//!
//! ## Supported Networks
//!
//! Rules are evaluated in this order; when several match, the last one wins.
//!
//! | Network | Prefix | Length |
//! |---------|--------|--------|
//! | Visa | 4 | 13, 16 |
//! | MasterCard | 51-55 | 16 |
//! | American Express | 34, 37 | 15 |
//! | Maestro | 50, 56-58, 6 (several branches) | 12-20 |
//!
//! See [`network::RULES`] for the full table.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize` for records, expirations and card types |
//! | `json` | `serde` plus `serde_json` |
//! | `generate` | Random test number generation |
//! | `cli` | Command-line tool |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod error;
pub mod expiration;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod network;
pub mod validate;

// Re-export main types at crate root
pub use card::{CardNumber, CardRecord};
pub use error::CardError;
pub use expiration::{Expiration, ParseExpirationError};
pub use network::CardType;
pub use validate::{is_valid, passes_luhn, validate, validate_with_security_code};

#[cfg(test)]
mod tests {
    use super::*;

    // Standard test card numbers from payment processors
    const VISA_16: &str = "4111111111111111";
    const VISA_13: &str = "4222222222222";
    const MASTERCARD: &str = "5500000000000004";
    const MASTERCARD_2: &str = "5105105105105100";
    const AMEX: &str = "378282246310005";
    const AMEX_2: &str = "340000000000009";

    #[test]
    fn test_visa_validation() {
        let card = validate(VISA_16).unwrap();
        assert_eq!(card.card_type(), CardType::Visa);
        assert_eq!(card.len(), 16);

        let card = validate(VISA_13).unwrap();
        assert_eq!(card.card_type(), CardType::Visa);
        assert_eq!(card.len(), 13);
    }

    #[test]
    fn test_mastercard_validation() {
        assert_eq!(validate(MASTERCARD).unwrap().card_type(), CardType::Mastercard);
        assert_eq!(validate(MASTERCARD_2).unwrap().card_type(), CardType::Mastercard);
    }

    #[test]
    fn test_amex_validation() {
        assert_eq!(validate(AMEX).unwrap().card_type(), CardType::Amex);
        assert_eq!(validate(AMEX_2).unwrap().card_type(), CardType::Amex);
    }

    #[test]
    fn test_invalid_character() {
        let err = validate("4111-1111-1111-1111").unwrap_err();
        assert_eq!(
            err,
            CardError::InvalidFormat {
                position: 4,
                character: '-'
            }
        );
    }

    #[test]
    fn test_unclassified() {
        // Discover passes Luhn but belongs to no supported network
        assert_eq!(
            validate("6011111111111117").unwrap_err(),
            CardError::UnclassifiedCardNetwork
        );
    }

    #[test]
    fn test_thread_safety() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardNumber>();
        assert_send_sync::<CardError>();
        assert_send_sync::<CardType>();
        assert_send_sync::<Expiration>();
    }
}
