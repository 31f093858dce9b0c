//! Error types for card number validation.
//!
//! Every variant is an ordinary rejected-input outcome. None of them signal a
//! system fault and none are worth retrying with the same input.

use std::fmt;

/// Errors that can occur while validating a card number or its expiration.
///
/// The construction path reports at most one of `InvalidFormat`,
/// `InvalidChecksum` or `UnclassifiedCardNetwork`, checked in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// The input contains a character other than an ASCII digit.
    ///
    /// Nothing is stripped before the check, so spaces and dashes are
    /// rejected too.
    InvalidFormat {
        /// Character position of the first offending character (0-indexed).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// The digit string failed the Luhn checksum.
    InvalidChecksum,

    /// The digit string matched no known card network.
    UnclassifiedCardNetwork,

    /// The year/month pair is not a real calendar month.
    InvalidCalendarDate {
        /// The supplied year.
        year: i32,
        /// The supplied month.
        month: u32,
    },

    /// The year/month pair lies before the reference month.
    ExpiredDate {
        /// The supplied year.
        year: i32,
        /// The supplied month.
        month: u32,
    },
}

impl CardError {
    /// Returns a stable, snake-case label for the error kind.
    ///
    /// Useful for logs and machine-readable output where the `Display`
    /// message is too chatty.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "invalid_format",
            Self::InvalidChecksum => "invalid_checksum",
            Self::UnclassifiedCardNetwork => "unclassified_card_network",
            Self::InvalidCalendarDate { .. } => "invalid_calendar_date",
            Self::ExpiredDate { .. } => "expired_date",
        }
    }

    /// Returns true for errors raised while attaching an expiration.
    pub const fn is_expiration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCalendarDate { .. } | Self::ExpiredDate { .. }
        )
    }
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat {
                position,
                character,
            } => {
                write!(
                    f,
                    "card number must consist only of digits [0-9]: found '{}' at position {}",
                    character.escape_default(),
                    position
                )
            }

            Self::InvalidChecksum => {
                write!(f, "invalid card number (Luhn check failed)")
            }

            Self::UnclassifiedCardNetwork => {
                write!(f, "card number does not belong to a known card network")
            }

            Self::InvalidCalendarDate { year, month } => {
                write!(f, "invalid expiration date: {}-{:02} is not a calendar month", year, month)
            }

            Self::ExpiredDate { year, month } => {
                write!(f, "expiration date {}-{:02} is in the past", year, month)
            }
        }
    }
}

impl std::error::Error for CardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CardError::InvalidFormat {
                position: 4,
                character: '-'
            }
            .to_string(),
            "card number must consist only of digits [0-9]: found '-' at position 4"
        );

        assert_eq!(
            CardError::InvalidChecksum.to_string(),
            "invalid card number (Luhn check failed)"
        );

        assert_eq!(
            CardError::InvalidCalendarDate {
                year: 2030,
                month: 13
            }
            .to_string(),
            "invalid expiration date: 2030-13 is not a calendar month"
        );

        assert_eq!(
            CardError::ExpiredDate {
                year: 2020,
                month: 1
            }
            .to_string(),
            "expiration date 2020-01 is in the past"
        );
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let msg = CardError::InvalidFormat {
            position: 0,
            character: '\n',
        }
        .to_string();
        assert!(msg.contains("'\\n'"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(CardError::InvalidChecksum.kind(), "invalid_checksum");
        assert_eq!(
            CardError::UnclassifiedCardNetwork.kind(),
            "unclassified_card_network"
        );
        assert!(CardError::ExpiredDate { year: 2020, month: 1 }.is_expiration_error());
        assert!(!CardError::InvalidChecksum.is_expiration_error());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardError>();
    }
}
