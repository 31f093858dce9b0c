//! Card network classification using prefix and length rules.
//!
//! Each rule pairs a head (one constraint per leading digit) with the range
//! of digit counts allowed after it. Rules are grouped per network and
//! evaluated in a fixed order: Visa, MasterCard, American Express, Maestro.
//!
//! Every rule is evaluated and the *last* matching rule decides the network.
//! The order therefore acts as a tie-break: a number matched by both a Visa
//! and a Maestro rule would be reported as Maestro.
//!
//! The Maestro rules keep their historical branch structure, including
//! branches that overlap (a `6759…` number matches both the `67[^67]` and
//! the `6759` branches). Do not merge them without an exact-vector test run.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Card networks recognised by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CardType {
    /// Visa - Prefix 4, lengths 13, 16
    Visa,
    /// MasterCard - Prefix 51-55, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Maestro - Prefixes 50, 56-58 and most of 6, lengths 12-20
    Maestro,
}

impl CardType {
    /// All networks in classification order.
    pub const ALL: [CardType; 4] = [Self::Visa, Self::Mastercard, Self::Amex, Self::Maestro];

    /// Returns the lowercase identifier used in records (`"visa"`, `"amex"`, ...).
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Maestro => "maestro",
        }
    }

    /// Returns a human-readable name for the network.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "MasterCard",
            Self::Amex => "American Express",
            Self::Maestro => "Maestro",
        }
    }

    /// Returns the classification rules belonging to this network.
    pub fn rules(&self) -> impl Iterator<Item = &'static NetworkRule> + '_ {
        RULES.iter().filter(move |rule| rule.network == *self)
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown network identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCardType(pub String);

impl fmt::Display for UnknownCardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown card type '{}' (expected visa, mastercard, amex or maestro)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCardType {}

impl FromStr for CardType {
    type Err = UnknownCardType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCardType(s.to_string()))
    }
}

/// Constraint on a single leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitClass {
    /// Exactly this digit.
    Is(u8),
    /// Any digit in the inclusive range.
    Between(u8, u8),
    /// Any of the listed digits.
    OneOf(&'static [u8]),
    /// Any digit except the listed ones.
    NoneOf(&'static [u8]),
}

impl DigitClass {
    #[inline]
    fn matches(&self, digit: u8) -> bool {
        match *self {
            Self::Is(d) => digit == d,
            Self::Between(lo, hi) => (lo..=hi).contains(&digit),
            Self::OneOf(set) => set.contains(&digit),
            Self::NoneOf(set) => !set.contains(&digit),
        }
    }
}

/// One prefix/length rule of the classification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRule {
    network: CardType,
    head: &'static [DigitClass],
    tail: RangeInclusive<usize>,
}

impl NetworkRule {
    const fn new(
        network: CardType,
        head: &'static [DigitClass],
        tail: RangeInclusive<usize>,
    ) -> Self {
        Self {
            network,
            head,
            tail,
        }
    }

    /// The network this rule assigns.
    #[inline]
    pub const fn network(&self) -> CardType {
        self.network
    }

    /// Total digit counts accepted by this rule.
    pub fn lengths(&self) -> RangeInclusive<usize> {
        self.tail.start() + self.head.len()..=self.tail.end() + self.head.len()
    }

    /// Returns true if `digits` (values 0-9) satisfy this rule.
    pub fn matches(&self, digits: &[u8]) -> bool {
        if digits.len() < self.head.len() {
            return false;
        }

        let (head, tail) = digits.split_at(self.head.len());
        self.tail.contains(&tail.len())
            && self
                .head
                .iter()
                .zip(head)
                .all(|(class, &digit)| class.matches(digit))
    }
}

use CardType::{Amex, Maestro, Mastercard, Visa};
use DigitClass::{Between, Is, NoneOf, OneOf};

const HEAD_6333_LOW: &[DigitClass] = &[Is(6), Is(3), Is(3), Is(3), Between(0, 4)];
const HEAD_6333_HIGH: &[DigitClass] = &[Is(6), Is(3), Is(3), Is(3), Between(5, 9)];
const HEAD_6334_LOW: &[DigitClass] = &[Is(6), Is(3), Is(3), Is(4), Between(0, 4)];
const HEAD_6759: &[DigitClass] = &[Is(6), Is(7), Is(5), Is(9)];
const HEAD_6767: &[DigitClass] = &[Is(6), Is(7), Is(6), Is(7)];

/// The ordered classification table.
pub static RULES: &[NetworkRule] = &[
    // Visa: 4 followed by 12 digits, optionally 3 more
    NetworkRule::new(Visa, &[Is(4)], 12..=12),
    NetworkRule::new(Visa, &[Is(4)], 15..=15),
    // MasterCard: 51-55, 16 digits
    NetworkRule::new(Mastercard, &[Is(5), Between(1, 5)], 14..=14),
    // American Express: 34 or 37, 15 digits
    NetworkRule::new(Amex, &[Is(3), OneOf(&[4, 7])], 13..=13),
    // Maestro
    NetworkRule::new(Maestro, &[Is(5), OneOf(&[0, 6, 7, 8])], 11..=18),
    NetworkRule::new(Maestro, &[Is(6), NoneOf(&[0, 3, 5, 7])], 11..=18),
    NetworkRule::new(Maestro, &[Is(6), Is(0), Is(1), NoneOf(&[1])], 9..=16),
    NetworkRule::new(Maestro, &[Is(6), Is(0), Is(1), Is(1)], 9..=11),
    NetworkRule::new(Maestro, &[Is(6), Is(0), Is(1), Is(1)], 13..=16),
    NetworkRule::new(Maestro, &[Is(6), Is(5)], 11..=13),
    NetworkRule::new(Maestro, &[Is(6), Is(5)], 15..=18),
    NetworkRule::new(Maestro, &[Is(6), Is(3), Is(3), NoneOf(&[3, 4])], 9..=16),
    NetworkRule::new(Maestro, HEAD_6333_LOW, 8..=10),
    NetworkRule::new(Maestro, HEAD_6333_LOW, 12..=12),
    NetworkRule::new(Maestro, HEAD_6333_LOW, 15..=15),
    NetworkRule::new(Maestro, HEAD_6333_HIGH, 8..=10),
    NetworkRule::new(Maestro, HEAD_6333_HIGH, 12..=12),
    NetworkRule::new(Maestro, HEAD_6333_HIGH, 15..=15),
    NetworkRule::new(Maestro, HEAD_6334_LOW, 8..=10),
    NetworkRule::new(Maestro, HEAD_6334_LOW, 12..=12),
    NetworkRule::new(Maestro, HEAD_6334_LOW, 15..=15),
    NetworkRule::new(Maestro, &[Is(6), Is(7), NoneOf(&[5, 9])], 9..=16),
    NetworkRule::new(Maestro, HEAD_6759, 9..=11),
    NetworkRule::new(Maestro, HEAD_6759, 13..=13),
    NetworkRule::new(Maestro, HEAD_6759, 16..=16),
    NetworkRule::new(Maestro, &[Is(6), Is(7), NoneOf(&[6, 7])], 9..=16),
    NetworkRule::new(Maestro, HEAD_6767, 9..=11),
    NetworkRule::new(Maestro, HEAD_6767, 13..=13),
    NetworkRule::new(Maestro, HEAD_6767, 16..=16),
];

/// Classifies a digit sequence into a card network.
///
/// Evaluates every rule of [`RULES`] in order and returns the network of the
/// last one that matched.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9) representing the card number.
///
/// # Example
///
/// ```
/// use cardcheck::network::{classify, CardType};
///
/// let visa = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(classify(&visa), Some(CardType::Visa));
///
/// // 4 followed by 13 more digits is neither 13 nor 16 long
/// let odd = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(classify(&odd), None);
/// ```
pub fn classify(digits: &[u8]) -> Option<CardType> {
    let mut card_type = None;
    for rule in RULES.iter() {
        if rule.matches(digits) {
            card_type = Some(rule.network);
        }
    }
    card_type
}

/// Returns every rule that matches `digits`, in table order.
pub fn matching_rules(digits: &[u8]) -> impl Iterator<Item = &'static NetworkRule> + '_ {
    RULES.iter().filter(move |rule| rule.matches(digits))
}
