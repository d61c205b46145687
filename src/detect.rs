//! Card brand classification using ordered BIN prefix rules.
//!
//! The rules live in [`BRAND_RULES`] and are evaluated top to bottom; the
//! first rule whose prefix matches wins. Order matters: the two-digit Amex,
//! Diners Club and JCB rules are checked before looser numeric ranges that
//! could coincidentally match the same prefix.
//!
//! Classification is a pure function of the number's leading digits.

use crate::card::CardBrand;
use crate::luhn;

/// A prefix predicate used by a [`BrandRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixMatch {
    /// The number starts with this exact prefix.
    Exact(&'static str),
    /// The number starts with any of these prefixes.
    OneOf(&'static [&'static str]),
    /// The first `len` digits, read as an integer, fall within `low..=high`.
    Range {
        /// Number of leading digits to compare.
        len: usize,
        /// Lower bound (inclusive).
        low: u32,
        /// Upper bound (inclusive).
        high: u32,
    },
}

impl PrefixMatch {
    /// Returns true if the card number satisfies this predicate.
    ///
    /// A prefix longer than the number never matches.
    pub fn matches(&self, number: &str) -> bool {
        match *self {
            Self::Exact(prefix) => number.starts_with(prefix),
            Self::OneOf(prefixes) => prefixes.iter().any(|p| number.starts_with(p)),
            Self::Range { len, low, high } => number
                .get(..len)
                .filter(|head| head.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|head| head.parse::<u32>().ok())
                .is_some_and(|value| (low..=high).contains(&value)),
        }
    }
}

/// Maps a prefix predicate to a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandRule {
    /// The predicate to test.
    pub matcher: PrefixMatch,
    /// The brand assigned on match.
    pub brand: CardBrand,
}

const fn rule(matcher: PrefixMatch, brand: CardBrand) -> BrandRule {
    BrandRule { matcher, brand }
}

/// Classification rules in priority order.
///
/// Every Visa Electron prefix starts with `4`, so that rule is shadowed by
/// Visa. It stays in the table so the order stays reproducible.
pub const BRAND_RULES: &[BrandRule] = &[
    rule(PrefixMatch::Exact("4"), CardBrand::Visa),
    rule(
        PrefixMatch::OneOf(&["51", "52", "53", "54", "55"]),
        CardBrand::Mastercard,
    ),
    rule(
        PrefixMatch::Range {
            len: 4,
            low: 2221,
            high: 2720,
        },
        CardBrand::Mastercard,
    ),
    rule(PrefixMatch::OneOf(&["34", "37"]), CardBrand::Amex),
    rule(PrefixMatch::Exact("6011"), CardBrand::Discover),
    rule(PrefixMatch::Exact("65"), CardBrand::Discover),
    rule(
        PrefixMatch::Range {
            len: 6,
            low: 644_000,
            high: 649_999,
        },
        CardBrand::Discover,
    ),
    rule(PrefixMatch::OneOf(&["30", "36", "38"]), CardBrand::DinersClub),
    rule(PrefixMatch::Exact("35"), CardBrand::Jcb),
    rule(PrefixMatch::Exact("5019"), CardBrand::Dankort),
    rule(
        PrefixMatch::OneOf(&["4026", "4175", "4405", "4508", "4844", "4913", "4917"]),
        CardBrand::VisaElectron,
    ),
];

/// Returns the first rule matching the card number, if any.
pub fn rule_for(card_number: &str) -> Option<&'static BrandRule> {
    BRAND_RULES.iter().find(|r| r.matcher.matches(card_number))
}

/// Classifies a card number into a brand.
///
/// # Example
///
/// ```
/// use cc_generator::detect::classify;
/// use cc_generator::CardBrand;
///
/// assert_eq!(classify("4111111111111111"), CardBrand::Visa);
/// assert_eq!(classify("2221000000000009"), CardBrand::Mastercard);
/// assert_eq!(classify("378282246310005"), CardBrand::Amex);
/// assert_eq!(classify("9999999999999995"), CardBrand::Unknown);
/// ```
#[inline]
pub fn classify(card_number: &str) -> CardBrand {
    rule_for(card_number)
        .map(|r| r.brand)
        .unwrap_or(CardBrand::Unknown)
}

/// Classifies a sequence of digit values (0-9).
pub fn detect_brand(digits: &[u8]) -> CardBrand {
    classify(&luhn::digits_to_string(digits))
}
