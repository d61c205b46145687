//! Test card generation from patterns.
//!
//! This module turns one pattern into one [`CardRecord`]: the BIN's
//! wildcards are expanded, the number is padded or truncated to the length
//! its prefix implies, a Luhn check digit is appended, the brand is
//! classified, and any expiry or CVV the pattern leaves open is generated.
//!
//! # Example
//!
//! ```
//! use cc_generator::expiry::FixedClock;
//! use cc_generator::generate::CardGenerator;
//! use cc_generator::{is_valid_luhn, CardBrand};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let generator = CardGenerator::new().with_clock(FixedClock::new(2026, 10));
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let card = generator.generate("434769805926XXXX|10|2029|XXX", &mut rng).unwrap();
//! assert!(card.card_number().starts_with("434769805926"));
//! assert!(is_valid_luhn(card.card_number()));
//! assert_eq!(card.card_type(), CardBrand::Visa);
//! assert_eq!(card.month(), "10");
//! assert_eq!(card.year(), "29");
//! ```
//!
//! # Security Note
//!
//! Generated card numbers are mathematically valid (pass Luhn) but are not
//! connected to real accounts. They should only be used for testing.

use crate::card::{CardBrand, CardRecord};
use crate::cvv::resolve_cvv;
use crate::detect::classify;
use crate::error::GenerationError;
use crate::expiry::{resolve_expiry, Clock, SystemClock};
use crate::luhn;
use crate::pattern::{parse_pattern, Pattern};
use crate::wildcard::{expand_wildcards, random_digits};
use rand::Rng;

/// Behaviour switches for [`CardGenerator`].
///
/// The defaults reproduce the classic behaviour: a pattern that supplies
/// only one of month/year gets a fully random expiry, and a literal CVV is
/// used exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorOptions {
    /// Keep a lone month or year instead of discarding it.
    pub honor_partial_expiry: bool,
    /// Check literal CVVs against the brand length, like wildcard CVVs.
    pub validate_literal_cvv: bool,
}

/// Card generator builder.
///
/// Holds the options and the clock; the random source is passed to each
/// call so results are reproducible with a seeded RNG.
#[derive(Debug, Clone)]
pub struct CardGenerator<C = SystemClock> {
    options: GeneratorOptions,
    clock: C,
}

impl CardGenerator<SystemClock> {
    /// Creates a generator using the system clock and default options.
    pub fn new() -> Self {
        Self {
            options: GeneratorOptions::default(),
            clock: SystemClock,
        }
    }
}

impl Default for CardGenerator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CardGenerator<C> {
    /// Replaces the clock used for "current year/month".
    pub fn with_clock<D: Clock>(self, clock: D) -> CardGenerator<D> {
        CardGenerator {
            options: self.options,
            clock,
        }
    }

    /// Replaces all options at once.
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Keeps a lone month or year from the pattern.
    pub fn honor_partial_expiry(mut self, enabled: bool) -> Self {
        self.options.honor_partial_expiry = enabled;
        self
    }

    /// Validates literal CVVs against the brand length.
    pub fn validate_literal_cvv(mut self, enabled: bool) -> Self {
        self.options.validate_literal_cvv = enabled;
        self
    }

    /// Returns the current options.
    #[inline]
    pub fn options(&self) -> GeneratorOptions {
        self.options
    }

    /// Returns the clock.
    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Generates one card from a raw pattern.
    ///
    /// Fails only if the pattern is empty, contains characters outside the
    /// accepted set, or has no BIN.
    pub fn generate<R: Rng>(&self, pattern: &str, rng: &mut R) -> Result<CardRecord, GenerationError> {
        let parsed = parse_pattern(pattern)?;
        self.generate_parsed(&parsed, rng)
    }

    /// Generates one card from an already parsed pattern.
    pub fn generate_parsed<R: Rng>(
        &self,
        pattern: &Pattern,
        rng: &mut R,
    ) -> Result<CardRecord, GenerationError> {
        pattern.check()?;

        let card_number = build_card_number(pattern.bin(), rng);
        let brand = classify(&card_number);

        let expiry = resolve_expiry(
            pattern.month(),
            pattern.year(),
            self.options.honor_partial_expiry,
            rng,
            &self.clock,
        );
        let cvv = resolve_cvv(
            pattern.cvv(),
            brand,
            self.options.validate_literal_cvv,
            rng,
        );

        tracing::debug!(
            brand = %brand,
            length = card_number.len(),
            expiry = %expiry,
            "generated card record"
        );

        Ok(CardRecord::new(
            card_number,
            expiry.month_str(),
            expiry.year_str(),
            cvv,
            brand,
        ))
    }
}

/// Returns the card length implied by the (expanded) BIN.
///
/// 15 for American Express prefixes (`34`, `37`), 14 for Diners Club
/// prefixes (`30`, `36`, `38`), 16 otherwise.
///
/// # Example
///
/// ```
/// use cc_generator::generate::target_length;
///
/// assert_eq!(target_length("37"), 15);
/// assert_eq!(target_length("3056"), 14);
/// assert_eq!(target_length("4"), 16);
/// ```
pub fn target_length(bin: &str) -> usize {
    match bin.get(..2) {
        Some("34" | "37") => 15,
        Some("30" | "36" | "38") => 14,
        _ => 16,
    }
}

/// Pads `bin` with random digits, or truncates it, to exactly `length`
/// characters. Truncation keeps the leading characters.
pub fn normalize_bin<R: Rng>(bin: &str, length: usize, rng: &mut R) -> String {
    let current = bin.chars().count();
    if current >= length {
        bin.chars().take(length).collect()
    } else {
        let mut normalized = String::with_capacity(length);
        normalized.push_str(bin);
        normalized.push_str(&random_digits(length - current, rng));
        normalized
    }
}

/// Expands, normalizes and Luhn-finalizes a BIN into a full card number.
fn build_card_number<R: Rng>(bin: &str, rng: &mut R) -> String {
    let expanded = expand_wildcards(bin, rng);
    let mut normalized = normalize_bin(&expanded, target_length(&expanded), rng);

    // A one-digit BIN only gets its two-digit prefix from padding
    let length = target_length(&normalized);
    if normalized.len() != length {
        normalized = normalize_bin(&normalized, length, rng);
    }

    let digits = luhn::digits_of(&normalized);
    let full = luhn::append_check_digit(&digits[..length - 1]);
    luhn::digits_to_string(&full)
}

/// Generates one card using the thread RNG and the system clock.
///
/// # Example
///
/// ```
/// use cc_generator::generate::generate_card;
/// use cc_generator::CardBrand;
///
/// let card = generate_card("5500000000000000").unwrap();
/// assert_eq!(card.card_type(), CardBrand::Mastercard);
/// assert_eq!(card.card_number(), "5500000000000004");
/// ```
pub fn generate_card(pattern: &str) -> Result<CardRecord, GenerationError> {
    CardGenerator::new().generate(pattern, &mut rand::thread_rng())
}

/// Generates one card with a caller-supplied RNG and the system clock.
pub fn generate_card_with_rng<R: Rng>(
    pattern: &str,
    rng: &mut R,
) -> Result<CardRecord, GenerationError> {
    CardGenerator::new().generate(pattern, rng)
}

/// Returns the brand a BIN will classify as once it is finalized.
///
/// Wildcards in the first positions make the answer random, so this only
/// looks at the literal leading digits.
pub fn brand_for_bin(bin: &str) -> CardBrand {
    let literal: String = bin.chars().take_while(|c| c.is_ascii_digit()).collect();
    classify(&literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::FixedClock;
    use crate::is_valid_luhn;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> CardGenerator<FixedClock> {
        CardGenerator::new().with_clock(FixedClock::new(2026, 10))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2026)
    }

    #[test]
    fn test_target_length() {
        assert_eq!(target_length("34"), 15);
        assert_eq!(target_length("371449"), 15);
        assert_eq!(target_length("30"), 14);
        assert_eq!(target_length("36"), 14);
        assert_eq!(target_length("38"), 14);
        assert_eq!(target_length("35"), 16);
        assert_eq!(target_length("3"), 16);
        assert_eq!(target_length(""), 16);
    }

    #[test]
    fn test_normalize_bin() {
        let mut rng = rng();
        let padded = normalize_bin("4111", 16, &mut rng);
        assert_eq!(padded.len(), 16);
        assert!(padded.starts_with("4111"));
        assert!(padded.bytes().all(|b| b.is_ascii_digit()));

        assert_eq!(normalize_bin("41111111111111119999", 16, &mut rng), "4111111111111111");
        assert_eq!(normalize_bin("1234", 4, &mut rng), "1234");
    }

    #[test]
    fn test_generate_visa_literal_is_unchanged() {
        let card = generator().generate("4111111111111111", &mut rng()).unwrap();
        assert_eq!(card.card_number(), "4111111111111111");
        assert_eq!(card.card_type(), CardBrand::Visa);
        assert_eq!(card.cvv().len(), 3);
    }

    #[test]
    fn test_generate_mastercard() {
        let card = generator().generate("5500000000000000", &mut rng()).unwrap();
        assert_eq!(card.card_type(), CardBrand::Mastercard);
        assert_eq!(card.card_number(), "5500000000000004");
    }

    #[test]
    fn test_generate_amex() {
        let card = generator().generate("340000000000000", &mut rng()).unwrap();
        assert_eq!(card.length(), 15);
        assert_eq!(card.card_number(), "340000000000009");
        assert_eq!(card.card_type(), CardBrand::Amex);
        assert_eq!(card.cvv().len(), 4);
    }

    #[test]
    fn test_generate_diners_is_14_digits() {
        let card = generator().generate("36XXXX", &mut rng()).unwrap();
        assert_eq!(card.length(), 14);
        assert_eq!(card.card_type(), CardBrand::DinersClub);
        assert!(is_valid_luhn(card.card_number()));
    }

    #[test]
    fn test_generate_truncates_long_bin() {
        let card = generator()
            .generate("4111111111111111222233", &mut rng())
            .unwrap();
        assert_eq!(card.card_number(), "4111111111111111");
    }

    #[test]
    fn test_generate_full_pattern() {
        let card = generator()
            .generate("434769805926XXXX|10|2029|XXX", &mut rng())
            .unwrap();
        assert!(card.card_number().starts_with("434769805926"));
        assert!(is_valid_luhn(card.card_number()));
        assert_eq!(card.month(), "10");
        assert_eq!(card.year(), "29");
        assert_eq!(card.cvv().len(), 3);
        assert_eq!(
            card.formatted(),
            format!("{}|10|29|{}", card.card_number(), card.cvv())
        );
    }

    #[test]
    fn test_generate_literal_cvv_verbatim() {
        let card = generator().generate("4111|12|30|12345", &mut rng()).unwrap();
        assert_eq!(card.cvv(), "12345");

        let strict = generator().validate_literal_cvv(true);
        let card = strict.generate("4111|12|30|12345", &mut rng()).unwrap();
        assert_eq!(card.cvv().len(), 3);
    }

    #[test]
    fn test_generate_lone_month_discarded_by_default() {
        let gen = generator();
        let mut rng = rng();
        let months: std::collections::HashSet<_> = (0..50)
            .map(|_| gen.generate("4111|07", &mut rng).unwrap().month().to_string())
            .collect();
        // The supplied month is thrown away along with the missing year
        assert!(months.len() > 1);
    }

    #[test]
    fn test_generate_lone_month_honored_when_enabled() {
        let gen = generator().honor_partial_expiry(true);
        let card = gen.generate("4111|07", &mut rng()).unwrap();
        assert_eq!(card.month(), "07");
    }

    #[test]
    fn test_generate_is_reproducible() {
        let gen = generator();
        let a = gen.generate("5XXXXXXXXXXXXXXX|XX|XX|XXX", &mut rng()).unwrap();
        let b = gen.generate("5XXXXXXXXXXXXXXX|XX|XX|XXX", &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_rejects_bad_patterns() {
        let gen = generator();
        let mut rng = rng();
        assert_eq!(gen.generate("", &mut rng), Err(GenerationError::EmptyPattern));
        assert_eq!(gen.generate("|||", &mut rng), Err(GenerationError::MissingBin));
        assert!(matches!(
            gen.generate("4111 abc", &mut rng),
            Err(GenerationError::InvalidCharacter { character: 'a', .. })
        ));
    }

    #[test]
    fn test_generate_parsed_rechecks_pattern() {
        let pattern = crate::pattern::parse("41z1");
        assert!(generator().generate_parsed(&pattern, &mut rng()).is_err());
    }

    #[test]
    fn test_generated_numbers_always_valid() {
        let gen = generator();
        let mut rng = rng();
        for pattern in ["X", "XX", "34", "37XX", "30", "6011", "XXXXXXXXXXXXXXXXXXXX", "5*"] {
            for _ in 0..20 {
                let card = gen.generate(pattern, &mut rng).unwrap();
                let expected = target_length(card.card_number());
                assert_eq!(card.length(), expected, "{}", card);
                assert!(is_valid_luhn(card.card_number()), "{}", card);
            }
        }
    }

    #[test]
    fn test_single_digit_bin_length_follows_padded_prefix() {
        let gen = generator();
        let mut rng = rng();
        for _ in 0..200 {
            let card = gen.generate("3", &mut rng).unwrap();
            assert_eq!(card.length(), target_length(card.card_number()), "{}", card);
            assert!(is_valid_luhn(card.card_number()));
        }
    }

    #[test]
    fn test_options_builder() {
        let gen = CardGenerator::new()
            .honor_partial_expiry(true)
            .validate_literal_cvv(true);
        assert_eq!(
            gen.options(),
            GeneratorOptions {
                honor_partial_expiry: true,
                validate_literal_cvv: true,
            }
        );

        let gen = gen.with_options(GeneratorOptions::default());
        assert_eq!(gen.options(), GeneratorOptions::default());
    }

    #[test]
    fn test_default_generator() {
        let gen = CardGenerator::default();
        assert_eq!(gen.options(), GeneratorOptions::default());
        let card = gen.generate("4111111111111111", &mut rng()).unwrap();
        assert_eq!(card.card_number(), "4111111111111111");
    }

    #[test]
    fn test_brand_for_bin() {
        assert_eq!(brand_for_bin("37XXXX"), CardBrand::Amex);
        assert_eq!(brand_for_bin("X4"), CardBrand::Unknown);
        assert_eq!(brand_for_bin("5019"), CardBrand::Dankort);
    }
}
