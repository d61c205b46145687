//! Property-based tests using proptest.
//!
//! These tests check invariants that must hold for every pattern, which
//! catches edge cases that hand-picked examples miss.

use cc_generator::{
    classify, export, is_valid_luhn, luhn,
    export::group_card_number,
    generate::target_length,
    pattern::{parse, parse_pattern, SEPARATORS},
    wildcard::{expand_wildcards, WILDCARDS},
    CardBrand, CardGenerator, ExportFormat, FixedClock, GenerationError,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a given length.
fn digit_string(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a BIN made of digits and wildcards.
fn bin_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            3 => prop::char::range('0', '9'),
            1 => prop::sample::select(WILDCARDS.to_vec()),
        ],
        1..=20,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a short field of digits and wildcards (month, year, CVV).
fn field_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            prop::char::range('0', '9'),
            prop::sample::select(WILDCARDS.to_vec()),
        ],
        1..=4,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a complete pattern with zero to three trailing fields.
fn pattern_strategy() -> impl Strategy<Value = String> {
    (
        bin_strategy(),
        proptest::collection::vec(field_strategy(), 0..=3),
        prop::sample::select(SEPARATORS.to_vec()),
    )
        .prop_map(|(bin, fields, separator)| {
            let mut pattern = bin;
            for field in fields {
                pattern.push(separator);
                pattern.push_str(&field);
            }
            pattern
        })
}

fn generator() -> CardGenerator<FixedClock> {
    CardGenerator::new().with_clock(FixedClock::new(2026, 10))
}

// =============================================================================
// LUHN PROPERTIES
// =============================================================================

proptest! {
    /// Property: Appending a check digit always yields a Luhn-valid number.
    #[test]
    fn check_digit_round_trip(payload in digit_string(15)) {
        let digits = luhn::digits_of(&payload);
        let full = luhn::append_check_digit(&digits);
        prop_assert!(luhn::validate(&full));
    }

    /// Property: Round trip holds for any payload length.
    #[test]
    fn check_digit_round_trip_any_length(len in 1usize..=30, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let payload = cc_generator::wildcard::random_digits(len, &mut rng);
        let full = luhn::append_check_digit(&luhn::digits_of(&payload));
        prop_assert_eq!(full.len(), len + 1);
        prop_assert!(luhn::validate(&full));
    }

    /// Property: Exactly one check digit in 0-9 makes a payload valid.
    #[test]
    fn check_digit_is_unique(payload in digit_string(14)) {
        let digits = luhn::digits_of(&payload);
        let valid = (0..10u8)
            .filter(|&d| {
                let mut full = digits.clone();
                full.push(d);
                luhn::validate(&full)
            })
            .count();
        prop_assert_eq!(valid, 1);
    }

    /// Property: Luhn checking never panics on arbitrary input.
    #[test]
    fn luhn_never_panics(input in ".*") {
        let _ = is_valid_luhn(&input);
    }
}

// =============================================================================
// WILDCARD AND PARSING PROPERTIES
// =============================================================================

proptest! {
    /// Property: Wildcard expansion preserves length and leaves no wildcards.
    #[test]
    fn expansion_preserves_length(text in "[0-9X*?#_x]{0,40}", seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let expanded = expand_wildcards(&text, &mut rng);
        prop_assert_eq!(expanded.chars().count(), text.chars().count());
        prop_assert!(expanded.chars().all(|c| c.is_ascii_digit()));
    }

    /// Property: Non-wildcard characters pass through expansion untouched.
    #[test]
    fn expansion_keeps_literals(text in "[0-9a-z|/ ]{0,40}", seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let expanded = expand_wildcards(&text, &mut rng);
        for (original, result) in text.chars().zip(expanded.chars()) {
            if !WILDCARDS.contains(&original) {
                prop_assert_eq!(original, result);
            }
        }
    }

    /// Property: Every separator yields the same fields.
    #[test]
    fn separators_are_interchangeable(
        bin in bin_strategy(),
        month in field_strategy(),
        year in field_strategy(),
        a in prop::sample::select(SEPARATORS.to_vec()),
        b in prop::sample::select(SEPARATORS.to_vec()),
    ) {
        let with_pipes = parse(&format!("{}|{}|{}", bin, month, year));
        let mixed = parse(&format!("{}{}{} {} {}", bin, a, month, b, year));
        prop_assert_eq!(with_pipes, mixed);
    }

    /// Property: A generated pattern parses back into its pieces.
    #[test]
    fn parse_recovers_fields(bin in bin_strategy(), cvv in field_strategy()) {
        let pattern = parse_pattern(&format!("{}|01|30|{}", bin, cvv)).unwrap();
        prop_assert_eq!(pattern.bin(), bin.as_str());
        prop_assert_eq!(pattern.month(), Some("01"));
        prop_assert_eq!(pattern.year(), Some("30"));
        prop_assert_eq!(pattern.cvv(), Some(cvv.as_str()));
    }

    /// Property: Parsing never panics and only fails with a known error.
    #[test]
    fn parse_never_panics(input in ".{0,60}") {
        match parse_pattern(&input) {
            Ok(pattern) => prop_assert!(!pattern.bin().is_empty()),
            Err(GenerationError::EmptyPattern)
            | Err(GenerationError::MissingBin)
            | Err(GenerationError::InvalidCharacter { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}

// =============================================================================
// GENERATION PROPERTIES
// =============================================================================

proptest! {
    /// Property: Every valid pattern produces a Luhn-valid number whose
    /// length matches its prefix.
    #[test]
    fn generated_numbers_are_valid(pattern in pattern_strategy(), seed in any::<u64>()) {
        let card = generator()
            .generate(&pattern, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let number = card.card_number();

        prop_assert!(is_valid_luhn(number), "{}", card);
        prop_assert!([14, 15, 16].contains(&number.len()), "{}", card);
        prop_assert_eq!(number.len(), target_length(number));
        prop_assert!(number.bytes().all(|b| b.is_ascii_digit()));
    }

    /// Property: The brand is a pure function of the final number.
    #[test]
    fn brand_matches_classification(pattern in pattern_strategy(), seed in any::<u64>()) {
        let card = generator()
            .generate(&pattern, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        prop_assert_eq!(card.card_type(), classify(card.card_number()));
    }

    /// Property: Expiry fields are always two digits with a valid month.
    #[test]
    fn expiry_is_well_formed(pattern in pattern_strategy(), seed in any::<u64>()) {
        let card = generator()
            .generate(&pattern, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let month: u8 = card.month().parse().unwrap();
        prop_assert!((1..=12).contains(&month));
        prop_assert_eq!(card.month().len(), 2);
        prop_assert_eq!(card.year().len(), 2);
    }

    /// Property: A CVV left open, or given as wildcards, fits the brand.
    #[test]
    fn generated_cvv_fits_brand(bin in bin_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for pattern in [bin.clone(), format!("{}|XX|XX|XXX", bin)] {
            let card = generator().generate(&pattern, &mut rng).unwrap();
            let expected = if card.card_type() == CardBrand::Amex { 4 } else { 3 };
            prop_assert_eq!(card.cvv().len(), expected);
        }
    }

    /// Property: A literal BIN prefix survives generation.
    #[test]
    fn literal_prefix_is_kept(prefix in digit_string(6), seed in any::<u64>()) {
        let card = generator()
            .generate(&prefix, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let kept = prefix.len().min(card.length() - 1);
        prop_assert!(card.card_number().starts_with(&prefix[..kept]));
    }

    /// Property: Same seed, same clock, same record.
    #[test]
    fn generation_is_deterministic(pattern in pattern_strategy(), seed in any::<u64>()) {
        let gen = generator();
        let a = gen.generate(&pattern, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = gen.generate(&pattern, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }
}

// =============================================================================
// EXPORT PROPERTIES
// =============================================================================

proptest! {
    /// Property: CSV export has exactly the five record fields.
    #[test]
    fn csv_has_five_fields(pattern in pattern_strategy(), seed in any::<u64>()) {
        let card = generator()
            .generate(&pattern, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let csv = export(&card, ExportFormat::Csv);
        let fields: Vec<&str> = csv.split(',').collect();
        prop_assert_eq!(
            fields,
            vec![card.card_number(), card.month(), card.year(), card.cvv(), card.card_type().name()]
        );
    }

    /// Property: Pipe export equals the record's formatted field.
    #[test]
    fn pipe_is_formatted(pattern in pattern_strategy(), seed in any::<u64>()) {
        let card = generator()
            .generate(&pattern, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        prop_assert_eq!(export(&card, ExportFormat::Pipe), card.formatted());
    }

    /// Property: Grouping only inserts separators.
    #[test]
    fn grouping_preserves_digits(number in digit_string(16)) {
        let grouped = group_card_number(&number, " ");
        prop_assert_eq!(grouped.replace(' ', ""), number);
        prop_assert!(grouped.split(' ').all(|g| g.len() <= 4));
    }
}
