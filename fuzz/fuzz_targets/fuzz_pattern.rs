//! Fuzz target for pattern parsing and card generation.
//!
//! Any accepted pattern must produce a well-formed record; anything else
//! must be rejected with an error, never a panic.

#![no_main]

use cc_generator::generate::target_length;
use cc_generator::{classify, is_valid_luhn, parse_pattern, CardGenerator, FixedClock};
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

fuzz_target!(|input: (&str, u64)| {
    let (pattern, seed) = input;

    if parse_pattern(pattern).is_err() {
        return;
    }

    let generator = CardGenerator::new()
        .with_clock(FixedClock::new(2026, 10))
        .honor_partial_expiry(seed % 2 == 0)
        .validate_literal_cvv(seed % 3 == 0);
    let mut rng = StdRng::seed_from_u64(seed);

    let card = match generator.generate(pattern, &mut rng) {
        Ok(card) => card,
        Err(e) => panic!("Parsed pattern {:?} failed to generate: {}", pattern, e),
    };

    let number = card.card_number();
    assert!(is_valid_luhn(number), "Generated number fails Luhn: {}", number);
    assert_eq!(number.len(), target_length(number));
    assert_eq!(card.card_type(), classify(number));

    let month: u8 = card.month().parse().expect("Month should be numeric");
    assert!((1..=12).contains(&month));
    assert_eq!(card.year().len(), 2);
});
