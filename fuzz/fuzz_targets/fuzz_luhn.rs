//! Fuzz target for the Luhn functions.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use cc_generator::luhn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Clamp values to valid digit range
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();

    let _ = luhn::validate(&digits);

    if digits.is_empty() {
        assert!(!luhn::validate(&digits), "Empty input must not validate");
        return;
    }

    // String and digit entry points must agree
    let text = luhn::digits_to_string(&digits);
    assert_eq!(luhn::digits_of(&text), digits);
    assert_eq!(luhn::is_valid_luhn(&text), luhn::validate(&digits));

    let check = luhn::generate_check_digit(&digits);
    assert!(check <= 9, "Check digit should be 0-9");

    let with_check = luhn::append_check_digit(&digits);
    assert_eq!(with_check.len(), digits.len() + 1);
    assert!(luhn::validate(&with_check), "Adding check digit should make valid");
});
