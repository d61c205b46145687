//! Basic test card generation example.
//!
//! Run with: `cargo run --example basic`

use cc_generator::{generate_card, is_valid_luhn, parse_pattern, GenerationError};

fn main() {
    println!("=== Basic Test Card Generation ===\n");

    // Example 1: Generate from a full pattern
    let pattern = "434769805926XXXX|10|2029|XXX";
    println!("Pattern: {}", pattern);

    match generate_card(pattern) {
        Ok(card) => {
            println!("  Number: {}", card.card_number());
            println!("  Brand: {}", card.card_type());
            println!("  Expiry: {}", card.expiry());
            println!("  CVV: {}", card.cvv());
            println!("  Formatted: {}", card.formatted());
            println!("  Luhn: {}", if is_valid_luhn(card.card_number()) { "PASS" } else { "FAIL" });
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    // Example 2: BIN-only patterns pick their own length and CVV size
    println!("BIN-only patterns:");
    for bin in ["4", "5100", "37", "6011", "36", "35"] {
        match generate_card(bin) {
            Ok(card) => println!(
                "  {:<6} -> {} ({}, {} digits, CVV {})",
                bin,
                card.card_number(),
                card.card_type(),
                card.length(),
                card.cvv()
            ),
            Err(e) => println!("  {:<6} -> error: {}", bin, e),
        }
    }
    println!();

    // Example 3: Any separator works, whitespace is ignored
    println!("Pattern fields:");
    for raw in ["4532****|12|26|123", "4532 **** / 12 / 26 / 123", "4532****-12:26"] {
        if let Ok(p) = parse_pattern(raw) {
            println!(
                "  {:<28} bin={} month={:?} year={:?} cvv={:?}",
                raw,
                p.bin(),
                p.month(),
                p.year(),
                p.cvv()
            );
        }
    }
    println!();

    // Example 4: Rejected patterns
    println!("Rejected patterns:");
    for raw in ["", "|||", "4111abcd"] {
        match parse_pattern(raw) {
            Err(GenerationError::InvalidCharacter { position, character }) => {
                println!("  {:?}: bad character {:?} at {}", raw, character, position)
            }
            Err(e) => println!("  {:?}: {}", raw, e),
            Ok(_) => println!("  {:?}: accepted", raw),
        }
    }
}
