//! Batch and streaming generation example.
//!
//! Run with: `cargo run --example batch`

use cc_generator::batch::{collect_successes, generate_with};
use cc_generator::stream::GenerateExt;
use cc_generator::{BatchGenerator, CardGenerator, FixedClock, GenerationError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    println!("=== Batch Generation ===\n");

    // Seeded RNG and fixed clock give the same output on every run
    let generator = CardGenerator::new().with_clock(FixedClock::new(2026, 10));
    let batch = BatchGenerator::new(generator.clone());
    let mut rng = StdRng::seed_from_u64(2026);

    println!("Ten Mastercards:");
    for card in batch.generate_valid_only("5XXXXXXXXXXXXXXX|XX|XX", 10, &mut rng) {
        println!("  {}", card);
    }
    println!();

    // Partitioned results keep the failing indices
    let (valid, failed) = batch.generate_partitioned("41?1|12|30", 3, &mut rng);
    println!("Partitioned: {} valid, {} failed", valid.len(), failed.len());
    println!();

    // A failure in one element does not affect the others
    let results = generate_with(5, |index| {
        if index == 3 {
            Err(GenerationError::Failed {
                index,
                reason: "simulated failure".to_string(),
            })
        } else {
            generator.generate("37XXXX", &mut rng)
        }
    });
    let cards = collect_successes(results);
    println!("Injected failure at index 3: {} of 5 records kept", cards.len());
    println!();

    // Streaming over a list of patterns
    println!("Streaming:");
    let patterns = ["4111XXXX", "not valid", "6011|01|31|999", "30"];
    for result in patterns.iter().generate_cards(&generator, &mut rng) {
        match result {
            Ok(card) => println!("  ok    {}", card),
            Err(e) => println!("  error {}", e),
        }
    }
}
