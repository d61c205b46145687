//! Export format example.
//!
//! Run with: `cargo run --example export`

use cc_generator::export::export_named;
use cc_generator::{export, export_batch, BatchGenerator, ExportFormat};

fn main() {
    println!("=== Export Formats ===\n");

    let cards = BatchGenerator::default().generate_valid_only(
        "37XXXXXXXXXXXXX|XX|XX",
        3,
        &mut rand::thread_rng(),
    );
    let Some(first) = cards.first() else {
        println!("No cards generated");
        return;
    };

    for format in ExportFormat::ALL {
        println!("[{}]", format);
        println!("{}", export(first, format));
        println!();
    }

    // Unknown names fall back to pipe
    println!("[yaml -> pipe]");
    println!("{}", export_named(first, "yaml"));
    println!();

    println!("[batch csv]");
    match export_batch(&cards, ExportFormat::Csv) {
        Ok(csv) => println!("{}", csv),
        Err(e) => println!("Error: {}", e),
    }
}
