//! Fuzz target for record export.
//!
//! Tests that every format renders arbitrary records without panicking.

#![no_main]

use arbitrary::Arbitrary;
use cc_generator::export::{export_named, group_card_number};
use cc_generator::{classify, export, export_batch, CardRecord, ExportFormat};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    card_number: &'a str,
    month: &'a str,
    year: &'a str,
    cvv: &'a str,
    format_name: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let brand = classify(input.card_number);
    let record = CardRecord::new(input.card_number, input.month, input.year, input.cvv, brand);

    for format in ExportFormat::ALL {
        let _ = export(&record, format);
        let _ = export_batch(std::slice::from_ref(&record), format);
    }

    assert_eq!(export(&record, ExportFormat::Pipe), record.formatted());
    let _ = export_named(&record, input.format_name);

    let grouped = group_card_number(input.card_number, " ");
    assert!(grouped.len() >= input.card_number.len());
});
