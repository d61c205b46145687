//! WebAssembly bindings for test card generation.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { generate_cards, generate_card, detect_brand, is_valid_luhn } from 'cc_generator';
//!
//! await init();
//!
//! // Five cards as CSV, header included
//! const csv = generate_cards("434769805926XXXX|10|2029|XXX", 5, "csv");
//!
//! // One card with field accessors
//! const card = generate_card("37XXXX");
//! console.log(card.card_number, card.card_type);
//!
//! detect_brand("4111");            // "Visa"
//! is_valid_luhn("4111111111111111"); // true
//! ```

#![cfg(feature = "wasm")]

use crate::export::{export_batch, ExportFormat};
use crate::{BatchGenerator, CardRecord};
use wasm_bindgen::prelude::*;

/// A generated card, returned to JavaScript.
#[wasm_bindgen]
pub struct GeneratedCard {
    record: CardRecord,
}

#[wasm_bindgen]
impl GeneratedCard {
    #[wasm_bindgen(getter)]
    pub fn card_number(&self) -> String {
        self.record.card_number().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn month(&self) -> String {
        self.record.month().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn year(&self) -> String {
        self.record.year().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn cvv(&self) -> String {
        self.record.cvv().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn card_type(&self) -> String {
        self.record.card_type().name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn formatted(&self) -> String {
        self.record.formatted().to_string()
    }

    /// Renders the card in `format`; unknown names fall back to pipe.
    pub fn export(&self, format: &str) -> String {
        crate::export::export_named(&self.record, format)
    }
}

/// Generates one card from a pattern.
///
/// # Example
/// ```javascript
/// const card = generate_card("5500XXXX|12|30");
/// console.log(card.formatted);
/// ```
#[wasm_bindgen]
pub fn generate_card(pattern: &str) -> Result<GeneratedCard, JsValue> {
    crate::generate_card(pattern)
        .map(|record| GeneratedCard { record })
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generates `count` cards and returns them exported as one document.
///
/// Records that fail are skipped. An unknown format falls back to pipe.
#[wasm_bindgen]
pub fn generate_cards(pattern: &str, count: usize, format: &str) -> Result<String, JsValue> {
    crate::parse_pattern(pattern).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let records =
        BatchGenerator::default().generate_valid_only(pattern, count, &mut rand::thread_rng());
    export_batch(&records, ExportFormat::parse_or_default(format))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generates `count` cards as an array of card numbers.
#[wasm_bindgen]
pub fn generate_numbers(pattern: &str, count: usize) -> js_sys::Array {
    let numbers = js_sys::Array::new();
    for record in crate::batch::generate_batch(pattern, count) {
        numbers.push(&JsValue::from_str(record.card_number()));
    }
    numbers
}

/// Detects the card brand from a (partial) card number.
///
/// # Example
/// ```javascript
/// const brand = detect_brand("4111");  // "Visa"
/// ```
#[wasm_bindgen]
pub fn detect_brand(card_number: &str) -> String {
    let digits: String = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
    crate::classify(&digits).name().to_string()
}

/// Checks if a card number passes the Luhn algorithm.
#[wasm_bindgen]
pub fn is_valid_luhn(card_number: &str) -> bool {
    crate::is_valid_luhn(card_number)
}

/// Checks a pattern, returning the error message if it is rejected.
#[wasm_bindgen]
pub fn check_pattern(pattern: &str) -> Option<String> {
    crate::parse_pattern(pattern).err().map(|e| e.to_string())
}
