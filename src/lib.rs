//! # cc_generator
//!
//! Test payment-card generator for Rust.
//!
//! Cards are generated from compact patterns such as
//! `434769805926XXXX|10|2029|XXX`: wildcards become random digits, the number
//! is sized for its brand and finished with a Luhn check digit, and any expiry
//! or CVV the pattern leaves open is filled in.
//!
//! ## Features
//!
//! - Pattern parsing with `| / : -` separators and `X x * ? # _` wildcards
//! - Luhn check digit computation
//! - Brand classification from an ordered prefix table
//! - Expiry and CVV generation
//! - Export as pipe, JSON, CSV or human-readable text
//! - Multiple interfaces: library, CLI, REST API, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use cc_generator::{generate_card, is_valid_luhn, CardBrand};
//!
//! let card = generate_card("4111111111111111").unwrap();
//! assert_eq!(card.card_type(), CardBrand::Visa);
//! assert_eq!(card.card_number(), "4111111111111111");
//!
//! let card = generate_card("37XXXX").unwrap();
//! assert_eq!(card.length(), 15);
//! assert_eq!(card.cvv().len(), 4);
//! assert!(is_valid_luhn(card.card_number()));
//! ```
//!
//! ## Reproducible Generation
//!
//! The random source and the clock are both injectable.
//!
//! ```rust
//! use cc_generator::{CardGenerator, FixedClock};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let generator = CardGenerator::new().with_clock(FixedClock::new(2026, 10));
//!
//! let a = generator.generate("5XXX|XX|XX", &mut StdRng::seed_from_u64(7)).unwrap();
//! let b = generator.generate("5XXX|XX|XX", &mut StdRng::seed_from_u64(7)).unwrap();
//! assert_eq!(a, b);
//! ```
//!
//! ## Parsing Patterns
//!
//! ```rust
//! use cc_generator::parse_pattern;
//!
//! let pattern = parse_pattern("4532********|12|26|123").unwrap();
//! assert_eq!(pattern.bin(), "4532********");
//! assert_eq!(pattern.month(), Some("12"));
//! assert!(parse_pattern("4532abc").is_err());
//! ```
//!
//! ## Exporting
//!
//! ```rust
//! use cc_generator::{export, CardBrand, CardRecord, ExportFormat};
//!
//! let record = CardRecord::new("4111111111111111", "12", "30", "123", CardBrand::Visa);
//! assert_eq!(export(&record, ExportFormat::Csv), "4111111111111111,12,30,123,Visa");
//! assert_eq!(
//!     export(&record, ExportFormat::Formatted),
//!     "4111 1111 1111 1111 12/30 123"
//! );
//! ```
//!
//! ## Batch Generation
//!
//! ```rust
//! use cc_generator::BatchGenerator;
//!
//! let batch = BatchGenerator::default();
//! let mut rng = rand::thread_rng();
//!
//! let results = batch.generate_all("6011XX", 5, &mut rng);
//! assert_eq!(results.len(), 5);
//!
//! let cards = batch.generate_valid_only("6011XX", 5, &mut rng);
//! assert_eq!(cards.len(), 5);
//! ```
//!
//! ## Supported Card Brands
//!
//! Rules are checked in order; the first match wins.
//!
//! | Brand | Prefix | Generated length | CVV |
//! |-------|--------|------------------|-----|
//! | Visa | 4 | 16 | 3 |
//! | Mastercard | 51-55, 2221-2720 | 16 | 3 |
//! | American Express | 34, 37 | 15 | 4 |
//! | Discover | 6011, 65, 644000-649999 | 16 | 3 |
//! | Diners Club | 30, 36, 38 | 14 | 3 |
//! | JCB | 35 | 16 | 3 |
//! | Dankort | 5019 | 16 | 3 |
//! | Visa Electron | 4026, 4175, 4405, 4508, 4844, 4913, 4917 | 16 | 3 |
//!
//! Visa Electron prefixes all start with `4`, so in practice they classify
//! as Visa.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `parallel` | Rayon-based batch generation |
//! | `cli` | Command-line tool (`ccgen`) |
//! | `server` | REST API with Swagger UI (`ccgen-server`) |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Note
//!
//! Generated numbers pass the Luhn check but belong to no real account.
//! They are meant for testing payment forms and pipelines only.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod card;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod export;
pub mod generate;
pub mod luhn;
pub mod pattern;
pub mod stream;
pub mod wildcard;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use batch::BatchGenerator;
pub use card::{CardBrand, CardRecord};
pub use detect::classify;
pub use error::{ExportError, GenerationError};
pub use expiry::{Clock, FixedClock, SystemClock};
pub use export::{export, export_batch, ExportFormat};
pub use generate::{generate_card, CardGenerator, GeneratorOptions};
pub use luhn::is_valid_luhn;
pub use pattern::{parse_pattern, Pattern};
