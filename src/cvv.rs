//! CVV generation and resolution.
//!
//! # Length Requirements
//!
//! - American Express: 4 digits
//! - All other cards: 3 digits
//!
//! # Example
//!
//! ```
//! use cc_generator::cvv::random_cvv;
//! use cc_generator::CardBrand;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(9);
//! assert_eq!(random_cvv(CardBrand::Amex, &mut rng).len(), 4);
//! assert_eq!(random_cvv(CardBrand::Visa, &mut rng).len(), 3);
//! ```

use crate::card::CardBrand;
use crate::wildcard::{contains_wildcards, expand_wildcards, random_digits};
use rand::Rng;

/// Returns the expected CVV length for a card brand.
#[inline]
pub const fn cvv_length_for_brand(brand: CardBrand) -> usize {
    brand.cvv_length()
}

/// Returns true if `cvv` is all digits and has the brand's length.
///
/// # Example
///
/// ```
/// use cc_generator::cvv::is_valid_cvv_for_brand;
/// use cc_generator::CardBrand;
///
/// assert!(is_valid_cvv_for_brand("1234", CardBrand::Amex));
/// assert!(!is_valid_cvv_for_brand("123", CardBrand::Amex));
/// assert!(!is_valid_cvv_for_brand("12a", CardBrand::Visa));
/// ```
pub fn is_valid_cvv_for_brand(cvv: &str, brand: CardBrand) -> bool {
    cvv.len() == cvv_length_for_brand(brand) && cvv.bytes().all(|b| b.is_ascii_digit())
}

/// Generates a random CVV of the brand's length.
pub fn random_cvv<R: Rng>(brand: CardBrand, rng: &mut R) -> String {
    random_digits(cvv_length_for_brand(brand), rng)
}

/// Resolves the CVV field of a pattern.
///
/// - With wildcards: expanded, then replaced if the result does not fit
///   the brand.
/// - Literal: kept verbatim, or checked like the wildcard path when
///   `validate_literal` is set.
/// - Absent: generated.
pub fn resolve_cvv<R: Rng>(
    raw: Option<&str>,
    brand: CardBrand,
    validate_literal: bool,
    rng: &mut R,
) -> String {
    match raw {
        Some(raw) if contains_wildcards(raw) => {
            let expanded = expand_wildcards(raw, rng);
            if is_valid_cvv_for_brand(&expanded, brand) {
                expanded
            } else {
                tracing::debug!(
                    brand = %brand,
                    length = expanded.len(),
                    "discarding CVV template that does not fit the brand"
                );
                random_cvv(brand, rng)
            }
        }
        Some(raw) if !validate_literal || is_valid_cvv_for_brand(raw, brand) => raw.to_string(),
        _ => random_cvv(brand, rng),
    }
}
