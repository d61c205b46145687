//! Luhn algorithm implementation for card number generation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to validate credit card numbers and other identification numbers.
//! The generator uses it to finalize every card number it produces.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a digit sequence using the Luhn algorithm.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, subtract 9
/// 4. Sum all digits
/// 5. If the sum is divisible by 10, the number is valid
///
/// An empty sequence is rejected.
///
/// # Example
///
/// ```
/// use cc_generator::luhn::validate;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Checks a card number string, ignoring any non-digit characters.
///
/// # Example
///
/// ```
/// use cc_generator::luhn::is_valid_luhn;
///
/// assert!(is_valid_luhn("4111 1111 1111 1111"));
/// assert!(!is_valid_luhn("4111-1111-1111-1112"));
/// ```
#[inline]
pub fn is_valid_luhn(input: &str) -> bool {
    validate(&digits_of(input))
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            // Rightmost digit is position 0 (not doubled)
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Generates the check digit for a partial card number.
///
/// The supplied digits shift one position left once the check digit is
/// appended, so the rightmost supplied digit is the first one doubled.
///
/// # Example
///
/// ```
/// use cc_generator::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

/// Returns the partial number with its check digit appended.
///
/// Callers normalize the length first; for a 16-digit card that means
/// passing exactly 15 digits.
///
/// # Example
///
/// ```
/// use cc_generator::luhn::{append_check_digit, validate};
///
/// let full = append_check_digit(&[5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
/// assert_eq!(full.len(), 16);
/// assert_eq!(full[15], 4);
/// assert!(validate(&full));
/// ```
pub fn append_check_digit(digits: &[u8]) -> Vec<u8> {
    let mut full = Vec::with_capacity(digits.len() + 1);
    full.extend_from_slice(digits);
    full.push(generate_check_digit(digits));
    full
}

/// Extracts the decimal digit values from a string, skipping everything else.
#[inline]
pub fn digits_of(input: &str) -> Vec<u8> {
    input
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

/// Renders digit values (0-9) back into a string.
#[inline]
pub fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}
