//! Wildcard expansion.
//!
//! Any of `* X x ? # _` in a pattern field stands for "a random digit".
//! Each wildcard is filled independently; every other character passes
//! through untouched, so expansion never changes the length of its input.

use rand::Rng;

/// Characters treated as "fill with a random digit".
pub const WILDCARDS: [char; 6] = ['*', 'X', 'x', '?', '#', '_'];

/// Returns true if `c` is a wildcard character.
#[inline]
pub fn is_wildcard(c: char) -> bool {
    WILDCARDS.contains(&c)
}

/// Returns true if the text contains at least one wildcard.
#[inline]
pub fn contains_wildcards(text: &str) -> bool {
    text.chars().any(is_wildcard)
}

/// Draws a uniformly random decimal digit character.
#[inline]
pub fn random_digit<R: Rng>(rng: &mut R) -> char {
    (b'0' + rng.gen_range(0..10u8)) as char
}

/// Returns `count` uniformly random decimal digits.
pub fn random_digits<R: Rng>(count: usize, rng: &mut R) -> String {
    (0..count).map(|_| random_digit(rng)).collect()
}

/// Replaces every wildcard in `text` with a random digit.
///
/// # Example
///
/// ```
/// use cc_generator::wildcard::expand_wildcards;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let expanded = expand_wildcards("4532**x#", &mut rng);
///
/// assert_eq!(expanded.len(), 8);
/// assert!(expanded.starts_with("4532"));
/// assert!(expanded.chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn expand_wildcards<R: Rng>(text: &str, rng: &mut R) -> String {
    text.chars()
        .map(|c| if is_wildcard(c) { random_digit(rng) } else { c })
        .collect()
}
