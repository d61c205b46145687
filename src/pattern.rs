//! Pattern parsing.
//!
//! A pattern is a compact template such as `434769805926XXXX|10|2029|XXX`:
//! up to four fields (BIN, month, year, CVV) separated by any of
//! `| / : -`. Whitespace anywhere in the input is ignored.
//!
//! # Example
//!
//! ```
//! use cc_generator::pattern::parse_pattern;
//!
//! let pattern = parse_pattern("4532******** / 12 / 26 / 123").unwrap();
//! assert_eq!(pattern.bin(), "4532********");
//! assert_eq!(pattern.month(), Some("12"));
//! assert_eq!(pattern.year(), Some("26"));
//! assert_eq!(pattern.cvv(), Some("123"));
//! ```

use crate::error::GenerationError;
use crate::wildcard::is_wildcard;
use std::fmt;
use std::str::FromStr;

/// Characters that separate pattern fields.
pub const SEPARATORS: [char; 4] = ['|', '/', ':', '-'];

/// A pattern split into its fields.
///
/// Fields still contain wildcards; expansion happens during generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    bin: String,
    month: Option<String>,
    year: Option<String>,
    cvv: Option<String>,
}

impl Pattern {
    /// Returns the BIN field.
    #[inline]
    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Returns the month field, if present.
    #[inline]
    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    /// Returns the year field, if present.
    #[inline]
    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    /// Returns the CVV field, if present.
    #[inline]
    pub fn cvv(&self) -> Option<&str> {
        self.cvv.as_deref()
    }

    /// Returns true when both month and year were supplied.
    #[inline]
    pub fn has_expiry(&self) -> bool {
        self.month.is_some() && self.year.is_some()
    }

    /// Checks that the BIN is present and every field holds only digits
    /// and wildcards.
    pub fn check(&self) -> Result<(), GenerationError> {
        if self.bin.is_empty() {
            return Err(GenerationError::MissingBin);
        }

        let fields = [
            Some(self.bin.as_str()),
            self.month(),
            self.year(),
            self.cvv(),
        ];
        for field in fields.into_iter().flatten() {
            if let Some((position, character)) = field
                .chars()
                .enumerate()
                .find(|&(_, c)| !(c.is_ascii_digit() || is_wildcard(c)))
            {
                return Err(GenerationError::InvalidCharacter {
                    position,
                    character,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bin)?;
        for field in [self.month(), self.year(), self.cvv()].into_iter().flatten() {
            write!(f, "|{}", field)?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pattern(s)
    }
}

/// Returns true if `c` separates pattern fields.
#[inline]
pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Returns true if `c` may appear in a pattern (whitespace aside).
#[inline]
pub fn is_pattern_char(c: char) -> bool {
    c.is_ascii_digit() || is_wildcard(c) || is_separator(c)
}

/// Checks that a raw pattern uses only digits, wildcards, separators and
/// whitespace.
///
/// The reported position counts characters in the raw input, whitespace
/// included.
///
/// # Example
///
/// ```
/// use cc_generator::pattern::validate_pattern;
/// use cc_generator::GenerationError;
///
/// assert!(validate_pattern("4111 XXXX | 12 | 28").is_ok());
/// assert_eq!(
///     validate_pattern("4111a"),
///     Err(GenerationError::InvalidCharacter { position: 4, character: 'a' })
/// );
/// ```
pub fn validate_pattern(raw: &str) -> Result<(), GenerationError> {
    if raw.trim().is_empty() {
        return Err(GenerationError::EmptyPattern);
    }

    for (position, character) in raw.chars().enumerate() {
        if character.is_whitespace() {
            continue;
        }
        if !is_pattern_char(character) {
            return Err(GenerationError::InvalidCharacter {
                position,
                character,
            });
        }
    }

    Ok(())
}

/// Splits a raw pattern into fields without validating it.
///
/// Whitespace is stripped, empty segments between consecutive separators
/// are dropped, and the remaining segments are assigned in order to BIN,
/// month, year and CVV. Segments past the fourth are ignored.
pub fn parse(raw: &str) -> Pattern {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut segments = compact
        .split(is_separator)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Pattern {
        bin: segments.next().unwrap_or_default(),
        month: segments.next(),
        year: segments.next(),
        cvv: segments.next(),
    }
}

/// Validates and parses a raw pattern.
///
/// Fails with [`GenerationError::EmptyPattern`],
/// [`GenerationError::InvalidCharacter`] or, when the input holds nothing
/// but separators, [`GenerationError::MissingBin`].
pub fn parse_pattern(raw: &str) -> Result<Pattern, GenerationError> {
    validate_pattern(raw)?;
    let pattern = parse(raw);
    pattern.check()?;
    Ok(pattern)
}
