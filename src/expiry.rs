//! Expiry date generation and resolution.
//!
//! The current date comes from a [`Clock`] so generation can be pinned to a
//! fixed month in tests. [`SystemClock`] reads local time through chrono.
//!
//! # Example
//!
//! ```
//! use cc_generator::expiry::{random_expiry, FixedClock};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let clock = FixedClock::new(2026, 10);
//! let expiry = random_expiry(&mut StdRng::seed_from_u64(1), &clock);
//!
//! assert!(expiry.year() >= 2027 && expiry.year() <= 2036);
//! assert_eq!(expiry.month_str().len(), 2);
//! assert_eq!(expiry.year_str().len(), 2);
//! ```

use crate::wildcard::expand_wildcards;
use chrono::Datelike;
use rand::Rng;
use std::fmt;

/// Source of the current year and month.
pub trait Clock {
    /// Returns `(four-digit year, month 1-12)`.
    fn current_year_month(&self) -> (u16, u8);
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year_month(&self) -> (u16, u8) {
        let now = chrono::Local::now();
        (now.year() as u16, now.month() as u8)
    }
}

/// A clock stuck at one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    year: u16,
    month: u8,
}

impl FixedClock {
    /// Creates a clock that always reports `year`/`month`.
    pub const fn new(year: u16, month: u8) -> Self {
        Self { year, month }
    }
}

impl Clock for FixedClock {
    fn current_year_month(&self) -> (u16, u8) {
        (self.year, self.month)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn current_year_month(&self) -> (u16, u8) {
        (**self).current_year_month()
    }
}

/// A resolved expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    /// Month (1-12)
    month: u8,
    /// Four-digit year
    year: u16,
}

impl Expiry {
    /// Creates an expiry date.
    ///
    /// Returns `None` if the month is not 1-12.
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { month, year })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Month as two zero-padded digits.
    pub fn month_str(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Last two digits of the year, zero-padded.
    pub fn year_str(&self) -> String {
        format!("{:02}", self.year % 100)
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{}/{}", self.month_str(), self.year_str())
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Picks a random future expiry.
///
/// The year is drawn from the next ten years and the month from 1-12.
pub fn random_expiry<R: Rng, C: Clock + ?Sized>(rng: &mut R, clock: &C) -> Expiry {
    let (current_year, current_month) = clock.current_year_month();
    let year = current_year + rng.gen_range(1..=10);
    let month = rng.gen_range(1..=12);
    roll_forward(year, month, current_year, current_month, rng)
}

/// Moves an expiry that is not after the current month into the future.
///
/// Only a date in the current year needs this: the month is redrawn from
/// the months after the current one, wrapping into January of the next
/// year when the current month is December.
fn roll_forward<R: Rng>(
    year: u16,
    month: u8,
    current_year: u16,
    current_month: u8,
    rng: &mut R,
) -> Expiry {
    if year != current_year || month > current_month {
        return Expiry { month, year };
    }

    let remaining = 12u8.saturating_sub(current_month);
    let mut month = current_month + 1;
    if remaining > 0 {
        month += rng.gen_range(0..remaining);
    }

    if month > 12 {
        Expiry {
            month: month - 12,
            year: year + 1,
        }
    } else {
        Expiry { month, year }
    }
}

/// Resolves an (already wildcard-expanded) month field.
///
/// Values outside 1-12, or that are not numbers, are replaced by a random
/// month.
pub fn resolve_month<R: Rng>(raw: &str, rng: &mut R) -> u8 {
    match raw.parse::<u8>() {
        Ok(month) if (1..=12).contains(&month) => month,
        _ => rng.gen_range(1..=12),
    }
}

/// Resolves an (already wildcard-expanded) year field.
///
/// - Two digits use a pivot inside the current century: `00-49` land in the
///   current century, `50-99` in the previous one. Years before the current
///   year are replaced.
/// - Four digits are kept when they fall within the next 20 years.
/// - Anything else is replaced.
///
/// Replacements are drawn from the current year plus `0..10`.
pub fn resolve_year<R: Rng, C: Clock + ?Sized>(raw: &str, rng: &mut R, clock: &C) -> u16 {
    let (current_year, _) = clock.current_year_month();

    let resolved = match raw.len() {
        2 => raw.parse::<u16>().ok().and_then(|yy| {
            let century = current_year / 100 * 100;
            let year = if yy < 50 {
                century + yy
            } else {
                (century + yy).saturating_sub(100)
            };
            (year >= current_year).then_some(year)
        }),
        4 => raw
            .parse::<u16>()
            .ok()
            .filter(|year| (current_year..=current_year + 20).contains(year)),
        _ => None,
    };

    resolved.unwrap_or_else(|| current_year + rng.gen_range(0..10))
}

/// Resolves the expiry fields of a pattern.
///
/// When both fields are present their wildcards are expanded and each is
/// resolved on its own. Otherwise a random expiry is generated and any lone
/// field is discarded, unless `honor_partial` is set: then a lone month or
/// year is kept and only the missing half is random. A random month for the
/// current year is drawn from the months still ahead.
pub fn resolve_expiry<R: Rng, C: Clock + ?Sized>(
    month: Option<&str>,
    year: Option<&str>,
    honor_partial: bool,
    rng: &mut R,
    clock: &C,
) -> Expiry {
    match (month, year) {
        (Some(month), Some(year)) => {
            let month = resolve_month(&expand_wildcards(month, rng), rng);
            let year = resolve_year(&expand_wildcards(year, rng), rng, clock);
            Expiry { month, year }
        }
        (Some(month), None) if honor_partial => {
            let month = resolve_month(&expand_wildcards(month, rng), rng);
            let year = random_expiry(rng, clock).year;
            Expiry { month, year }
        }
        (None, Some(year)) if honor_partial => {
            let year = resolve_year(&expand_wildcards(year, rng), rng, clock);
            let (current_year, current_month) = clock.current_year_month();
            let month = rng.gen_range(1..=12);
            roll_forward(year, month, current_year, current_month, rng)
        }
        _ => random_expiry(rng, clock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CLOCK: FixedClock = FixedClock::new(2026, 10);

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xC0FFEE)
    }

    #[test]
    fn test_expiry_new() {
        assert!(Expiry::new(1, 2030).is_some());
        assert!(Expiry::new(12, 2030).is_some());
        assert!(Expiry::new(0, 2030).is_none());
        assert!(Expiry::new(13, 2030).is_none());
    }

    #[test]
    fn test_expiry_format() {
        let expiry = Expiry::new(3, 2031).unwrap();
        assert_eq!(expiry.month_str(), "03");
        assert_eq!(expiry.year_str(), "31");
        assert_eq!(expiry.format_short(), "03/31");
        assert_eq!(expiry.to_string(), "03/31");

        let expiry = Expiry::new(11, 2100).unwrap();
        assert_eq!(expiry.year_str(), "00");
    }

    #[test]
    fn test_random_expiry_is_in_future_window() {
        let mut rng = rng();
        for _ in 0..500 {
            let expiry = random_expiry(&mut rng, &CLOCK);
            assert!((2027..=2036).contains(&expiry.year()), "{:?}", expiry);
            assert!((1..=12).contains(&expiry.month()), "{:?}", expiry);
        }
    }

    #[test]
    fn test_roll_forward_leaves_future_dates() {
        let mut rng = rng();
        assert_eq!(roll_forward(2030, 1, 2026, 10, &mut rng), Expiry { month: 1, year: 2030 });
        assert_eq!(roll_forward(2026, 11, 2026, 10, &mut rng), Expiry { month: 11, year: 2026 });
    }

    #[test]
    fn test_roll_forward_redraws_past_month() {
        let mut rng = rng();
        for _ in 0..100 {
            let expiry = roll_forward(2026, 4, 2026, 10, &mut rng);
            assert_eq!(expiry.year(), 2026);
            assert!((11..=12).contains(&expiry.month()), "{:?}", expiry);
        }
    }

    #[test]
    fn test_roll_forward_wraps_in_december() {
        let mut rng = rng();
        assert_eq!(roll_forward(2026, 12, 2026, 12, &mut rng), Expiry { month: 1, year: 2027 });
    }

    #[test]
    fn test_resolve_month() {
        let mut rng = rng();
        assert_eq!(resolve_month("01", &mut rng), 1);
        assert_eq!(resolve_month("12", &mut rng), 12);
        assert_eq!(resolve_month("7", &mut rng), 7);
        for raw in ["00", "13", "99", "", "ab"] {
            let month = resolve_month(raw, &mut rng);
            assert!((1..=12).contains(&month), "{} -> {}", raw, month);
        }
    }

    #[test]
    fn test_resolve_year_two_digit_pivot() {
        let mut rng = rng();
        assert_eq!(resolve_year("26", &mut rng, &CLOCK), 2026);
        assert_eq!(resolve_year("49", &mut rng, &CLOCK), 2049);

        // 50-99 map into the previous century and are therefore in the past
        for raw in ["50", "99", "25", "00"] {
            let year = resolve_year(raw, &mut rng, &CLOCK);
            assert!((2026..2036).contains(&year), "{} -> {}", raw, year);
        }
    }

    #[test]
    fn test_resolve_year_four_digit() {
        let mut rng = rng();
        assert_eq!(resolve_year("2026", &mut rng, &CLOCK), 2026);
        assert_eq!(resolve_year("2046", &mut rng, &CLOCK), 2046);

        for raw in ["2025", "2047", "1999"] {
            let year = resolve_year(raw, &mut rng, &CLOCK);
            assert!((2026..2036).contains(&year), "{} -> {}", raw, year);
        }
    }

    #[test]
    fn test_resolve_year_other_lengths() {
        let mut rng = rng();
        for raw in ["", "2", "202", "20261"] {
            let year = resolve_year(raw, &mut rng, &CLOCK);
            assert!((2026..2036).contains(&year), "{} -> {}", raw, year);
        }
    }

    #[test]
    fn test_resolve_expiry_both_fields() {
        let mut rng = rng();
        let expiry = resolve_expiry(Some("10"), Some("2029"), false, &mut rng, &CLOCK);
        assert_eq!(expiry, Expiry { month: 10, year: 2029 });

        let expiry = resolve_expiry(Some("0X"), Some("3X"), false, &mut rng, &CLOCK);
        assert!((1..=12).contains(&expiry.month()));
        assert!((2026..=2039).contains(&expiry.year()));
    }

    #[test]
    fn test_resolve_expiry_partial_is_discarded_by_default() {
        let mut rng = rng();
        for _ in 0..50 {
            let expiry = resolve_expiry(None, Some("2046"), false, &mut rng, &CLOCK);
            assert!((2027..=2036).contains(&expiry.year()));
        }
    }

    #[test]
    fn test_resolve_expiry_honors_partial_when_enabled() {
        let mut rng = rng();
        let expiry = resolve_expiry(Some("05"), None, true, &mut rng, &CLOCK);
        assert_eq!(expiry.month(), 5);
        assert!((2027..=2036).contains(&expiry.year()));

        let expiry = resolve_expiry(None, Some("2046"), true, &mut rng, &CLOCK);
        assert_eq!(expiry.year(), 2046);
    }

    #[test]
    fn test_resolve_expiry_lone_current_year_stays_ahead() {
        let mut rng = rng();
        for _ in 0..200 {
            let expiry = resolve_expiry(None, Some("26"), true, &mut rng, &CLOCK);
            assert_eq!(expiry.year(), 2026);
            assert!(expiry.month() > 10, "{} is not after 10/26", expiry);
        }
    }

    #[test]
    fn test_resolve_expiry_lone_year_in_december_wraps() {
        let clock = FixedClock::new(2026, 12);
        let expiry = resolve_expiry(None, Some("2026"), true, &mut rng(), &clock);
        assert_eq!(expiry, Expiry { month: 1, year: 2027 });
    }

    #[test]
    fn test_system_clock_is_sane() {
        let (year, month) = SystemClock.current_year_month();
        assert!(year >= 2024);
        assert!((1..=12).contains(&month));
    }
}
