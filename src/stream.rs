//! Streaming generation for patterns that arrive one at a time.
//!
//! These iterator adapters turn any iterator of patterns into an iterator
//! of generated records, so large pattern lists (files, sockets) never have
//! to be collected first.
//!
//! # Example
//!
//! ```
//! use cc_generator::stream::GenerateExt;
//! use cc_generator::CardGenerator;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let generator = CardGenerator::new();
//! let mut rng = StdRng::seed_from_u64(3);
//!
//! let patterns = vec!["4111XXXX", "5500XXXX", "bad!"];
//! let ok = patterns
//!     .into_iter()
//!     .generate_cards(&generator, &mut rng)
//!     .filter(|r| r.is_ok())
//!     .count();
//!
//! assert_eq!(ok, 2);
//! ```

use crate::card::CardRecord;
use crate::error::GenerationError;
use crate::expiry::Clock;
use crate::generate::CardGenerator;
use rand::Rng;

/// Generates one record per pattern yielded by the inner iterator.
///
/// Created by [`GenerateExt::generate_cards`].
#[derive(Debug)]
pub struct GenerateStream<'a, I, C, R> {
    inner: I,
    generator: &'a CardGenerator<C>,
    rng: &'a mut R,
}

impl<'a, I, C, R> GenerateStream<'a, I, C, R> {
    /// Wraps `inner`, generating with `generator` and `rng`.
    #[inline]
    pub fn new(inner: I, generator: &'a CardGenerator<C>, rng: &'a mut R) -> Self {
        Self {
            inner,
            generator,
            rng,
        }
    }

    /// Consumes the stream and returns the inner iterator.
    #[inline]
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I, S, C, R> Iterator for GenerateStream<'_, I, C, R>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
    C: Clock,
    R: Rng,
{
    type Item = Result<CardRecord, GenerationError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let pattern = self.inner.next()?;
        Some(self.generator.generate(pattern.as_ref(), &mut *self.rng))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, S, C, R> ExactSizeIterator for GenerateStream<'_, I, C, R>
where
    I: ExactSizeIterator<Item = S>,
    S: AsRef<str>,
    C: Clock,
    R: Rng,
{
}

/// Yields only the records that generated successfully.
///
/// Failures are logged at `warn` level and skipped, as in batch generation.
#[derive(Debug)]
pub struct ValidOnlyStream<'a, I, C, R> {
    inner: GenerateStream<'a, I, C, R>,
    index: usize,
}

impl<'a, I, C, R> ValidOnlyStream<'a, I, C, R> {
    /// Wraps `inner`, generating with `generator` and `rng`.
    #[inline]
    pub fn new(inner: I, generator: &'a CardGenerator<C>, rng: &'a mut R) -> Self {
        Self {
            inner: GenerateStream::new(inner, generator, rng),
            index: 0,
        }
    }
}

impl<I, S, C, R> Iterator for ValidOnlyStream<'_, I, C, R>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
    C: Clock,
    R: Rng,
{
    type Item = CardRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = self.inner.next()?;
            let index = self.index;
            self.index += 1;
            match result {
                Ok(record) => return Some(record),
                Err(error) => crate::batch::log_skipped(index, &error),
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.inner.size_hint();
        (0, upper)
    }
}

/// Extension trait adding card generation to any iterator of patterns.
pub trait GenerateExt: Iterator + Sized {
    /// Generates one record per pattern.
    fn generate_cards<'a, C, R>(
        self,
        generator: &'a CardGenerator<C>,
        rng: &'a mut R,
    ) -> GenerateStream<'a, Self, C, R>;

    /// Generates one record per pattern, skipping patterns that fail.
    ///
    /// # Example
    ///
    /// ```
    /// use cc_generator::stream::GenerateExt;
    /// use cc_generator::CardGenerator;
    ///
    /// let generator = CardGenerator::new();
    /// let mut rng = rand::thread_rng();
    /// let cards: Vec<_> = ["37", "", "6011"]
    ///     .iter()
    ///     .generate_valid_only(&generator, &mut rng)
    ///     .collect();
    ///
    /// assert_eq!(cards.len(), 2);
    /// ```
    fn generate_valid_only<'a, C, R>(
        self,
        generator: &'a CardGenerator<C>,
        rng: &'a mut R,
    ) -> ValidOnlyStream<'a, Self, C, R>;
}

impl<I, S> GenerateExt for I
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    #[inline]
    fn generate_cards<'a, C, R>(
        self,
        generator: &'a CardGenerator<C>,
        rng: &'a mut R,
    ) -> GenerateStream<'a, Self, C, R> {
        GenerateStream::new(self, generator, rng)
    }

    #[inline]
    fn generate_valid_only<'a, C, R>(
        self,
        generator: &'a CardGenerator<C>,
        rng: &'a mut R,
    ) -> ValidOnlyStream<'a, Self, C, R> {
        ValidOnlyStream::new(self, generator, rng)
    }
}

/// Endless stream of records from a single pattern.
///
/// Pair it with `take` to bound it.
///
/// # Example
///
/// ```
/// use cc_generator::stream::repeat_pattern;
/// use cc_generator::CardGenerator;
///
/// let generator = CardGenerator::new();
/// let mut rng = rand::thread_rng();
/// let cards: Vec<_> = repeat_pattern("4XXX", &generator, &mut rng)
///     .take(3)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(cards.len(), 3);
/// ```
pub fn repeat_pattern<'a, C, R>(
    pattern: &'a str,
    generator: &'a CardGenerator<C>,
    rng: &'a mut R,
) -> GenerateStream<'a, std::iter::Repeat<&'a str>, C, R> {
    GenerateStream::new(std::iter::repeat(pattern), generator, rng)
}
