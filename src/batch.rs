//! Batch generation of many cards from one pattern.
//!
//! Every record is produced independently. Batch calls return one
//! `Result` per requested record, in order, so a failure stays scoped to its
//! own element; [`collect_successes`] logs the failures and keeps the rest.
//!
//! With the `parallel` feature, batches can also be generated with rayon.

use crate::card::CardRecord;
use crate::error::GenerationError;
use crate::expiry::{Clock, SystemClock};
use crate::generate::CardGenerator;
use rand::Rng;

/// Batch generator wrapping a configured [`CardGenerator`].
///
/// # Example
///
/// ```
/// use cc_generator::BatchGenerator;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let batch = BatchGenerator::default();
/// let mut rng = StdRng::seed_from_u64(5);
///
/// let results = batch.generate_all("4111XXXX", 3, &mut rng);
/// assert_eq!(results.len(), 3);
///
/// let cards = batch.generate_valid_only("4111XXXX", 3, &mut rng);
/// assert!(cards.iter().all(|c| c.card_number().starts_with("4111")));
/// ```
#[derive(Debug, Clone)]
pub struct BatchGenerator<C = SystemClock> {
    generator: CardGenerator<C>,
}

impl Default for BatchGenerator<SystemClock> {
    fn default() -> Self {
        Self::new(CardGenerator::new())
    }
}

impl<C: Clock> BatchGenerator<C> {
    /// Creates a batch generator around a configured generator.
    #[inline]
    pub fn new(generator: CardGenerator<C>) -> Self {
        Self { generator }
    }

    /// Returns the wrapped generator.
    #[inline]
    pub fn generator(&self) -> &CardGenerator<C> {
        &self.generator
    }

    /// Generates `count` records, returning every result in order.
    pub fn generate_all<R: Rng>(
        &self,
        pattern: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<Result<CardRecord, GenerationError>> {
        generate_with(count, |_| self.generator.generate(pattern, &mut *rng))
    }

    /// Generates `count` records and returns only the successful ones.
    ///
    /// Failures are logged and skipped, so the result may be shorter than
    /// `count`.
    pub fn generate_valid_only<R: Rng>(
        &self,
        pattern: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<CardRecord> {
        collect_successes(self.generate_all(pattern, count, rng))
    }

    /// Generates `count` records and splits them into successes and
    /// `(index, error)` failures.
    pub fn generate_partitioned<R: Rng>(
        &self,
        pattern: &str,
        count: usize,
        rng: &mut R,
    ) -> (Vec<CardRecord>, Vec<(usize, GenerationError)>) {
        partition(self.generate_all(pattern, count, rng))
    }

    /// Generates `count` records in parallel using rayon.
    ///
    /// Each worker draws from its own thread-local RNG, so the output is
    /// not reproducible. Results keep their index order.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn generate_parallel(
        &self,
        pattern: &str,
        count: usize,
    ) -> Vec<Result<CardRecord, GenerationError>>
    where
        C: Sync,
    {
        use rayon::prelude::*;
        (0..count)
            .into_par_iter()
            .map_init(rand::thread_rng, |rng, _| self.generator.generate(pattern, rng))
            .collect()
    }
}

/// Runs `producer` once per index in `0..count` and collects the results.
///
/// This is the loop every batch method uses; it is public so callers can
/// plug in their own per-record producer.
///
/// # Example
///
/// ```
/// use cc_generator::batch::{collect_successes, generate_with};
/// use cc_generator::{generate, GenerationError};
///
/// let results = generate_with(5, |index| {
///     if index == 3 {
///         Err(GenerationError::Failed { index, reason: "injected".into() })
///     } else {
///         generate::generate_card("4111")
///     }
/// });
///
/// assert_eq!(collect_successes(results).len(), 4);
/// ```
pub fn generate_with<F>(count: usize, producer: F) -> Vec<Result<CardRecord, GenerationError>>
where
    F: FnMut(usize) -> Result<CardRecord, GenerationError>,
{
    (0..count).map(producer).collect()
}

/// Keeps the successful records, logging and skipping each failure.
pub fn collect_successes<I>(results: I) -> Vec<CardRecord>
where
    I: IntoIterator<Item = Result<CardRecord, GenerationError>>,
{
    results
        .into_iter()
        .enumerate()
        .filter_map(|(index, result)| match result {
            Ok(record) => Some(record),
            Err(error) => {
                log_skipped(index, &error);
                None
            }
        })
        .collect()
}

/// Reports a record dropped from a batch or stream.
pub(crate) fn log_skipped(index: usize, error: &GenerationError) {
    tracing::warn!(index, %error, "skipping card record that failed to generate");
}

/// Splits results into successes and `(index, error)` failures.
pub fn partition<I>(results: I) -> (Vec<CardRecord>, Vec<(usize, GenerationError)>)
where
    I: IntoIterator<Item = Result<CardRecord, GenerationError>>,
{
    let mut valid = Vec::new();
    let mut failed = Vec::new();

    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(record) => valid.push(record),
            Err(error) => failed.push((index, error)),
        }
    }

    (valid, failed)
}

/// Generates up to `count` records with the thread RNG and system clock,
/// skipping any that fail.
///
/// # Example
///
/// ```
/// use cc_generator::batch::generate_batch;
///
/// let cards = generate_batch("5XXXXXXXXXXXXXXX", 5);
/// assert_eq!(cards.len(), 5);
///
/// assert!(generate_batch("not a pattern", 5).is_empty());
/// ```
pub fn generate_batch(pattern: &str, count: usize) -> Vec<CardRecord> {
    BatchGenerator::default().generate_valid_only(pattern, count, &mut rand::thread_rng())
}
