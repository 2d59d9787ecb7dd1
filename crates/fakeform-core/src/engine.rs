//! Identifier assembly: validate inputs, compute the check digit, retry
//! on rejection with the next running number.

use chrono::{Datelike, Duration, Months, Utc};
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::checksum;
use crate::error::{Result, SvnrError};
use crate::types::{BirthDate, RunningNumber, Svnr};

/// Upper bound on check-digit computations per call: the first try plus
/// eight retries.
pub const MAX_ATTEMPTS: u32 = 9;

const MIN_AGE_YEARS: u32 = 1;
const MAX_AGE_YEARS: u32 = 99;

/// Supplies a random birth date within an age window.
pub trait BirthDateSource {
    fn random_birth_date(&mut self, min_years_ago: u32, max_years_ago: u32) -> BirthDate;
}

/// Supplies the initial running-number candidate and the advance policy
/// used when a check digit is rejected.
pub trait RunningNumberSource {
    fn random_running_number(&mut self) -> RunningNumber;

    /// Candidate to try after a rejection. The default policy increments
    /// by one and resets to 100 past the upper bound.
    fn next_candidate(&mut self, previous: RunningNumber) -> RunningNumber {
        previous.wrapping_next()
    }
}

/// Rand-backed implementation of both collaborator seams.
#[derive(Debug, Clone)]
pub struct RandomSources<R> {
    rng: R,
}

impl<R> RandomSources<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> BirthDateSource for RandomSources<R> {
    fn random_birth_date(&mut self, min_years_ago: u32, max_years_ago: u32) -> BirthDate {
        let (min_years_ago, max_years_ago) = if min_years_ago <= max_years_ago {
            (min_years_ago, max_years_ago)
        } else {
            (max_years_ago, min_years_ago)
        };
        let today = Utc::now().date_naive();
        let newest = today - Months::new(min_years_ago.saturating_mul(12));
        let oldest = today - Months::new(max_years_ago.saturating_mul(12));
        let span = (newest - oldest).num_days().max(0);
        let offset = self.rng.random_range(0..=span);
        let date = oldest + Duration::days(offset);

        let day = date.day();
        let month = date.month();
        let year = date.year().rem_euclid(100) as u32;
        BirthDate::from_digits([
            (day / 10) as u8,
            (day % 10) as u8,
            (month / 10) as u8,
            (month % 10) as u8,
            (year / 10) as u8,
            (year % 10) as u8,
        ])
    }
}

impl<R: Rng> RunningNumberSource for RandomSources<R> {
    fn random_running_number(&mut self) -> RunningNumber {
        let value = self
            .rng
            .random_range(RunningNumber::MIN..=RunningNumber::MAX);
        RunningNumber::new_unchecked(value)
    }
}

/// Generates identifiers by running the bounded retry loop over a pair
/// of collaborator sources.
///
/// The engine keeps no per-call state; every invocation is independent,
/// so one engine per thread (or per call) is safe without coordination.
#[derive(Debug, Clone)]
pub struct SvnrEngine<S> {
    sources: S,
}

impl SvnrEngine<RandomSources<ThreadRng>> {
    /// Engine backed by the thread-local RNG.
    pub fn new() -> Self {
        Self::with_sources(RandomSources::new(rand::rng()))
    }
}

impl Default for SvnrEngine<RandomSources<ThreadRng>> {
    fn default() -> Self {
        Self::new()
    }
}

impl SvnrEngine<RandomSources<ChaCha8Rng>> {
    /// Deterministic engine for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::with_sources(RandomSources::new(ChaCha8Rng::seed_from_u64(seed)))
    }
}

impl<S> SvnrEngine<S> {
    pub fn with_sources(sources: S) -> Self {
        Self { sources }
    }
}

impl<S> SvnrEngine<S>
where
    S: BirthDateSource + RunningNumberSource,
{
    /// Generate an identifier for a random birth date and running number.
    pub fn generate_random(&mut self) -> Result<Svnr> {
        let birth_date = self
            .sources
            .random_birth_date(MIN_AGE_YEARS, MAX_AGE_YEARS);
        self.run(birth_date)
    }

    /// Generate an identifier for a caller-supplied birth date.
    ///
    /// The birth date is validated eagerly; a malformed value fails the
    /// whole call before any checksum work starts.
    pub fn generate_for_birth_date(&mut self, birth_date: &str) -> Result<Svnr> {
        let birth_date = BirthDate::parse(birth_date)?;
        self.run(birth_date)
    }

    fn run(&mut self, birth_date: BirthDate) -> Result<Svnr> {
        let mut candidate = self.sources.random_running_number();
        for attempt in 1..=MAX_ATTEMPTS {
            if let Some(digit) = checksum::check_digit(candidate, &birth_date) {
                return Ok(Svnr::assemble(candidate, digit, birth_date));
            }
            if attempt < MAX_ATTEMPTS {
                candidate = self.sources.next_candidate(candidate);
            }
        }
        Err(SvnrError::Exhausted {
            birth_date: birth_date.to_string(),
            attempts: MAX_ATTEMPTS,
        })
    }
}
