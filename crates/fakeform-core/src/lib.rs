//! Austrian social-insurance-number (SVNR) generation for Fakeform.
//!
//! This crate holds the deterministic core: validated value types, the
//! weighted mod-11 check digit, and the retry engine that assembles
//! 10-digit identifiers from a running number, a check digit, and a
//! six-digit birth date.

pub mod checksum;
pub mod engine;
pub mod error;
pub mod types;

pub use checksum::check_digit;
pub use engine::{
    BirthDateSource, RandomSources, RunningNumberSource, SvnrEngine, MAX_ATTEMPTS,
};
pub use error::{Result, SvnrError};
pub use types::{BirthDate, CheckDigit, RunningNumber, Svnr};
