use thiserror::Error;

/// Core error type shared across Fakeform crates.
#[derive(Debug, Error)]
pub enum SvnrError {
    /// The birth date is not exactly six decimal digits.
    #[error("invalid birth date '{value}': expected exactly 6 digits")]
    InvalidBirthDate { value: String },
    /// The running number is outside the three-digit range.
    #[error("invalid running number {value}: expected a value in 100..=999")]
    InvalidRunningNumber { value: u16 },
    /// Every candidate in the bounded retry loop produced a rejected
    /// check digit.
    #[error("no valid check digit for birth date {birth_date} after {attempts} attempts")]
    Exhausted { birth_date: String, attempts: u32 },
}

/// Convenience alias for results returned by the SVNR core.
pub type Result<T> = std::result::Result<T, SvnrError>;
