use thiserror::Error;

/// Marker error for a section that was filled in but cannot be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("section is invalid")]
pub struct Invalid;

/// Outcome of validating one form section.
///
/// `Absent` means the user deliberately left the section out (it was not
/// selected) and is a legitimate answer. `Invalid` means the section was
/// selected but malformed or incomplete. The two must never be confused:
/// an absent gross income section is fine as long as some other income is
/// declared, an invalid one blocks submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T> {
    Valid(T),
    Absent,
    Invalid,
}

impl<T> Validation<T> {
    /// Splits the outcome so that `?` can propagate `Invalid` while keeping
    /// `Absent` as `None`.
    pub fn into_result(self) -> Result<Option<T>, Invalid> {
        match self {
            Self::Valid(value) => Ok(Some(value)),
            Self::Absent => Ok(None),
            Self::Invalid => Err(Invalid),
        }
    }
}

impl<T> From<Result<T, Invalid>> for Validation<T> {
    fn from(result: Result<T, Invalid>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(Invalid) => Self::Invalid,
        }
    }
}
