use super::Error;

/// Error when a single-result extraction runs against an empty sequence and
/// no default value was requested.
#[derive(Debug)]
pub(super) struct RecordNotFoundError;

impl std::error::Error for RecordNotFoundError {}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("sequence contains no elements")
    }
}

impl Error {
    /// Creates an empty-sequence error.
    pub fn record_not_found() -> Error {
        Error::from(super::ErrorKind::RecordNotFound(RecordNotFoundError))
    }

    /// Returns `true` if this error reports an empty result sequence.
    pub fn is_record_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RecordNotFound(_))
    }
}
