use super::Error;

/// Error when a single-result extraction finds more than one element.
///
/// Raised regardless of the return-default-if-empty flag.
#[derive(Debug)]
pub(super) struct TooManyRecordsError;

impl std::error::Error for TooManyRecordsError {}

impl core::fmt::Display for TooManyRecordsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("sequence contains more than one element")
    }
}

impl Error {
    /// Creates a more-than-one-element error.
    pub fn too_many_records() -> Error {
        Error::from(super::ErrorKind::TooManyRecords(TooManyRecordsError))
    }

    /// Returns `true` if this error reports a multi-element sequence where
    /// one element was expected.
    pub fn is_too_many_records(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TooManyRecords(_))
    }
}
