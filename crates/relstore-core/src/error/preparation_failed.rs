use super::Error;

/// Error when the preparation or resolution stage could not process a query.
///
/// The underlying cause is attached via [`Error::context`]; this kind carries
/// the offending query's textual form.
#[derive(Debug)]
pub(super) struct PreparationFailedError {
    query: Box<str>,
}

impl std::error::Error for PreparationFailedError {}

impl core::fmt::Display for PreparationFailedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "query could not be prepared or resolved: {}", self.query)
    }
}

impl Error {
    /// Creates a preparation-failed error carrying the query's textual form.
    pub fn preparation_failed(query: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::PreparationFailed(PreparationFailedError {
            query: query.into().into(),
        }))
    }

    /// Returns `true` if this error reports a preparation or resolution
    /// failure.
    pub fn is_preparation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::PreparationFailed(_))
    }
}
