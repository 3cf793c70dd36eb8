use super::Error;

/// Error when the generation stage could not render a resolved statement.
///
/// Distinct from [`Error::preparation_failed`] so callers can tell "your
/// query references something unmapped" apart from "the provider could not
/// handle this shape".
#[derive(Debug)]
pub(super) struct GenerationFailedError {
    query: Box<str>,
}

impl std::error::Error for GenerationFailedError {}

impl core::fmt::Display for GenerationFailedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "SQL generation failed for query: {}", self.query)
    }
}

impl Error {
    /// Creates a generation-failed error carrying the query's textual form.
    pub fn generation_failed(query: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::GenerationFailed(GenerationFailedError {
            query: query.into().into(),
        }))
    }

    /// Returns `true` if this error reports a generation failure.
    pub fn is_generation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::GenerationFailed(_))
    }
}
