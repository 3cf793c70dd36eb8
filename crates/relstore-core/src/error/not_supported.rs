use super::Error;

/// Error when a syntactically valid construct is semantically disallowed.
///
/// This occurs when:
/// - A fetch targets a member that is not a relation end-point
/// - A collection-valued relation is accessed outside a join
/// - A sort expression names a mixin member that is not introduced on the
///   concrete target type
#[derive(Debug)]
pub(super) struct NotSupportedError {
    message: Box<str>,
}

impl std::error::Error for NotSupportedError {}

impl core::fmt::Display for NotSupportedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "not supported: {}", self.message)
    }
}

impl Error {
    /// Creates a not-supported error with a precise, named explanation.
    pub fn not_supported(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NotSupported(NotSupportedError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error reports a disallowed construct.
    pub fn is_not_supported(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NotSupported(_))
    }
}
