use super::Error;

/// Error when the execution entry point is invoked without an active
/// persistence context.
#[derive(Debug)]
pub(super) struct NoActiveContextError;

impl std::error::Error for NoActiveContextError {}

impl core::fmt::Display for NoActiveContextError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("no active persistence context")
    }
}

impl Error {
    /// Creates a no-active-context error.
    pub fn no_active_context() -> Error {
        Error::from(super::ErrorKind::NoActiveContext(NoActiveContextError))
    }

    /// Returns `true` if this error reports a missing execution context.
    pub fn is_no_active_context(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoActiveContext(_))
    }
}
