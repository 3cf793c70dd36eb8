use super::Error;

/// Error when unification is attempted over storage definitions that are not
/// structurally equivalent.
///
/// Carries the name of the attribute that differs and both conflicting
/// values.
#[derive(Debug)]
pub(super) struct EquivalenceViolationError {
    attribute: &'static str,
    left: Box<str>,
    right: Box<str>,
}

impl std::error::Error for EquivalenceViolationError {}

impl core::fmt::Display for EquivalenceViolationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot unify storage definitions: {} differs ({} vs {})",
            self.attribute, self.left, self.right
        )
    }
}

impl Error {
    /// Creates an equivalence-violation error naming the mismatched attribute
    /// and both values.
    pub fn equivalence_violation(
        attribute: &'static str,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::EquivalenceViolation(
            EquivalenceViolationError {
                attribute,
                left: left.into().into(),
                right: right.into().into(),
            },
        ))
    }

    /// Returns `true` if this error reports a unification mismatch.
    pub fn is_equivalence_violation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::EquivalenceViolation(_))
    }
}
