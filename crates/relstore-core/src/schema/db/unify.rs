use crate::{Error, Result};
use std::fmt::Debug;

/// Validates that one equivalence dimension agrees between two definitions
/// being unified.
///
/// Every equivalence-violation message is produced through here so the
/// attribute-name-plus-both-values format stays uniform across variants.
pub(crate) fn check_same<T: PartialEq + Debug>(
    attribute: &'static str,
    left: &T,
    right: &T,
) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(Error::equivalence_violation(
            attribute,
            format!("{left:?}"),
            format!("{right:?}"),
        ))
    }
}
