use super::StorageProperty;
use crate::{schema::db::check_same, stmt, Error, Result};

/// A declared member whose type has no storage representation.
///
/// Kept in the entity model so the member stays addressable for error
/// reporting; every split/combine operation fails with the recorded message.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedProperty {
    /// The declared application-level type
    pub app_ty: stmt::Type,

    /// The static fault message raised on any access
    pub message: String,
}

impl UnsupportedProperty {
    pub fn new(app_ty: stmt::Type, message: impl Into<String>) -> Self {
        Self {
            app_ty,
            message: message.into(),
        }
    }

    pub(super) fn fault(&self) -> Error {
        Error::not_supported(self.message.clone())
    }

    pub(super) fn unify(&self, other: &Self) -> Result<Self> {
        check_same("declared value type", &self.app_ty, &other.app_ty)?;
        check_same("fault message", &self.message, &other.message)?;
        Ok(self.clone())
    }
}

impl From<UnsupportedProperty> for StorageProperty {
    fn from(value: UnsupportedProperty) -> Self {
        Self::Unsupported(value)
    }
}
