use super::Error;

/// Error when combined column values violate a stored-data invariant.
///
/// This occurs when an identity value and its class tag are not jointly null
/// or jointly non-null while reading a row back.
#[derive(Debug)]
pub(super) struct StorageConsistencyError {
    column: Box<str>,
    message: Box<str>,
}

impl std::error::Error for StorageConsistencyError {}

impl core::fmt::Display for StorageConsistencyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "stored data violates integrity on column {}: {}",
            self.column, self.message
        )
    }
}

impl Error {
    /// Creates a storage-consistency error naming the offending column.
    pub fn storage_consistency(column: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::StorageConsistency(StorageConsistencyError {
            column: column.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error reports a stored-data integrity fault.
    pub fn is_storage_consistency(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::StorageConsistency(_))
    }
}
