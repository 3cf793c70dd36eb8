use super::Error;

/// Error when a query references a type, member, or relation that has no
/// persistent mapping.
///
/// This occurs when:
/// - A queried type is not part of the mapped hierarchy
/// - A member access names a member above the mapped root or one that is not
///   declared persistent
/// - A join traverses a member that declares no relation
#[derive(Debug)]
pub(super) struct UnmappedItemError {
    item_kind: &'static str,
    name: Box<str>,
}

impl std::error::Error for UnmappedItemError {}

impl core::fmt::Display for UnmappedItemError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unmapped {}: {}", self.item_kind, self.name)
    }
}

impl Error {
    /// Creates an unmapped type error naming the offending type.
    pub fn unmapped_type(name: impl Into<String>) -> Error {
        Error::unmapped_item("type", name)
    }

    /// Creates an unmapped relation error naming the offending member.
    pub fn unmapped_relation(name: impl Into<String>) -> Error {
        Error::unmapped_item("relation", name)
    }

    /// Creates an unmapped member error naming the offending member.
    pub fn unmapped_member(name: impl Into<String>) -> Error {
        Error::unmapped_item("member", name)
    }

    fn unmapped_item(item_kind: &'static str, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnmappedItem(UnmappedItemError {
            item_kind,
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error reports an unmapped type, member, or
    /// relation.
    pub fn is_unmapped_item(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnmappedItem(_))
    }
}
