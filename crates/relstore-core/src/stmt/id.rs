use super::Value;
use crate::schema::app::ClassTag;

/// A composite object identity.
///
/// Pairs the class tag of the concrete runtime type with the key value stored
/// in the identity column. The class tag travels with the identity so that a
/// value read from a polymorphic union can be attributed to its concrete
/// type without consulting the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Id {
    /// Discriminator of the concrete type the identity belongs to
    pub class: ClassTag,

    /// The raw key value stored in the identity column
    pub key: Box<Value>,
}

impl Id {
    pub fn new(class: impl Into<ClassTag>, key: impl Into<Value>) -> Self {
        Self {
            class: class.into(),
            key: Box::new(key.into()),
        }
    }
}

// The serialized form is also what the serialized-identity storage property
// writes, so the format is part of the storage contract.
impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.class, self.key)
    }
}
