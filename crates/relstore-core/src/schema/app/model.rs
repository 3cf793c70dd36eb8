use super::{ClassTag, Field, FieldId};
use std::fmt;

/// A type in the persistent hierarchy.
#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: String,

    /// Direct supertype, if the model is not a hierarchy root
    pub base: Option<ModelId>,

    /// Discriminator value for concrete types; `None` for abstract types
    pub class_tag: Option<ClassTag>,

    /// Name of the identity member ("ID" by convention)
    pub identity_member: String,

    /// The effective member table: own, inherited, and mixed-in members
    pub fields: Vec<Field>,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub usize);

impl Model {
    pub fn field(&self, field: impl Into<FieldId>) -> &Field {
        let field_id = field.into();
        assert_eq!(self.id, field_id.model);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_concrete(&self) -> bool {
        self.class_tag.is_some()
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}
