use super::{ModelId, Relation};
use crate::stmt;
use std::fmt;

/// One entry in a model's effective member table.
///
/// The table is precomputed by the configuration subsystem: it contains the
/// model's own members plus everything visible through its base chain and
/// mixed-in capability interfaces, so member resolution is a plain lookup,
/// never reflection.
#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The member name
    pub name: String,

    /// Primitive, relation, or raw (field-backed, not a property)
    pub ty: FieldTy,

    /// Where the member is declared
    pub origin: FieldOrigin,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub enum FieldTy {
    /// A scalar property mapped to one or more columns
    Primitive(FieldPrimitive),

    /// A relation end-point
    Relation(Relation),

    /// A field-backed member with no property mapping. Kept in the member
    /// table so fetch validation can reject it by name.
    Raw,
}

#[derive(Debug, Clone)]
pub struct FieldPrimitive {
    /// The member's application-level type
    pub ty: stmt::Type,
}

/// Provenance of a member within the effective member table.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOrigin {
    /// Declared directly on the model
    Own,

    /// Inherited from a supertype
    Base(ModelId),

    /// Declared by a mixed-in capability interface. `introduced` is false
    /// when the mixin member is not exposed through any interface introduced
    /// on the concrete type.
    Mixin { interface: String, introduced: bool },
}

impl Field {
    pub fn is_relation(&self) -> bool {
        matches!(self.ty, FieldTy::Relation(_))
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match &self.ty {
            FieldTy::Relation(relation) => Some(relation),
            _ => None,
        }
    }

}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
