use super::{FieldId, ModelId};
use crate::stmt::Direction;

/// A relation end-point between two mapped models.
#[derive(Debug, Clone)]
pub struct Relation {
    /// The related model
    pub target: ModelId,

    /// Single- or many-valued
    pub cardinality: Cardinality,

    /// Which side of the relation physically owns the foreign key
    pub fk: FkSide,

    /// The referencing-side field whose storage mapping carries the foreign
    /// key columns. For [`FkSide::Referencing`] this is the declaring field
    /// itself; for [`FkSide::Referenced`] it lives on the target model.
    pub fk_field: FieldId,

    /// Declared sort expression applied when the relation is eagerly
    /// fetched as a collection
    pub sort: Option<SortSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FkSide {
    /// The declaring side stores the foreign key
    Referencing,

    /// The related side stores the foreign key
    Referenced,
}

#[derive(Debug, Clone)]
pub struct SortSpec {
    /// Member of the target model to sort by
    pub member: String,

    pub direction: Direction,
}

impl Relation {
    pub fn is_many(&self) -> bool {
        matches!(self.cardinality, Cardinality::Many)
    }
}
