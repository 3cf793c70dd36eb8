mod compound;
pub use compound::{CompoundPart, CompoundProperty, PartExtractor};

mod object_id;
pub use object_id::ObjectIdProperty;

mod object_id_without_tag;
pub use object_id_without_tag::ObjectIdWithoutTagProperty;

mod serialized_object_id;
pub use serialized_object_id::SerializedObjectIdProperty;

mod simple;
pub use simple::SimpleProperty;

mod unsupported;
pub use unsupported::UnsupportedProperty;

use super::{ColumnDef, ColumnValue, ColumnValueProvider, ColumnValueTable};
use crate::{stmt, Error, Result};

/// The mapping contract between one application value and its column-level
/// storage representation.
///
/// A closed set of variants so equivalence checks and visitor dispatch stay
/// exhaustive. All instances are immutable value-like objects, safely shared
/// read-only across concurrent translations.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageProperty {
    /// One value, one column
    Simple(SimpleProperty),

    /// A record value split across nested properties
    Compound(CompoundProperty),

    /// A polymorphic object identity: key value column plus class tag column
    ObjectId(ObjectIdProperty),

    /// An object identity whose concrete class is statically known, so no
    /// class tag column is stored
    ObjectIdWithoutTag(ObjectIdWithoutTagProperty),

    /// An object identity serialized into a single text column
    SerializedObjectId(SerializedObjectIdProperty),

    /// A declared member whose type has no storage representation; every
    /// operation fails with the recorded message
    Unsupported(UnsupportedProperty),
}

/// Visitor dispatch over property variants, for the external DDL emitter.
pub trait PropertyVisitor {
    fn visit_simple(&mut self, property: &SimpleProperty);
    fn visit_compound(&mut self, property: &CompoundProperty);
    fn visit_object_id(&mut self, property: &ObjectIdProperty);
    fn visit_object_id_without_tag(&mut self, property: &ObjectIdWithoutTagProperty);
    fn visit_serialized_object_id(&mut self, property: &SerializedObjectIdProperty);
    fn visit_unsupported(&mut self, property: &UnsupportedProperty);
}

impl StorageProperty {
    /// The declared application-level value type.
    pub fn app_ty(&self) -> &stmt::Type {
        match self {
            Self::Simple(p) => &p.column.ty.app_ty,
            Self::Compound(p) => &p.app_ty,
            Self::ObjectId(p) => &p.app_ty,
            Self::ObjectIdWithoutTag(p) => &p.app_ty,
            Self::SerializedObjectId(p) => &p.app_ty,
            Self::Unsupported(p) => &p.app_ty,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Simple(_) => "Simple",
            Self::Compound(_) => "Compound",
            Self::ObjectId(_) => "ObjectId",
            Self::ObjectIdWithoutTag(_) => "ObjectIdWithoutTag",
            Self::SerializedObjectId(_) => "SerializedObjectId",
            Self::Unsupported(_) => "Unsupported",
        }
    }

    /// All owned columns, in deterministic order.
    pub fn columns(&self) -> Vec<ColumnDef> {
        match self {
            Self::Simple(p) => p.columns(),
            Self::Compound(p) => p.columns(),
            Self::ObjectId(p) => p.columns(),
            Self::ObjectIdWithoutTag(p) => p.columns(),
            Self::SerializedObjectId(p) => p.columns(),
            Self::Unsupported(_) => vec![],
        }
    }

    /// The column subset sufficient to test equality on the value domain.
    pub fn comparison_columns(&self) -> Vec<ColumnDef> {
        match self {
            Self::Simple(p) => p.columns(),
            Self::Compound(p) => p.comparison_columns(),
            // The class tag is redundant for equality on the value domain
            Self::ObjectId(p) => vec![p.value_column.clone()],
            Self::ObjectIdWithoutTag(p) => p.columns(),
            Self::SerializedObjectId(p) => p.columns(),
            Self::Unsupported(_) => vec![],
        }
    }

    /// Splits an application value into column values for storage.
    pub fn split_value(&self, value: &stmt::Value) -> Result<Vec<ColumnValue>> {
        match self {
            Self::Simple(p) => p.split_value(value),
            Self::Compound(p) => p.split_value(value),
            Self::ObjectId(p) => p.split_value(value),
            Self::ObjectIdWithoutTag(p) => p.split_value(value),
            Self::SerializedObjectId(p) => p.split_value(value),
            Self::Unsupported(p) => Err(p.fault()),
        }
    }

    /// Splits an application value into column values usable in equality
    /// predicates.
    pub fn split_value_for_comparison(&self, value: &stmt::Value) -> Result<Vec<ColumnValue>> {
        match self {
            Self::Simple(p) => p.split_value(value),
            Self::Compound(p) => p.split_value_for_comparison(value),
            Self::ObjectId(p) => p.split_value_for_comparison(value),
            Self::ObjectIdWithoutTag(p) => p.split_value(value),
            Self::SerializedObjectId(p) => p.split_value(value),
            Self::Unsupported(p) => Err(p.fault()),
        }
    }

    /// Splits a batch of values for a set-membership comparison.
    ///
    /// The input sequence is drained exactly once, up front; row order
    /// matches input order, and any per-value fault surfaces here rather
    /// than at some later consumption point.
    pub fn split_values_for_comparison<I>(&self, values: I) -> Result<ColumnValueTable>
    where
        I: IntoIterator<Item = stmt::Value>,
    {
        let mut table = ColumnValueTable::new(self.comparison_columns());
        for value in values {
            let split = self.split_value_for_comparison(&value)?;
            table.push_row(split.into_iter().map(|cv| cv.value).collect())?;
        }
        Ok(table)
    }

    /// Combines one row's column values back into an application value.
    pub fn combine_value(&self, provider: &dyn ColumnValueProvider) -> Result<stmt::Value> {
        match self {
            Self::Simple(p) => p.combine_value(provider),
            Self::Compound(p) => p.combine_value(provider),
            Self::ObjectId(p) => p.combine_value(provider),
            Self::ObjectIdWithoutTag(p) => p.combine_value(provider),
            Self::SerializedObjectId(p) => p.combine_value(provider),
            Self::Unsupported(p) => Err(p.fault()),
        }
    }

    /// Merges this property with structurally equivalent siblings, one per
    /// concrete source table, into one shared definition.
    ///
    /// Implemented as a pairwise reduce; each step validates equivalence and
    /// merges nested components positionally. The only dimension allowed to
    /// vary is storage-type nullability, which widens across inputs.
    pub fn unify<'a, I>(&'a self, others: I) -> Result<StorageProperty>
    where
        I: IntoIterator<Item = &'a StorageProperty>,
    {
        let mut unified = self.clone();
        for other in others {
            unified = unified.unify_pair(other)?;
        }
        Ok(unified)
    }

    fn unify_pair(&self, other: &StorageProperty) -> Result<StorageProperty> {
        match (self, other) {
            (Self::Simple(a), Self::Simple(b)) => Ok(Self::Simple(a.unify(b)?)),
            (Self::Compound(a), Self::Compound(b)) => Ok(Self::Compound(a.unify(b)?)),
            (Self::ObjectId(a), Self::ObjectId(b)) => Ok(Self::ObjectId(a.unify(b)?)),
            (Self::ObjectIdWithoutTag(a), Self::ObjectIdWithoutTag(b)) => {
                Ok(Self::ObjectIdWithoutTag(a.unify(b)?))
            }
            (Self::SerializedObjectId(a), Self::SerializedObjectId(b)) => {
                Ok(Self::SerializedObjectId(a.unify(b)?))
            }
            (Self::Unsupported(a), Self::Unsupported(b)) => Ok(Self::Unsupported(a.unify(b)?)),
            (a, b) => Err(Error::equivalence_violation(
                "property variant",
                a.variant_name(),
                b.variant_name(),
            )),
        }
    }

    pub fn accept<V: PropertyVisitor>(&self, visitor: &mut V) {
        match self {
            Self::Simple(p) => visitor.visit_simple(p),
            Self::Compound(p) => visitor.visit_compound(p),
            Self::ObjectId(p) => visitor.visit_object_id(p),
            Self::ObjectIdWithoutTag(p) => visitor.visit_object_id_without_tag(p),
            Self::SerializedObjectId(p) => visitor.visit_serialized_object_id(p),
            Self::Unsupported(p) => visitor.visit_unsupported(p),
        }
    }
}
