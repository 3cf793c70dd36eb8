mod empty_view;
pub use empty_view::EmptyViewDef;

mod filter_view;
pub use filter_view::FilterViewDef;

mod index;
pub use index::{ForeignKey, Index};

mod name;
pub use name::EntityName;

mod table;
pub use table::TableDef;

mod union_view;
pub use union_view::UnionViewDef;

mod visitor;
pub use visitor::EntityVisitor;

use super::{ColumnDef, StorageProperty};

/// A relational entity: how (part of) a type hierarchy maps onto physical
/// storage.
///
/// A closed set of variants expressing the inheritance-mapping strategies:
/// one concrete table, a class-tag-filtered subset of a base entity, a union
/// of heterogeneous tables, or a hierarchy with no concrete tables at all.
/// Constructed once from mapping metadata and immutable thereafter.
#[derive(Debug)]
pub enum Entity {
    Table(TableDef),
    FilterView(FilterViewDef),
    UnionView(UnionViewDef),
    EmptyView(EmptyViewDef),
}

impl Entity {
    pub fn name(&self) -> &EntityName {
        match self {
            Self::Table(e) => &e.name,
            Self::FilterView(e) => &e.name,
            Self::UnionView(e) => &e.name,
            Self::EmptyView(e) => &e.name,
        }
    }

    /// The identity property of rows in this entity.
    pub fn id_property(&self) -> &StorageProperty {
        match self {
            Self::Table(e) => &e.id_property,
            Self::FilterView(e) => &e.id_property,
            Self::UnionView(e) => &e.id_property,
            Self::EmptyView(e) => &e.id_property,
        }
    }

    pub fn timestamp_property(&self) -> &StorageProperty {
        match self {
            Self::Table(e) => &e.timestamp_property,
            Self::FilterView(e) => &e.timestamp_property,
            Self::UnionView(e) => &e.timestamp_property,
            Self::EmptyView(e) => &e.timestamp_property,
        }
    }

    /// Data properties in declaration order.
    pub fn properties(&self) -> &[StorageProperty] {
        match self {
            Self::Table(e) => &e.properties,
            Self::FilterView(e) => &e.properties,
            Self::UnionView(e) => &e.properties,
            Self::EmptyView(e) => &e.properties,
        }
    }

    /// All declared columns: identity (value then class tag), timestamp,
    /// then each data property in declaration order.
    pub fn columns(&self) -> Vec<ColumnDef> {
        let mut columns = self.id_property().columns();
        columns.extend(self.timestamp_property().columns());
        for property in self.properties() {
            columns.extend(property.columns());
        }
        columns
    }

    /// The class tag column, when the identity carries one.
    pub fn class_tag_column(&self) -> Option<ColumnDef> {
        match self.id_property() {
            StorageProperty::ObjectId(p) => Some(p.class_column.clone()),
            _ => None,
        }
    }

    pub fn is_union_view(&self) -> bool {
        matches!(self, Self::UnionView(_))
    }

    pub fn is_filter_view(&self) -> bool {
        matches!(self, Self::FilterView(_))
    }

    pub fn accept<V: EntityVisitor>(&self, visitor: &mut V) {
        match self {
            Self::Table(e) => visitor.visit_table(e),
            Self::FilterView(e) => visitor.visit_filter_view(e),
            Self::UnionView(e) => visitor.visit_union_view(e),
            Self::EmptyView(e) => visitor.visit_empty_view(e),
        }
    }
}
