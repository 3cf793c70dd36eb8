use super::{Entity, EntityName, TableDef};
use crate::schema::db::{ColumnDef, StorageProperty};
use std::sync::Arc;

/// Several concrete tables unioned together to support querying a supertype.
///
/// The unified properties span every member table; a member table that lacks
/// a column contributes an explicit null literal in the generated statement,
/// keeping column positions aligned across the union branches.
#[derive(Debug)]
pub struct UnionViewDef {
    pub name: EntityName,

    /// Unioned entities: tables or nested union views
    pub members: Vec<Arc<Entity>>,

    pub id_property: StorageProperty,

    pub timestamp_property: StorageProperty,

    /// Unified data properties in declaration order
    pub properties: Vec<StorageProperty>,

    pub synonyms: Vec<EntityName>,
}

impl UnionViewDef {
    /// One column list spanning identity, class tag, timestamp, then each
    /// declared data column in declaration order.
    ///
    /// For each declared column, the first column among `available` whose
    /// name matches is taken (first match wins on duplicate names); `None`
    /// marks a position the caller must pad with a null literal.
    pub fn full_column_list(&self, available: &[ColumnDef]) -> Vec<Option<ColumnDef>> {
        let mut declared = self.id_property.columns();
        declared.extend(self.timestamp_property.columns());
        for property in &self.properties {
            declared.extend(property.columns());
        }

        declared
            .iter()
            .map(|column| {
                available
                    .iter()
                    .find(|candidate| candidate.name == column.name)
                    .cloned()
            })
            .collect()
    }

    /// Recursively flattens nested union views into their concrete table
    /// members, preserving encounter order.
    pub fn all_tables(&self) -> Vec<&TableDef> {
        let mut tables = vec![];
        collect_tables(&self.members, &mut tables);
        tables
    }
}

fn collect_tables<'a>(members: &'a [Arc<Entity>], out: &mut Vec<&'a TableDef>) {
    for member in members {
        match &**member {
            Entity::Table(table) => out.push(table),
            Entity::UnionView(union) => collect_tables(&union.members, out),
            Entity::FilterView(view) => collect_tables(std::slice::from_ref(&view.base), out),
            Entity::EmptyView(_) => {}
        }
    }
}
