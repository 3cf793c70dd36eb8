use super::{EntityName, ForeignKey, Index};
use crate::schema::db::{ColumnDef, StorageProperty};

/// A concrete database table.
#[derive(Debug)]
pub struct TableDef {
    pub name: EntityName,

    /// Identity property (key value plus class tag)
    pub id_property: StorageProperty,

    /// Concurrency timestamp property
    pub timestamp_property: StorageProperty,

    /// Data properties in declaration order
    pub properties: Vec<StorageProperty>,

    pub indices: Vec<Index>,

    pub foreign_keys: Vec<ForeignKey>,

    pub synonyms: Vec<EntityName>,
}

impl TableDef {
    /// All declared columns in declared order.
    pub fn columns(&self) -> Vec<ColumnDef> {
        let mut columns = self.id_property.columns();
        columns.extend(self.timestamp_property.columns());
        for property in &self.properties {
            columns.extend(property.columns());
        }
        columns
    }

    /// For a supplied column list (e.g. the columns physically present in a
    /// sibling schema object), returns, in this table's own declared-column
    /// order, the matching column for each declared column name, or `None`
    /// where the supplied list has no match.
    ///
    /// Matching is by column name, not identity.
    pub fn adjusted_column_list(&self, full: &[ColumnDef]) -> Vec<Option<ColumnDef>> {
        self.columns()
            .iter()
            .map(|declared| {
                full.iter()
                    .find(|candidate| candidate.name == declared.name)
                    .cloned()
            })
            .collect()
    }
}
