use super::EntityName;
use crate::schema::db::StorageProperty;

/// A hierarchy mapped to no concrete table at all.
///
/// Declared so the mapping stays total over the hierarchy; querying through
/// it fails at resolution.
#[derive(Debug)]
pub struct EmptyViewDef {
    pub name: EntityName,

    pub id_property: StorageProperty,

    pub timestamp_property: StorageProperty,

    pub properties: Vec<StorageProperty>,

    pub synonyms: Vec<EntityName>,
}
