use super::{Entity, EntityName};
use crate::schema::app::ClassTag;
use crate::schema::db::StorageProperty;
use std::sync::Arc;

/// A subset of a base entity's rows, filtered by class tag.
///
/// Used to query a non-root subtype mapped into its supertype's table.
#[derive(Debug)]
pub struct FilterViewDef {
    pub name: EntityName,

    /// The entity the row subset comes from
    pub base: Arc<Entity>,

    /// Class tags whose rows are visible through this view
    pub class_tags: Vec<ClassTag>,

    pub id_property: StorageProperty,

    pub timestamp_property: StorageProperty,

    pub properties: Vec<StorageProperty>,

    pub synonyms: Vec<EntityName>,
}
