use super::app::{FieldId, ModelId};
use super::db::{Entity, StorageProperty};
use indexmap::IndexMap;
use std::sync::Arc;

/// Defines the correspondence between app-level models and relational
/// entities.
///
/// Constructed by the configuration subsystem and immutable at runtime; the
/// resolver consults it for every table, member, and join resolution.
#[derive(Debug, Default)]
pub struct Mapping {
    /// Per-model mappings indexed by model identifier
    pub models: IndexMap<ModelId, Model>,
}

/// The mapping for one model.
#[derive(Debug)]
pub struct Model {
    pub model: ModelId,

    /// The entity the model's instances are queried through
    pub entity: Arc<Entity>,

    /// Storage property per persistent field, keyed by field index
    pub properties: IndexMap<usize, StorageProperty>,
}

impl Mapping {
    /// Returns the mapping for the specified model.
    ///
    /// # Panics
    ///
    /// Panics if the model ID does not exist in the mapping.
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    pub fn try_model(&self, id: impl Into<ModelId>) -> Option<&Model> {
        self.models.get(&id.into())
    }

    pub fn register(&mut self, model: Model) {
        self.models.insert(model.model, model);
    }
}

impl Model {
    pub fn property(&self, field: FieldId) -> Option<&StorageProperty> {
        assert_eq!(self.model, field.model);
        self.properties.get(&field.index)
    }
}
