pub mod app;

pub mod db;

pub mod mapping;
use mapping::Mapping;

use app::{ClassTag, FieldId, Model, ModelId};
use db::{Entity, StorageProperty};

use crate::{Error, Result};
use std::sync::Arc;

/// The complete mapping metadata handed to this core.
///
/// Constructed once by the (out-of-scope) configuration subsystem and
/// immutable afterwards, so it is safely shared read-only across concurrent
/// translations.
#[derive(Debug)]
pub struct Schema {
    /// Application-level type hierarchy
    pub app: app::Schema,

    /// Maps the app-level hierarchy to relational entities
    pub mapping: Mapping,
}

impl Schema {
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.app.model(id)
    }

    pub fn mapping_for(&self, id: impl Into<ModelId>) -> Result<&mapping::Model> {
        let id = id.into();
        self.mapping
            .try_model(id)
            .ok_or_else(|| Error::unmapped_type(&self.app.model(id).name))
    }

    /// The relational entity the model's hierarchy is queried through.
    pub fn entity_for(&self, id: impl Into<ModelId>) -> Result<&Arc<Entity>> {
        Ok(&self.mapping_for(id)?.entity)
    }

    pub fn property_for(&self, field: FieldId) -> Option<&StorageProperty> {
        self.mapping.try_model(field.model)?.property(field)
    }

    pub fn class_tag(&self, id: impl Into<ModelId>) -> Option<&ClassTag> {
        self.app.model(id).class_tag.as_ref()
    }

    pub fn model_by_tag(&self, tag: &ClassTag) -> Option<&Model> {
        self.app
            .models
            .values()
            .find(|model| model.class_tag.as_ref() == Some(tag))
    }
}
